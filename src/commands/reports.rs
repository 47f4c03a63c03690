// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::allocation::{
    daily_rate, expense_breakdown_for_project, total_days_for_worker, total_expense_for_worker,
};
use crate::utils::{fmt_money, id_for_project, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("workers", sub)) => workers(conn, sub)?,
        Some(("project", sub)) => project(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct WorkerExpenseRow {
    pub worker_id: String,
    pub worker: String,
    pub daily_rate: String,
    pub total_days: u64,
    pub total_expense: String,
}

fn workers(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let snapshot = crate::db::load_snapshot(conn)?;

    let mut stmt = conn.prepare("SELECT id, name FROM workers ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
    })?;

    let mut grand_total = Decimal::ZERO;
    let mut data = Vec::new();
    for row in rows {
        let (id, name) = row?;
        let expense = total_expense_for_worker(&snapshot.assignments, &snapshot.rates, &id);
        grand_total += expense;
        data.push(WorkerExpenseRow {
            daily_rate: fmt_money(&daily_rate(&snapshot.rates, &id)),
            total_days: total_days_for_worker(&snapshot.assignments, &id),
            total_expense: fmt_money(&expense),
            worker_id: id,
            worker: name,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let mut rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.worker_id,
                    r.worker,
                    r.daily_rate,
                    r.total_days.to_string(),
                    r.total_expense,
                ]
            })
            .collect();
        rows.push(vec![
            String::new(),
            "TOTAL".into(),
            String::new(),
            String::new(),
            fmt_money(&grand_total),
        ]);
        println!(
            "{}",
            pretty_table(
                &["Id", "Worker", "Daily rate", "Days", "Expense"],
                rows
            )
        );
    }
    Ok(())
}

fn project(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let name = sub.get_one::<String>("project").unwrap().trim();

    let project_id = id_for_project(conn, name)?;
    let snapshot = crate::db::load_snapshot(conn)?;
    let report = expense_breakdown_for_project(&snapshot.assignments, &snapshot.rates, project_id);

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let mut rows = Vec::new();
        for w in &report.breakdown {
            let wname = crate::utils::worker_name(conn, &w.worker_id).unwrap_or_else(|_| w.worker_id.clone());
            for a in &w.allocations {
                rows.push(vec![
                    wname.clone(),
                    a.date.to_string(),
                    format!("{}%", a.share_percent),
                    fmt_money(&a.cost),
                ]);
            }
            rows.push(vec![
                format!("{} (subtotal)", wname),
                format!("{:.2} days", w.total_days_allocated),
                String::new(),
                fmt_money(&w.cost),
            ]);
        }
        rows.push(vec![
            "TOTAL".into(),
            String::new(),
            String::new(),
            fmt_money(&report.total),
        ]);
        println!(
            "{}",
            pretty_table(&["Worker", "Date", "Share", "Cost"], rows)
        );
    }
    Ok(())
}
