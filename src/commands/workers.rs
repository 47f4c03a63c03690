// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::allocation::{daily_rate, total_days_for_worker, total_expense_for_worker};
use crate::utils::{fmt_money, maybe_print_json, parse_rate, pretty_table, worker_name};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim().to_string();
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            conn.execute(
                "INSERT INTO workers(id, name) VALUES (?1, ?2)",
                params![id, name],
            )?;
            println!("Added worker '{}' ({})", name, id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set-rate", sub)) => set_rate(conn, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            conn.execute("DELETE FROM workers WHERE id=?1", params![id])?;
            println!("Removed worker '{}'", id);
        }
        _ => {}
    }
    Ok(())
}

fn set_rate(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let worker = sub.get_one::<String>("worker").unwrap().trim().to_string();
    let rate = parse_rate(sub.get_one::<String>("rate").unwrap().trim())?;
    let name = worker_name(conn, &worker)?;
    conn.execute(
        "INSERT INTO worker_rates(worker_id, rate) VALUES (?1, ?2)
         ON CONFLICT(worker_id) DO UPDATE SET rate=excluded.rate",
        params![worker, rate.to_string()],
    )?;
    println!("Daily rate for {} set to {}", name, rate);
    Ok(())
}

#[derive(Serialize)]
pub struct WorkerRow {
    pub id: String,
    pub name: String,
    pub daily_rate: String,
    pub total_days: u64,
    pub total_expense: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let snapshot = crate::db::load_snapshot(conn)?;

    let mut stmt = conn.prepare("SELECT id, name FROM workers ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
    })?;

    let mut data = Vec::new();
    for row in rows {
        let (id, name) = row?;
        let rate = daily_rate(&snapshot.rates, &id);
        let days = total_days_for_worker(&snapshot.assignments, &id);
        let expense = total_expense_for_worker(&snapshot.assignments, &snapshot.rates, &id);
        data.push(WorkerRow {
            id,
            name,
            daily_rate: fmt_money(&rate),
            total_days: days,
            total_expense: fmt_money(&expense),
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id,
                    r.name,
                    r.daily_rate,
                    r.total_days.to_string(),
                    r.total_expense,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Daily rate", "Total days", "Total expense"],
                rows
            )
        );
    }
    Ok(())
}
