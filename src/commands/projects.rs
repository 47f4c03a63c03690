// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::allocation::expense_for_project;
use crate::utils::{fmt_money, id_for_client, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("DELETE FROM projects WHERE name=?1", params![name])?;
            println!("Removed project '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let client = sub.get_one::<String>("client").unwrap().trim();
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "open".to_string());
    let client_id = id_for_client(conn, client)?;
    conn.execute(
        "INSERT INTO projects(name, client_id, status) VALUES (?1, ?2, ?3)",
        params![name, client_id, status],
    )?;
    println!("Added project '{}' for client '{}' ({})", name, client, status);
    Ok(())
}

#[derive(Serialize)]
pub struct ProjectRow {
    pub name: String,
    pub client: String,
    pub status: String,
    pub labor_cost: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let snapshot = crate::db::load_snapshot(conn)?;

    let mut sql = String::from(
        "SELECT p.id, p.name, c.name, p.status FROM projects p JOIN clients c ON p.client_id=c.id",
    );
    let mut stmt;
    let rows = if let Some(client) = sub.get_one::<String>("client") {
        sql.push_str(" WHERE c.name=?1 ORDER BY p.name");
        stmt = conn.prepare(&sql)?;
        stmt.query_map(params![client], map_row)?
    } else {
        sql.push_str(" ORDER BY p.name");
        stmt = conn.prepare(&sql)?;
        stmt.query_map([], map_row)?
    };

    let mut data = Vec::new();
    for row in rows {
        let (id, name, client, status) = row?;
        let cost = expense_for_project(&snapshot.assignments, &snapshot.rates, id);
        data.push(ProjectRow {
            name,
            client,
            status,
            labor_cost: fmt_money(&cost),
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| vec![r.name, r.client, r.status, r.labor_cost])
            .collect();
        println!(
            "{}",
            pretty_table(&["Project", "Client", "Status", "Labor cost"], rows)
        );
    }
    Ok(())
}

fn map_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, String, String, String)> {
    Ok((
        r.get::<_, i64>(0)?,
        r.get::<_, String>(1)?,
        r.get::<_, String>(2)?,
        r.get::<_, String>(3)?,
    ))
}
