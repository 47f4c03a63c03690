// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("assignments", sub)) => export_assignments(conn, sub),
        _ => Ok(()),
    }
}

fn export_assignments(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT a.date, a.worker_id, w.name, a.project_name, a.client_name
         FROM work_assignments a
         LEFT JOIN workers w ON a.worker_id=w.id
         ORDER BY a.date, a.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, Option<String>>(4)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "worker_id", "worker", "project", "client"])?;
            for row in rows {
                let (d, wid, wname, project, client) = row?;
                wtr.write_record([
                    d,
                    wid,
                    wname.unwrap_or_default(),
                    project,
                    client.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, wid, wname, project, client) = row?;
                items.push(json!({
                    "date": d, "worker_id": wid, "worker": wname, "project": project, "client": client
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported assignments to {}", out);
    Ok(())
}
