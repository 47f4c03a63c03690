// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            let contact = sub.get_one::<String>("contact").map(|s| s.trim().to_string());
            conn.execute(
                "INSERT INTO clients(name, contact) VALUES (?1, ?2)",
                params![name, contact],
            )?;
            println!("Added client '{}'", name);
        }
        Some(("list", _)) => {
            let mut stmt =
                conn.prepare("SELECT name, contact, created_at FROM clients ORDER BY name")?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, Option<String>>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (n, c, cr) = row?;
                data.push(vec![n, c.unwrap_or_default(), cr]);
            }
            println!("{}", pretty_table(&["Name", "Contact", "Created"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("DELETE FROM clients WHERE name=?1", params![name])?;
            println!("Removed client '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
