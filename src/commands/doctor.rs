// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Assignments pointing at workers no longer on the roster
    let mut stmt = conn.prepare(
        "SELECT DISTINCT worker_id FROM work_assignments
         EXCEPT SELECT id FROM workers",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let w: String = r.get(0)?;
        rows.push(vec!["assignment_unknown_worker".into(), w]);
    }

    // 2) Assignments pointing at deleted projects
    let mut stmt2 = conn.prepare(
        "SELECT DISTINCT project_name FROM work_assignments a
         WHERE NOT EXISTS (SELECT 1 FROM projects p WHERE p.id=a.project_id)",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let p: String = r.get(0)?;
        rows.push(vec!["assignment_deleted_project".into(), p]);
    }

    // 3) Scheduled workers with no configured rate (they cost zero in reports)
    let mut stmt3 = conn.prepare(
        "SELECT DISTINCT worker_id FROM work_assignments
         EXCEPT SELECT worker_id FROM worker_rates",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let w: String = r.get(0)?;
        rows.push(vec!["missing_rate".into(), w]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
