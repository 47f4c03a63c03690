// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::allocation::allocation_for_worker_on_date;
use crate::utils::{maybe_print_json, parse_date, parse_month, pretty_table, project_for_name, worker_name};
use anyhow::{bail, Result};
use rusqlite::{params, Connection, OptionalExtension};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("assign", sub)) => assign(conn, sub)?,
        Some(("unassign", sub)) => unassign(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("day", sub)) => day(conn, sub)?,
        Some(("worker-day", sub)) => worker_day(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn assign(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let worker = sub.get_one::<String>("worker").unwrap().trim().to_string();
    let project = sub.get_one::<String>("project").unwrap().trim();
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;

    let wname = worker_name(conn, &worker)?;
    let (project_id, project_name, client_id, client_name) = project_for_name(conn, project)?;

    // Friendly pre-check; the UNIQUE constraint still backstops races.
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM work_assignments WHERE worker_id=?1 AND project_id=?2 AND date=?3",
            params![worker, project_id, date.to_string()],
            |r| r.get(0),
        )
        .optional()?;
    if existing.is_some() {
        bail!(
            "{} is already assigned to '{}' on {}",
            wname,
            project_name,
            date
        );
    }

    conn.execute(
        "INSERT INTO work_assignments(worker_id, project_id, project_name, client_id, client_name, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            worker,
            project_id,
            project_name,
            client_id,
            client_name,
            date.to_string()
        ],
    )?;
    println!("Assigned {} to '{}' on {}", wname, project_name, date);
    Ok(())
}

fn unassign(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !sub.get_flag("yes") {
        println!("Refusing to delete assignment {} without --yes", id);
        return Ok(());
    }
    let n = conn.execute("DELETE FROM work_assignments WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Assignment {} not found", id);
    }
    println!("Deleted assignment {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut sql = String::from(
        "SELECT id, date, worker_id, project_name, client_name FROM work_assignments WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month.trim())?;
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month);
    }
    if let Some(worker) = sub.get_one::<String>("worker") {
        sql.push_str(" AND worker_id=?");
        params_vec.push(worker.trim().into());
    }
    if let Some(project) = sub.get_one::<String>("project") {
        sql.push_str(" AND project_name=?");
        params_vec.push(project.trim().into());
    }
    sql.push_str(" ORDER BY date, worker_id, id");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let worker: String = r.get(2)?;
        let project: String = r.get(3)?;
        let client: Option<String> = r.get(4)?;
        data.push(vec![
            id.to_string(),
            date,
            worker,
            project,
            client.unwrap_or_default(),
        ]);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Worker", "Project", "Client"], data)
        );
    }
    Ok(())
}

fn day(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let mut stmt = conn.prepare(
        "SELECT a.id, a.worker_id, w.name, a.project_name
         FROM work_assignments a LEFT JOIN workers w ON a.worker_id=w.id
         WHERE a.date=?1 ORDER BY a.worker_id, a.project_name",
    )?;
    let rows = stmt.query_map(params![date.to_string()], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, worker_id, wname, project) = row?;
        data.push(vec![
            id.to_string(),
            wname.unwrap_or(worker_id),
            project,
        ]);
    }
    println!("{}", pretty_table(&["Id", "Worker", "Project"], data));
    Ok(())
}

fn worker_day(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let worker = sub.get_one::<String>("worker").unwrap().trim().to_string();
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;

    let assignments = crate::db::load_assignments(conn)?;
    let shares = allocation_for_worker_on_date(&assignments, &worker, date);

    if !maybe_print_json(json_flag, jsonl_flag, &shares)? {
        let rows: Vec<Vec<String>> = shares
            .iter()
            .map(|s| {
                vec![
                    s.project_name.clone(),
                    format!("{:.4}", s.share),
                    format!("{}%", s.share_percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Project", "Share", "Percent"], rows));
    }
    Ok(())
}
