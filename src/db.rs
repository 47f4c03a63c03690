// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::models::{DailyRateTable, Snapshot, WorkAssignment};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Sidur", "sidur"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("sidur.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS clients(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        contact TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS projects(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        client_id INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'open',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(client_id) REFERENCES clients(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS workers(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS worker_rates(
        worker_id TEXT PRIMARY KEY,
        rate TEXT NOT NULL,
        FOREIGN KEY(worker_id) REFERENCES workers(id) ON DELETE CASCADE
    );

    -- Assignments carry denormalized project/client names so a schedule
    -- row stays displayable even after the project record changes.
    -- UNIQUE(worker_id, project_id, date) makes duplicate scheduling a
    -- store-level conflict rather than an advisory check.
    CREATE TABLE IF NOT EXISTS work_assignments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        worker_id TEXT NOT NULL,
        project_id INTEGER NOT NULL,
        project_name TEXT NOT NULL,
        client_id INTEGER,
        client_name TEXT,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(worker_id, project_id, date)
    );
    CREATE INDEX IF NOT EXISTS idx_work_assignments_date ON work_assignments(date);
    CREATE INDEX IF NOT EXISTS idx_work_assignments_worker ON work_assignments(worker_id);
    "#,
    )?;
    Ok(())
}

pub fn load_assignments(conn: &Connection) -> Result<Vec<WorkAssignment>> {
    let mut stmt = conn.prepare(
        "SELECT id, worker_id, project_id, project_name, client_id, client_name, date
         FROM work_assignments ORDER BY date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let date_s: String = r.get(6)?;
        out.push(WorkAssignment {
            id: r.get(0)?,
            worker_id: r.get(1)?,
            project_id: r.get(2)?,
            project_name: r.get(3)?,
            client_id: r.get(4)?,
            client_name: r.get(5)?,
            date: crate::utils::parse_date(&date_s)?,
        });
    }
    Ok(out)
}

pub fn load_rates(conn: &Connection) -> Result<DailyRateTable> {
    let mut stmt = conn.prepare("SELECT worker_id, rate FROM worker_rates")?;
    let mut rows = stmt.query([])?;
    let mut out = DailyRateTable::new();
    while let Some(r) = rows.next()? {
        let worker_id: String = r.get(0)?;
        let rate_s: String = r.get(1)?;
        let rate = rate_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid rate '{}' for worker {}", rate_s, worker_id))?;
        out.insert(worker_id, rate);
    }
    Ok(out)
}

/// Load assignments and rates together. The allocation engine is defined
/// only over a matched pair, so callers take one snapshot instead of two
/// independent reads.
pub fn load_snapshot(conn: &Connection) -> Result<Snapshot> {
    Ok(Snapshot {
        assignments: load_assignments(conn)?,
        rates: load_rates(conn)?,
    })
}
