// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use sidur::{cli, commands::exporter};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(r#"
        CREATE TABLE workers(id TEXT PRIMARY KEY, name TEXT NOT NULL UNIQUE);
        CREATE TABLE work_assignments(id INTEGER PRIMARY KEY AUTOINCREMENT, worker_id TEXT NOT NULL, project_id INTEGER NOT NULL, project_name TEXT NOT NULL, client_id INTEGER, client_name TEXT, date TEXT NOT NULL, UNIQUE(worker_id, project_id, date));
    "#).unwrap();
    conn.execute("INSERT INTO workers(id, name) VALUES('a', 'Yasser')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO work_assignments(worker_id, project_id, project_name, client_name, date)
         VALUES('a', 1, 'Street Lighting', 'Iriya Municipality', '2024-01-15')",
        [],
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, fmt: &str, out: &str) {
    let matches = cli::build_cli().get_matches_from([
        "sidur",
        "export",
        "assignments",
        "--format",
        fmt,
        "--out",
        out,
    ]);
    if let Some(("export", m)) = matches.subcommand() {
        exporter::handle(conn, m).unwrap();
    } else {
        panic!("export command not parsed");
    }
}

#[test]
fn export_assignments_csv() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assignments.csv");
    run_export(&conn, "csv", path.to_str().unwrap());

    let body = std::fs::read_to_string(&path).unwrap();
    let mut lines = body.lines();
    assert_eq!(lines.next().unwrap(), "date,worker_id,worker,project,client");
    assert_eq!(
        lines.next().unwrap(),
        "2024-01-15,a,Yasser,Street Lighting,Iriya Municipality"
    );
    assert!(lines.next().is_none());
}

#[test]
fn export_assignments_json() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assignments.json");
    run_export(&conn, "json", path.to_str().unwrap());

    let body = std::fs::read_to_string(&path).unwrap();
    let items: serde_json::Value = serde_json::from_str(&body).unwrap();
    let arr = items.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["worker"], "Yasser");
    assert_eq!(arr[0]["project"], "Street Lighting");
    assert_eq!(arr[0]["date"], "2024-01-15");
}
