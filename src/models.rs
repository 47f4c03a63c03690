// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client_id: i64,
    pub client_name: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: String,
}

/// One worker assigned to one project on one calendar day.
///
/// `(worker_id, project_id, date)` is unique in the store. Project and client
/// fields are denormalized at assignment time for display; the allocation
/// engine keys only on worker, project, and date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkAssignment {
    pub id: i64,
    pub worker_id: String,
    pub project_id: i64,
    pub project_name: String,
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub date: NaiveDate,
}

/// Daily pay per worker id. Workers absent from the table cost zero.
pub type DailyRateTable = BTreeMap<String, Decimal>;

/// Assignments and rates loaded together so the engine always computes over
/// a matched pair, never over two reads taken at different times.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub assignments: Vec<WorkAssignment>,
    pub rates: DailyRateTable,
}
