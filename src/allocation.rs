// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Worker-day allocation and cost aggregation.
//!
//! A worker's calendar day is a unit: when the schedule puts the worker on
//! N projects the same day, each project receives a 1/N slice of the day and
//! of the worker's daily rate. These functions are pure; they take an
//! assignment snapshot plus a rate table and never touch the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{DailyRateTable, WorkAssignment};

/// One project's slice of a worker's day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectShare {
    pub project_id: i64,
    pub project_name: String,
    /// Fraction of the day, in (0, 1]. All money math uses this value.
    pub share: Decimal,
    /// Rounded display percent. Never an input to further computation.
    pub share_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateAllocation {
    pub date: NaiveDate,
    pub share: Decimal,
    pub share_percent: u32,
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerBreakdown {
    pub worker_id: String,
    /// Fractional day count across all dates, e.g. 1.5 for a full day plus
    /// a half day.
    pub total_days_allocated: Decimal,
    pub allocations: Vec<DateAllocation>,
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectExpenseBreakdown {
    pub total: Decimal,
    pub breakdown: Vec<WorkerBreakdown>,
}

fn percent(share: Decimal) -> u32 {
    (share * Decimal::from(100)).round().to_u32().unwrap_or(0)
}

/// Distinct projects a worker is scheduled on for one date, keyed by project
/// id. Duplicate (worker, project, date) rows collapse here, so a violated
/// store invariant widens no denominator.
fn distinct_projects_on<'a>(
    assignments: &'a [WorkAssignment],
    worker_id: &str,
    date: NaiveDate,
) -> BTreeMap<i64, &'a str> {
    assignments
        .iter()
        .filter(|a| a.worker_id == worker_id && a.date == date)
        .map(|a| (a.project_id, a.project_name.as_str()))
        .collect()
}

/// How a worker's day splits across the projects assigned for that date.
///
/// Empty when the worker has no assignments that day. Otherwise every
/// project gets an equal 1/N share and the shares sum to one. Output is
/// ordered by project id, so a fixed input always yields the same result.
pub fn allocation_for_worker_on_date(
    assignments: &[WorkAssignment],
    worker_id: &str,
    date: NaiveDate,
) -> Vec<ProjectShare> {
    let projects = distinct_projects_on(assignments, worker_id, date);
    let n = projects.len();
    if n == 0 {
        return Vec::new();
    }
    let share = Decimal::ONE / Decimal::from(n as u64);
    projects
        .into_iter()
        .map(|(project_id, project_name)| ProjectShare {
            project_id,
            project_name: project_name.to_string(),
            share,
            share_percent: percent(share),
        })
        .collect()
}

/// The slice of a worker's day that one specific project received.
///
/// Zero when the worker is not on that project that day.
pub fn allocation_share(
    assignments: &[WorkAssignment],
    worker_id: &str,
    project_id: i64,
    date: NaiveDate,
) -> Decimal {
    let projects = distinct_projects_on(assignments, worker_id, date);
    if !projects.contains_key(&project_id) {
        return Decimal::ZERO;
    }
    Decimal::ONE / Decimal::from(projects.len() as u64)
}

/// Number of distinct dates on which the worker has at least one assignment.
///
/// A day is consumed once no matter how many projects share it: three
/// same-day assignments still count as one day.
pub fn total_days_for_worker(assignments: &[WorkAssignment], worker_id: &str) -> u64 {
    let dates: BTreeSet<NaiveDate> = assignments
        .iter()
        .filter(|a| a.worker_id == worker_id)
        .map(|a| a.date)
        .collect();
    dates.len() as u64
}

pub fn daily_rate(rates: &DailyRateTable, worker_id: &str) -> Decimal {
    rates.get(worker_id).copied().unwrap_or(Decimal::ZERO)
}

/// Total pay owed to a worker: daily rate times distinct scheduled days.
pub fn total_expense_for_worker(
    assignments: &[WorkAssignment],
    rates: &DailyRateTable,
    worker_id: &str,
) -> Decimal {
    daily_rate(rates, worker_id) * Decimal::from(total_days_for_worker(assignments, worker_id))
}

/// Labor cost charged to one project: each (worker, date) pair on the
/// project contributes that worker's rate scaled by the slice the project
/// received of that day.
pub fn expense_for_project(
    assignments: &[WorkAssignment],
    rates: &DailyRateTable,
    project_id: i64,
) -> Decimal {
    let pairs: BTreeSet<(&str, NaiveDate)> = assignments
        .iter()
        .filter(|a| a.project_id == project_id)
        .map(|a| (a.worker_id.as_str(), a.date))
        .collect();
    pairs
        .iter()
        .map(|(worker_id, date)| {
            daily_rate(rates, worker_id)
                * allocation_share(assignments, worker_id, project_id, *date)
        })
        .sum()
}

/// Itemized labor cost for one project, grouped by worker and date.
///
/// `total` equals [`expense_for_project`] for the same inputs; the breakdown
/// is the same products arranged for display. Workers sort by id and dates
/// ascend, so the output is stable for a fixed snapshot.
pub fn expense_breakdown_for_project(
    assignments: &[WorkAssignment],
    rates: &DailyRateTable,
    project_id: i64,
) -> ProjectExpenseBreakdown {
    let mut by_worker: BTreeMap<&str, BTreeSet<NaiveDate>> = BTreeMap::new();
    for a in assignments.iter().filter(|a| a.project_id == project_id) {
        by_worker.entry(a.worker_id.as_str()).or_default().insert(a.date);
    }

    let mut total = Decimal::ZERO;
    let mut breakdown = Vec::with_capacity(by_worker.len());
    for (worker_id, dates) in by_worker {
        let rate = daily_rate(rates, worker_id);
        let mut total_days_allocated = Decimal::ZERO;
        let mut cost = Decimal::ZERO;
        let mut allocations = Vec::with_capacity(dates.len());
        for date in dates {
            let share = allocation_share(assignments, worker_id, project_id, date);
            let day_cost = rate * share;
            total_days_allocated += share;
            cost += day_cost;
            allocations.push(DateAllocation {
                date,
                share,
                share_percent: percent(share),
                cost: day_cost,
            });
        }
        total += cost;
        breakdown.push(WorkerBreakdown {
            worker_id: worker_id.to_string(),
            total_days_allocated,
            allocations,
            cost,
        });
    }

    ProjectExpenseBreakdown { total, breakdown }
}
