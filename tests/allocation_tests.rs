// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sidur::allocation::{
    allocation_for_worker_on_date, allocation_share, expense_breakdown_for_project,
    expense_for_project, total_days_for_worker, total_expense_for_worker,
};
use sidur::models::{DailyRateTable, WorkAssignment};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn asg(id: i64, worker: &str, project_id: i64, project_name: &str, date: &str) -> WorkAssignment {
    WorkAssignment {
        id,
        worker_id: worker.to_string(),
        project_id,
        project_name: project_name.to_string(),
        client_id: None,
        client_name: None,
        date: d(date),
    }
}

fn rates(pairs: &[(&str, i64)]) -> DailyRateTable {
    pairs
        .iter()
        .map(|(w, r)| (w.to_string(), Decimal::from(*r)))
        .collect()
}

#[test]
fn single_project_single_day() {
    let assignments = vec![asg(1, "w1", 1, "p1", "2024-01-15")];
    let rates = rates(&[("w1", 500)]);

    assert_eq!(total_days_for_worker(&assignments, "w1"), 1);
    assert_eq!(
        total_expense_for_worker(&assignments, &rates, "w1"),
        Decimal::from(500)
    );
    assert_eq!(
        expense_for_project(&assignments, &rates, 1),
        Decimal::from(500)
    );
}

#[test]
fn split_day_between_two_projects() {
    let assignments = vec![
        asg(1, "w1", 1, "p1", "2024-01-15"),
        asg(2, "w1", 2, "p2", "2024-01-15"),
    ];
    let rates = rates(&[("w1", 500)]);

    let shares = allocation_for_worker_on_date(&assignments, "w1", d("2024-01-15"));
    assert_eq!(shares.len(), 2);
    let half = Decimal::ONE / Decimal::from(2);
    assert_eq!(shares[0].project_id, 1);
    assert_eq!(shares[0].share, half);
    assert_eq!(shares[0].share_percent, 50);
    assert_eq!(shares[1].project_id, 2);
    assert_eq!(shares[1].share, half);
    assert_eq!(shares[1].share_percent, 50);

    assert_eq!(total_days_for_worker(&assignments, "w1"), 1);
    assert_eq!(
        expense_for_project(&assignments, &rates, 1),
        Decimal::from(250)
    );
    assert_eq!(
        expense_for_project(&assignments, &rates, 2),
        Decimal::from(250)
    );
}

#[test]
fn multi_day_accumulation() {
    let assignments = vec![
        asg(1, "w1", 1, "p1", "2024-01-15"),
        asg(2, "w1", 1, "p1", "2024-01-16"),
    ];
    let rates = rates(&[("w1", 500)]);

    assert_eq!(total_days_for_worker(&assignments, "w1"), 2);
    assert_eq!(
        expense_for_project(&assignments, &rates, 1),
        Decimal::from(1000)
    );
}

#[test]
fn three_way_split_plus_solo_day() {
    let assignments = vec![
        asg(1, "w1", 1, "p1", "2024-02-01"),
        asg(2, "w1", 2, "p2", "2024-02-01"),
        asg(3, "w1", 3, "p3", "2024-02-01"),
        asg(4, "w1", 1, "p1", "2024-02-02"),
    ];
    let rates = rates(&[("w1", 300)]);

    assert_eq!(total_days_for_worker(&assignments, "w1"), 2);
    assert_eq!(
        total_expense_for_worker(&assignments, &rates, "w1"),
        Decimal::from(600)
    );
    // 100 from the three-way day plus a full 300 solo day
    let p1 = expense_for_project(&assignments, &rates, 1);
    assert_eq!(p1.round_dp(2), Decimal::from(400).round_dp(2));
    let p2 = expense_for_project(&assignments, &rates, 2);
    assert_eq!(p2.round_dp(2), Decimal::from(100).round_dp(2));
}

#[test]
fn shares_sum_to_one() {
    let assignments = vec![
        asg(1, "w1", 1, "p1", "2024-03-01"),
        asg(2, "w1", 2, "p2", "2024-03-01"),
        asg(3, "w1", 3, "p3", "2024-03-01"),
    ];
    let shares = allocation_for_worker_on_date(&assignments, "w1", d("2024-03-01"));
    let sum: Decimal = shares.iter().map(|s| s.share).sum();
    let tolerance = Decimal::from_str_exact("0.000000001").unwrap();
    assert!((Decimal::ONE - sum).abs() < tolerance, "sum was {}", sum);
}

#[test]
fn no_assignments_means_empty_allocation_and_zero_days() {
    let assignments = vec![asg(1, "w1", 1, "p1", "2024-01-15")];
    assert!(allocation_for_worker_on_date(&assignments, "w2", d("2024-01-15")).is_empty());
    assert!(allocation_for_worker_on_date(&assignments, "w1", d("2024-01-16")).is_empty());
    assert_eq!(total_days_for_worker(&assignments, "w2"), 0);
    assert_eq!(total_days_for_worker(&[], "w1"), 0);
}

#[test]
fn same_day_fanout_counts_one_day() {
    let assignments = vec![
        asg(1, "w1", 1, "p1", "2024-01-15"),
        asg(2, "w1", 2, "p2", "2024-01-15"),
        asg(3, "w1", 3, "p3", "2024-01-15"),
    ];
    assert_eq!(total_days_for_worker(&assignments, "w1"), 1);
}

#[test]
fn breakdown_total_matches_project_expense() {
    let assignments = vec![
        asg(1, "w1", 1, "p1", "2024-02-01"),
        asg(2, "w1", 2, "p2", "2024-02-01"),
        asg(3, "w1", 3, "p3", "2024-02-01"),
        asg(4, "w1", 1, "p1", "2024-02-02"),
        asg(5, "w2", 1, "p1", "2024-02-02"),
        asg(6, "w2", 2, "p2", "2024-02-02"),
    ];
    let rates = rates(&[("w1", 300), ("w2", 450)]);

    for project_id in [1, 2, 3] {
        let flat = expense_for_project(&assignments, &rates, project_id);
        let detailed = expense_breakdown_for_project(&assignments, &rates, project_id);
        assert_eq!(flat, detailed.total, "project {}", project_id);
    }
}

#[test]
fn breakdown_is_grouped_and_ordered_by_worker() {
    let assignments = vec![
        asg(1, "w2", 1, "p1", "2024-02-02"),
        asg(2, "w1", 1, "p1", "2024-02-01"),
        asg(3, "w1", 1, "p1", "2024-02-02"),
    ];
    let rates = rates(&[("w1", 300), ("w2", 450)]);

    let report = expense_breakdown_for_project(&assignments, &rates, 1);
    let ids: Vec<&str> = report.breakdown.iter().map(|w| w.worker_id.as_str()).collect();
    assert_eq!(ids, vec!["w1", "w2"]);

    let w1 = &report.breakdown[0];
    assert_eq!(w1.allocations.len(), 2);
    assert_eq!(w1.allocations[0].date, d("2024-02-01"));
    assert_eq!(w1.allocations[1].date, d("2024-02-02"));
    assert_eq!(w1.total_days_allocated, Decimal::from(2));
    assert_eq!(w1.cost, Decimal::from(600));
}

#[test]
fn missing_rate_defaults_to_zero() {
    let assignments = vec![asg(1, "w1", 1, "p1", "2024-01-15")];
    let rates = DailyRateTable::new();

    assert_eq!(
        total_expense_for_worker(&assignments, &rates, "w1"),
        Decimal::ZERO
    );
    assert_eq!(expense_for_project(&assignments, &rates, 1), Decimal::ZERO);
}

#[test]
fn duplicate_triple_collapses_to_one_share() {
    // A violated store invariant must not dilute the other project's slice.
    let assignments = vec![
        asg(1, "w1", 1, "p1", "2024-01-15"),
        asg(2, "w1", 1, "p1", "2024-01-15"),
        asg(3, "w1", 2, "p2", "2024-01-15"),
    ];
    let rates = rates(&[("w1", 500)]);

    let shares = allocation_for_worker_on_date(&assignments, "w1", d("2024-01-15"));
    assert_eq!(shares.len(), 2);
    let half = Decimal::ONE / Decimal::from(2);
    assert!(shares.iter().all(|s| s.share == half));
    assert_eq!(
        expense_for_project(&assignments, &rates, 2),
        Decimal::from(250)
    );
}

#[test]
fn allocation_share_is_zero_for_unassigned_project() {
    let assignments = vec![asg(1, "w1", 1, "p1", "2024-01-15")];
    assert_eq!(
        allocation_share(&assignments, "w1", 99, d("2024-01-15")),
        Decimal::ZERO
    );
}

#[test]
fn aggregation_is_pure_and_repeatable() {
    let assignments = vec![
        asg(1, "w1", 1, "p1", "2024-02-01"),
        asg(2, "w1", 2, "p2", "2024-02-01"),
        asg(3, "w2", 1, "p1", "2024-02-03"),
    ];
    let rates = rates(&[("w1", 300), ("w2", 450)]);
    let before = assignments.clone();

    let first = expense_breakdown_for_project(&assignments, &rates, 1);
    let second = expense_breakdown_for_project(&assignments, &rates, 1);
    assert_eq!(first, second);
    assert_eq!(
        expense_for_project(&assignments, &rates, 1),
        expense_for_project(&assignments, &rates, 1)
    );

    // Inputs are untouched
    assert_eq!(assignments.len(), before.len());
    for (a, b) in assignments.iter().zip(before.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.date, b.date);
    }
}
