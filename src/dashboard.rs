// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::analytics::{percent_of, sum_amounts};
use crate::models::{Income, NetWorthSnapshot, Transaction};

pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_income: Decimal,
    pub income_entries: usize,
    pub total_expenses: Decimal,
    pub transaction_count: usize,
    pub net_worth: Decimal,
    /// Change against the second-to-last snapshot.
    pub net_worth_change: Decimal,
    pub net_worth_change_percent: Decimal,
    pub recent: Vec<Transaction>,
}

pub fn overview(
    incomes: &[Income],
    snapshots: &[NetWorthSnapshot],
    transactions: &[Transaction],
) -> Overview {
    let current = snapshots
        .last()
        .map(|s| s.total())
        .unwrap_or(Decimal::ZERO);
    let previous = if snapshots.len() > 1 {
        snapshots[snapshots.len() - 2].total()
    } else {
        Decimal::ZERO
    };
    let change = current.saturating_sub(previous);
    let change_percent = percent_of(change, previous);

    Overview {
        total_income: sum_amounts(incomes.iter().map(|i| i.amount)),
        income_entries: incomes.len(),
        total_expenses: sum_amounts(transactions.iter().map(|t| t.amount)),
        transaction_count: transactions.len(),
        net_worth: current,
        net_worth_change: change,
        net_worth_change_percent: change_percent,
        recent: transactions.iter().take(RECENT_LIMIT).cloned().collect(),
    }
}
