// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::analytics::percent_of;
use crate::models::{NetWorthSnapshot, SnapshotAccountInput, SnapshotInput};
use crate::utils::parse_decimal;

/// Headline figures for the net-worth view. Snapshots are taken in the order
/// the backend returns them (oldest first).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Growth {
    pub current: Decimal,
    pub first: Decimal,
    pub change: Decimal,
    /// Percent change since the first snapshot, one decimal place. Zero when
    /// the first total is not positive.
    pub percent: Decimal,
    pub last_updated: Option<NaiveDate>,
}

pub fn growth(snapshots: &[NetWorthSnapshot]) -> Growth {
    let current = snapshots.last().map(|s| s.total()).unwrap_or(Decimal::ZERO);
    let first = snapshots.first().map(|s| s.total()).unwrap_or(Decimal::ZERO);
    let change = current.saturating_sub(first);
    let percent = percent_of(change, first);
    Growth {
        current,
        first,
        change,
        percent,
        last_updated: snapshots.last().map(|s| s.date),
    }
}

/// Every account name seen in any snapshot, first appearance first.
pub fn account_names(snapshots: &[NetWorthSnapshot]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for acc in snapshots.iter().flat_map(|s| s.accounts.iter()) {
        if !out.contains(&acc.name) {
            out.push(acc.name.clone());
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub date: NaiveDate,
    /// One cell per entry of `AccountBreakdown::accounts`; `None` when the
    /// snapshot does not list that account.
    pub cells: Vec<Option<Decimal>>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountBreakdown {
    pub accounts: Vec<String>,
    pub rows: Vec<BreakdownRow>,
}

pub fn account_breakdown(snapshots: &[NetWorthSnapshot]) -> AccountBreakdown {
    let accounts = account_names(snapshots);
    let rows = snapshots
        .iter()
        .map(|s| BreakdownRow {
            date: s.date,
            cells: accounts
                .iter()
                .map(|n| s.accounts.iter().find(|a| &a.name == n).map(|a| a.amount))
                .collect(),
            total: s.total(),
        })
        .collect();
    AccountBreakdown { accounts, rows }
}

/// Parses `NAME=AMOUNT` pairs into a full snapshot body.
pub fn snapshot_input(date: NaiveDate, pairs: &[String]) -> Result<SnapshotInput> {
    if pairs.is_empty() {
        return Err(anyhow!("A snapshot needs at least one account"));
    }
    let mut accounts = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let (name, amount) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid account '{}', expected NAME=AMOUNT", pair))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("Invalid account '{}', name is empty", pair));
        }
        accounts.push(SnapshotAccountInput {
            account_name: name.to_string(),
            amount: parse_decimal(amount.trim())?,
        });
    }
    Ok(SnapshotInput { date, accounts })
}
