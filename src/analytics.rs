// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side spending analytics.
//!
//! Every function here is a pure reduction over an already-fetched slice of
//! transactions. Nothing can fail: empty input gives empty or zero output.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;

/// Name reported as the top category when there are no categories at all.
pub const NO_CATEGORY: &str = "none";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` (any case) or an empty string selects every category.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => name == category,
        }
    }
}

/// Filters applied to the transaction table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableFilter {
    pub search: String,
    pub category: CategoryFilter,
}

impl TableFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        let matches_search = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            t.company.name.to_lowercase().contains(&needle)
                || t.item.to_lowercase().contains(&needle)
        };
        matches_search && self.category.matches(&t.category.name)
    }
}

/// Records passing `filter`, in source order.
pub fn filter_table<'a>(records: &'a [Transaction], filter: &TableFilter) -> Vec<&'a Transaction> {
    records.iter().filter(|t| filter.matches(t)).collect()
}

/// Records dated within `year`, in source order.
pub fn filter_year(records: &[Transaction], year: i32) -> Vec<&Transaction> {
    records.iter().filter(|t| t.date.year() == year).collect()
}

/// Distinct category names in order of first appearance.
pub fn categories<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out: Vec<String> = Vec::new();
    for t in records {
        if !out.contains(&t.category.name) {
            out.push(t.category.name.clone());
        }
    }
    out
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// `2025-01` -> `Jan 2025`. Keys that do not parse are returned unchanged.
pub fn month_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| key.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: Decimal,
}

/// Sum that saturates at `Decimal::MAX`/`MIN` instead of panicking.
pub fn sum_amounts<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// `part / whole * 100` to one decimal place; zero when `whole` is not
/// positive or the ratio does not fit.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .map(|p| p.round_dp(1))
        .unwrap_or(Decimal::ZERO)
}

pub fn category_totals(records: &[&Transaction]) -> Vec<CategoryTotal> {
    let mut out: Vec<CategoryTotal> = Vec::new();
    for t in records {
        match out.iter_mut().find(|c| c.name == t.category.name) {
            Some(c) => c.value = c.value.saturating_add(t.amount),
            None => out.push(CategoryTotal {
                name: t.category.name.clone(),
                value: t.amount,
            }),
        }
    }
    out
}

/// One month of the month x category matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow {
    pub month_key: String,
    pub label: String,
    /// Per-category sums for this month, in category first-appearance order.
    pub values: Vec<(String, Decimal)>,
    pub total: Decimal,
}

impl MonthRow {
    pub fn value(&self, category: &str) -> Decimal {
        self.values
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, v)| *v)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Rows sorted ascending by month key.
pub fn monthly_matrix(records: &[&Transaction]) -> Vec<MonthRow> {
    let mut buckets: BTreeMap<String, Vec<(String, Decimal)>> = BTreeMap::new();
    for t in records {
        let row = buckets.entry(month_key(t.date)).or_default();
        match row.iter_mut().find(|(c, _)| *c == t.category.name) {
            Some((_, v)) => *v = v.saturating_add(t.amount),
            None => row.push((t.category.name.clone(), t.amount)),
        }
    }
    buckets
        .into_iter()
        .map(|(key, values)| MonthRow {
            label: month_label(&key),
            total: sum_amounts(values.iter().map(|(_, v)| *v)),
            month_key: key,
            values,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub category: String,
    /// One cell per entry of `BreakdownTable::months`.
    pub cells: Vec<Decimal>,
    pub total: Decimal,
}

/// Category x month view with per-category totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BreakdownTable {
    pub months: Vec<String>,
    pub rows: Vec<BreakdownRow>,
}

impl BreakdownTable {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty() || self.rows.is_empty()
    }

    /// Column totals, one per month.
    pub fn month_totals(&self) -> Vec<Decimal> {
        (0..self.months.len())
            .map(|i| sum_amounts(self.rows.iter().map(|r| r.cells[i])))
            .collect()
    }
}

pub fn breakdown_table(records: &[&Transaction]) -> BreakdownTable {
    let months: Vec<String> = records
        .iter()
        .map(|t| month_key(t.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows = categories(records.iter().copied())
        .into_iter()
        .map(|category| {
            let mut cells = vec![Decimal::ZERO; months.len()];
            for t in records.iter().filter(|t| t.category.name == category) {
                let key = month_key(t.date);
                if let Ok(i) = months.binary_search(&key) {
                    cells[i] = cells[i].saturating_add(t.amount);
                }
            }
            BreakdownRow {
                total: sum_amounts(cells.iter().copied()),
                category,
                cells,
            }
        })
        .collect();

    BreakdownTable { months, rows }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_spent: Decimal,
    pub count: usize,
    pub average: Decimal,
    pub top_category: CategoryTotal,
}

pub fn summary(records: &[&Transaction]) -> Summary {
    let total_spent = sum_amounts(records.iter().map(|t| t.amount));
    let count = records.len();
    let average = if count == 0 {
        Decimal::ZERO
    } else {
        total_spent / Decimal::from(count)
    };
    Summary {
        total_spent,
        count,
        average,
        top_category: top_category(&category_totals(records)),
    }
}

/// Largest total; the first one seen wins a tie.
pub fn top_category(totals: &[CategoryTotal]) -> CategoryTotal {
    let sentinel = CategoryTotal {
        name: NO_CATEGORY.to_string(),
        value: Decimal::ZERO,
    };
    totals.iter().fold(sentinel, |max, c| {
        if c.value > max.value { c.clone() } else { max }
    })
}

/// Distinct years present, newest first.
pub fn available_years(records: &[Transaction]) -> Vec<i32> {
    records
        .iter()
        .map(|t| t.date.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// Everything the analytics view shows for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analytics {
    pub year: i32,
    pub summary: Summary,
    pub category_totals: Vec<CategoryTotal>,
    pub monthly: Vec<MonthRow>,
    pub breakdown: BreakdownTable,
}

impl Analytics {
    pub fn compute(records: &[Transaction], year: i32) -> Self {
        let scoped = filter_year(records, year);
        Self {
            year,
            summary: summary(&scoped),
            category_totals: category_totals(&scoped),
            monthly: monthly_matrix(&scoped),
            breakdown: breakdown_table(&scoped),
        }
    }
}
