// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

use super::{year_or_current, Ctx};
use crate::client::IncomeYear;
use crate::dashboard::overview;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = year_or_current(sub)?;

    let incomes = ctx
        .client
        .incomes(IncomeYear::All)
        .map_err(|e| anyhow!("Could not load income: {}", e.user_message()))?;
    let snapshots = ctx
        .client
        .net_worth_all()
        .map_err(|e| anyhow!("Could not load net worth: {}", e.user_message()))?;
    let transactions = ctx
        .client
        .transactions(year)
        .map_err(|e| anyhow!("Could not load transactions: {}", e.user_message()))?;

    let o = overview(&incomes.year_incomes, &snapshots, &transactions);
    if maybe_print_json(json_flag, jsonl_flag, &o)? {
        return Ok(());
    }

    let arrow = if o.net_worth_change >= Decimal::ZERO { "+" } else { "" };
    println!(
        "{}",
        pretty_table(
            &["Total Income", "Net Worth", "Change", "Expenses"],
            vec![vec![
                format!("{} ({} entries)", fmt_money(&o.total_income), o.income_entries),
                fmt_money(&o.net_worth),
                format!("{}{}% from last snapshot", arrow, o.net_worth_change_percent),
                format!("{} ({} in {})", fmt_money(&o.total_expenses), o.transaction_count, year),
            ]],
        )
    );
    if !o.recent.is_empty() {
        println!("Recent transactions");
        let rows = o
            .recent
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.company.name.clone(),
                    t.category.name.clone(),
                    fmt_money(&t.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Company", "Category", "Amount"], rows));
    }
    Ok(())
}
