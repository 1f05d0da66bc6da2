// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use chrono::Datelike;
use rust_decimal::Decimal;

use super::Ctx;
use crate::client::{ApiClient, IncomeYear};
use crate::models::{Income, IncomeInput, IncomePage};
use crate::utils::{align_amounts, fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("rm", sub)) => remove(ctx, sub)?,
        Some(("years", sub)) => years(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn year_scope(sub: &clap::ArgMatches) -> Result<IncomeYear> {
    IncomeYear::parse(sub.get_one::<String>("year").map(String::as_str).unwrap_or("all"))
}

fn fetch(ctx: &Ctx, scope: IncomeYear) -> Result<IncomePage> {
    ctx.client
        .incomes(scope)
        .map_err(|e| anyhow!("Could not load income: {}", e.user_message()))
}

/// The headline figure: the year's total, or the all-time total for `all`.
pub fn headline_total(page: &IncomePage, scope: IncomeYear) -> Decimal {
    match scope {
        IncomeYear::All => page.all_time_total,
        IncomeYear::Year(_) => page.year_total,
    }
}

fn scope_label(scope: IncomeYear) -> String {
    match scope {
        IncomeYear::All => "all years".to_string(),
        IncomeYear::Year(y) => y.to_string(),
    }
}

fn list(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let scope = year_scope(sub)?;
    let page = fetch(ctx, scope)?;
    if maybe_print_json(json_flag, jsonl_flag, &page.year_incomes)? {
        return Ok(());
    }
    let rows = page
        .year_incomes
        .iter()
        .map(|i| {
            vec![
                i.date.format("%b %-d, %Y").to_string(),
                i.source.clone(),
                fmt_money(&i.amount),
                i.id.clone(),
            ]
        })
        .collect();
    let mut t = pretty_table(&["Date", "Source", "Amount", "ID"], rows);
    align_amounts(&mut t, 2);
    println!("{}", t);
    println!(
        "Total income ({}): {} across {} entries",
        scope_label(scope),
        fmt_money(&headline_total(&page, scope)),
        page.year_incomes.len()
    );
    Ok(())
}

fn add(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").ok_or_else(|| anyhow!("--date is required"))?)?;
    let source = sub
        .get_one::<String>("source")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("--source is required"))?;
    let amount = parse_decimal(sub.get_one::<String>("amount").ok_or_else(|| anyhow!("--amount is required"))?)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(anyhow!("Amount must not be negative"));
    }
    let input = IncomeInput {
        date,
        source,
        amount,
    };
    let (created, page) = record(&ctx.client, &input)?;
    println!(
        "Recorded income {} from '{}' on {} (id {}, {} entries in {})",
        fmt_money(&created.amount),
        created.source,
        created.date,
        created.id,
        page.year_incomes.len(),
        created.date.year()
    );
    Ok(())
}

/// Creates the entry, then re-fetches the year it was recorded in.
pub fn record(client: &ApiClient, input: &IncomeInput) -> Result<(Income, IncomePage)> {
    let created = client
        .create_income(input)
        .map_err(|e| anyhow!("Could not add income: {}", e.user_message()))?;
    let page = client
        .incomes(IncomeYear::Year(created.date.year()))
        .map_err(|e| anyhow!("Could not load income: {}", e.user_message()))?;
    Ok((created, page))
}

fn remove(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub
        .get_one::<String>("id")
        .ok_or_else(|| anyhow!("id is required"))?;
    let scope = year_scope(sub)?;
    ctx.client
        .delete_income(id)
        .map_err(|e| anyhow!("Could not delete income: {}", e.user_message()))?;
    let page = fetch(ctx, scope)?;
    println!(
        "Deleted income {} ({} entries left in {})",
        id,
        page.year_incomes.len(),
        scope_label(scope)
    );
    Ok(())
}

fn years(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let years = ctx
        .client
        .income_years()
        .map_err(|e| anyhow!("Could not load income years: {}", e.user_message()))?;
    if !maybe_print_json(json_flag, jsonl_flag, &years.years)? {
        let rows = years.years.iter().map(|y| vec![y.to_string()]).collect();
        println!("{}", pretty_table(&["Year"], rows));
    }
    Ok(())
}
