// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

use super::Ctx;
use crate::analytics::sum_amounts;
use crate::models::NetWorthSnapshot;
use crate::networth::{account_breakdown, growth, snapshot_input};
use crate::utils::{align_amounts, fmt_money, maybe_print_json, parse_date, pretty_table};

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("rm", sub)) => remove(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn fetch(ctx: &Ctx) -> Result<Vec<NetWorthSnapshot>> {
    ctx.client
        .net_worth_all()
        .map_err(|e| anyhow!("Could not load net worth: {}", e.user_message()))
}

fn accounts(sub: &clap::ArgMatches) -> Vec<String> {
    sub.get_many::<String>("account")
        .map(|v| v.cloned().collect())
        .unwrap_or_default()
}

fn list(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let snapshots = fetch(ctx)?;
    if maybe_print_json(json_flag, jsonl_flag, &snapshots)? {
        return Ok(());
    }
    if snapshots.is_empty() {
        println!("No snapshots yet");
        return Ok(());
    }

    let g = growth(&snapshots);
    let sign = if g.percent >= Decimal::ZERO { "+" } else { "" };
    println!("Current net worth: {}", fmt_money(&g.current));
    println!(
        "Total growth: {} ({}{}%)",
        fmt_money(&g.change),
        sign,
        g.percent
    );
    if let Some(d) = g.last_updated {
        println!("Last updated: {}", d.format("%B %-d, %Y"));
    }

    let b = account_breakdown(&snapshots);
    let mut headers: Vec<&str> = vec!["Date"];
    headers.extend(b.accounts.iter().map(String::as_str));
    headers.push("Total");
    let rows = b
        .rows
        .iter()
        .map(|r| {
            let mut cells = vec![r.date.to_string()];
            cells.extend(
                r.cells
                    .iter()
                    .map(|c| c.map(|v| fmt_money(&v)).unwrap_or_else(|| "-".to_string())),
            );
            cells.push(fmt_money(&r.total));
            cells
        })
        .collect();
    let mut t = pretty_table(&headers, rows);
    align_amounts(&mut t, 1);
    println!("{}", t);
    Ok(())
}

fn add(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").ok_or_else(|| anyhow!("--date is required"))?)?;
    let input = snapshot_input(date, &accounts(sub))?;
    ctx.client
        .create_snapshot(&input)
        .map_err(|e| anyhow!("Could not save snapshot: {}", e.user_message()))?;
    let snapshots = fetch(ctx)?;
    let total = sum_amounts(input.accounts.iter().map(|a| a.amount));
    println!(
        "Saved snapshot for {} totalling {} ({} snapshots)",
        date,
        fmt_money(&total),
        snapshots.len()
    );
    Ok(())
}

fn edit(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let key = parse_date(sub.get_one::<String>("date").ok_or_else(|| anyhow!("date is required"))?)?;
    let new_date = match sub.get_one::<String>("new-date") {
        Some(d) => parse_date(d)?,
        None => key,
    };
    // Editing re-sends the whole account list.
    let input = snapshot_input(new_date, &accounts(sub))?;
    ctx.client
        .update_snapshot(&key.to_string(), &input)
        .map_err(|e| anyhow!("Could not update snapshot: {}", e.user_message()))?;
    let snapshots = fetch(ctx)?;
    println!(
        "Replaced snapshot {} with {} accounts ({} snapshots)",
        key,
        input.accounts.len(),
        snapshots.len()
    );
    Ok(())
}

fn remove(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let key = parse_date(sub.get_one::<String>("date").ok_or_else(|| anyhow!("date is required"))?)?;
    ctx.client
        .delete_snapshot(&key.to_string())
        .map_err(|e| anyhow!("Could not delete snapshot: {}", e.user_message()))?;
    let snapshots = fetch(ctx)?;
    println!("Deleted snapshot {} ({} left)", key, snapshots.len());
    Ok(())
}
