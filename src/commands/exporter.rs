// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use anyhow::{anyhow, Result};

use super::{year_or_current, Ctx};
use crate::analytics::{filter_table, BreakdownTable, CategoryFilter, TableFilter};
use crate::models::Transaction;
use crate::state::TransactionsState;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ctx, sub),
        Some(("breakdown", sub)) => export_breakdown(ctx, sub),
        _ => Ok(()),
    }
}

fn fetch(ctx: &Ctx, year: i32) -> Result<TransactionsState> {
    let state = super::transactions::load(
        TransactionsState::new(year, ctx.settings.page_size),
        &ctx.client,
    );
    if let Some(msg) = &state.error {
        return Err(anyhow!("Could not load transactions: {}", msg));
    }
    Ok(state)
}

fn export_transactions(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub
        .get_one::<String>("out")
        .ok_or_else(|| anyhow!("--out is required"))?;
    let filter = TableFilter {
        search: sub.get_one::<String>("search").cloned().unwrap_or_default(),
        category: CategoryFilter::parse(
            sub.get_one::<String>("category").map(String::as_str).unwrap_or("all"),
        ),
    };

    let state = fetch(ctx, year_or_current(sub)?)?;
    let rows = filter_table(&state.records, &filter);

    let file = std::fs::File::create(out)?;
    match fmt.as_str() {
        "csv" => write_transactions_csv(file, &rows)?,
        "json" => serde_json::to_writer_pretty(file, &rows)?,
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

pub fn write_transactions_csv<W: Write>(w: W, rows: &[&Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record([
        "id", "date", "company", "category", "item", "payment_type", "amount",
    ])?;
    for t in rows {
        wtr.write_record([
            t.id.clone(),
            t.date.to_string(),
            t.company.name.clone(),
            t.category.name.clone(),
            t.item.clone(),
            t.payment_type.clone(),
            format!("{:.2}", t.amount),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_breakdown(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub
        .get_one::<String>("out")
        .ok_or_else(|| anyhow!("--out is required"))?;
    let year = year_or_current(sub)?;
    let report = fetch(ctx, year)?.analytics();
    let file = std::fs::File::create(out)?;
    write_breakdown_csv(file, &report.breakdown)?;
    println!(
        "Exported {} categories x {} months to {}",
        report.breakdown.rows.len(),
        report.breakdown.months.len(),
        out
    );
    Ok(())
}

/// One row per category, one column per `YYYY-MM`, then the row total.
pub fn write_breakdown_csv<W: Write>(w: W, table: &BreakdownTable) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    let mut header = vec!["category".to_string()];
    header.extend(table.months.iter().cloned());
    header.push("total".to_string());
    wtr.write_record(&header)?;
    for row in &table.rows {
        let mut rec = vec![row.category.clone()];
        rec.extend(row.cells.iter().map(|v| format!("{:.2}", v)));
        rec.push(format!("{:.2}", row.total));
        wtr.write_record(&rec)?;
    }
    wtr.flush()?;
    Ok(())
}
