// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use rust_decimal::Decimal;

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber once. Output goes to stderr so that
/// `--json` output on stdout stays machine-readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("spendlens=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_year(s: &str) -> Result<i32> {
    let y: i32 = s
        .parse()
        .with_context(|| format!("Invalid year '{}', expected YYYY", s))?;
    if !(1000..=9999).contains(&y) {
        return Err(anyhow::anyhow!("Invalid year '{}', expected YYYY", s));
    }
    Ok(y)
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn current_year() -> i32 {
    chrono::Local::now().date_naive().year()
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("${:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Right-aligns every column from `from` onwards (amount columns).
pub fn align_amounts(t: &mut Table, from: usize) {
    for col in t.column_iter_mut().skip(from) {
        col.set_cell_alignment(CellAlignment::Right);
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
