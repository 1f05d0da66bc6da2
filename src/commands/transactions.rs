// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

use super::{year_or_current, Ctx};
use crate::analytics::{available_years, Analytics, CategoryFilter};
use crate::client::ApiClient;
use crate::models::Transaction;
use crate::palette::{to_table_color, Palette};
use crate::state::{reduce, Action, FormField, TransactionsState};
use crate::utils::{align_amounts, fmt_money, maybe_print_json, pretty_table};

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("rm", sub)) => remove(ctx, sub)?,
        Some(("analytics", sub)) => analytics(ctx, sub)?,
        Some(("years", sub)) => years(ctx, sub)?,
        Some(("companies", sub)) => suggestions(ctx, sub, "Company")?,
        Some(("categories", sub)) => suggestions(ctx, sub, "Category")?,
        _ => {}
    }
    Ok(())
}

/// Builds the table view state (year, search, category, page) from `tx list` flags.
/// The page is applied after loading, once the row count is known.
pub fn state_from_matches(sub: &clap::ArgMatches, per_page: usize) -> Result<TransactionsState> {
    let year = year_or_current(sub)?;
    let mut state = TransactionsState::new(year, per_page);
    if let Some(s) = sub.get_one::<String>("search") {
        state = reduce(state, Action::SetSearch(s.clone()));
    }
    if let Some(c) = sub.get_one::<String>("category") {
        state = reduce(state, Action::SetCategory(CategoryFilter::parse(c)));
    }
    Ok(state)
}

/// Fetches the collection for `state.table_year` and replaces it wholesale.
/// A state that is not stale already holds that collection and is returned as is.
pub fn load(state: TransactionsState, client: &ApiClient) -> TransactionsState {
    if !state.stale {
        tracing::debug!(year = state.table_year, "collection is current, skipping fetch");
        return state;
    }
    let token = state.next_token();
    let state = reduce(state, Action::FetchStarted(token));
    match client.transactions(state.table_year) {
        Ok(records) => reduce(state, Action::Loaded { token, records }),
        Err(e) => reduce(
            state,
            Action::Failed {
                token,
                message: e.user_message(),
            },
        ),
    }
}

fn loaded(state: TransactionsState, client: &ApiClient) -> Result<TransactionsState> {
    let state = load(state, client);
    if let Some(msg) = &state.error {
        return Err(anyhow!("Could not load transactions: {}", msg));
    }
    Ok(state)
}

fn list(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let page = *sub.get_one::<usize>("page").unwrap_or(&1);

    let state = state_from_matches(sub, ctx.settings.page_size)?;
    let state = loaded(state, &ctx.client)?;
    let state = reduce(state, Action::GoToPage(page));

    let rows = state.page_rows();
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let mut palette = Palette::new();
        println!("{}", page_table(&rows, &mut palette));
        println!("{}", page_footer(&state));
    }
    Ok(())
}

pub fn page_table(rows: &[&Transaction], palette: &mut Palette) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(["Date", "Company", "Category", "Item", "Payment", "Amount", "ID"]);
    for r in rows {
        let color = to_table_color(palette.color_for(&r.category.name));
        t.add_row(vec![
            Cell::new(r.date.format("%b %-d, %Y")),
            Cell::new(&r.company.name),
            Cell::new(&r.category.name).fg(color),
            Cell::new(&r.item),
            Cell::new(&r.payment_type),
            Cell::new(fmt_money(&r.amount)),
            Cell::new(&r.id),
        ]);
    }
    t
}

pub fn page_footer(state: &TransactionsState) -> String {
    let len = state.table_rows().len();
    let total = state.pager.total_pages(len).max(1);
    let mut footer = format!(
        "Page {} of {} ({} of {} transactions in {})",
        state.pager.page,
        total,
        len,
        state.records.len(),
        state.table_year
    );
    if state.pager.has_prev() {
        footer.push_str(&format!("  prev: --page {}", state.pager.page - 1));
    }
    if state.pager.has_next(len) {
        footer.push_str(&format!("  next: --page {}", state.pager.page + 1));
    }
    footer
}

const FIELDS: [(&str, FormField); 6] = [
    ("company", FormField::Company),
    ("category", FormField::Category),
    ("item", FormField::Item),
    ("amount", FormField::Amount),
    ("payment-type", FormField::PaymentType),
    ("date", FormField::Date),
];

fn apply_fields(mut state: TransactionsState, sub: &clap::ArgMatches) -> TransactionsState {
    for (arg, field) in FIELDS {
        if let Some(v) = sub.get_one::<String>(arg) {
            state = reduce(state, Action::EditField(field, v.clone()));
        }
    }
    state
}

fn add(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let state = reduce(
        TransactionsState::new(crate::utils::current_year(), ctx.settings.page_size),
        Action::ToggleForm,
    );
    let state = apply_fields(state, sub);
    let input = state.form.validate()?;

    if let Err(e) = ctx.client.create_transaction(&input) {
        let state = reduce(state, Action::MutationFailed(e.user_message()));
        return Err(anyhow!(state.error.unwrap_or_default()));
    }
    let year = chrono::Datelike::year(&input.date);
    let state = reduce(state, Action::Saved);
    let state = loaded(reduce(state, Action::SetTableYear(year)), &ctx.client)?;
    println!(
        "Recorded {} at '{}' on {} ({} transactions in {})",
        fmt_money(&input.amount),
        input.company,
        input.date,
        state.records.len(),
        state.table_year
    );
    Ok(())
}

fn edit(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub
        .get_one::<String>("id")
        .ok_or_else(|| anyhow!("id is required"))?;
    let year = year_or_current(sub)?;
    let state = loaded(
        TransactionsState::new(year, ctx.settings.page_size),
        &ctx.client,
    )?;
    let existing = state
        .records
        .iter()
        .find(|t| &t.id == id)
        .cloned()
        .ok_or_else(|| anyhow!("Transaction '{}' not found in {}", id, year))?;

    let state = reduce(state, Action::BeginEdit(existing));
    let state = apply_fields(state, sub);
    let input = state.form.validate()?;

    if let Err(e) = ctx.client.update_transaction(id, &input) {
        let state = reduce(state, Action::MutationFailed(e.user_message()));
        return Err(anyhow!(state.error.unwrap_or_default()));
    }
    let state = loaded(reduce(state, Action::Saved), &ctx.client)?;
    println!(
        "Updated transaction {} ({} transactions in {})",
        id,
        state.records.len(),
        state.table_year
    );
    Ok(())
}

fn remove(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub
        .get_one::<String>("id")
        .ok_or_else(|| anyhow!("id is required"))?;
    let state = TransactionsState::new(year_or_current(sub)?, ctx.settings.page_size);
    if let Err(e) = ctx.client.delete_transaction(id) {
        let state = reduce(state, Action::MutationFailed(e.user_message()));
        return Err(anyhow!(state.error.unwrap_or_default()));
    }
    let state = loaded(reduce(state, Action::Saved), &ctx.client)?;
    println!(
        "Deleted transaction {} ({} transactions left in {})",
        id,
        state.records.len(),
        state.table_year
    );
    Ok(())
}

fn analytics(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = year_or_current(sub)?;

    let state = TransactionsState::new(year, ctx.settings.page_size);
    let state = reduce(state, Action::SetAnalyticsYear(year));
    let state = loaded(state, &ctx.client)?;
    let report = state.analytics();

    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }
    let mut palette = sub.get_flag("color").then(Palette::new);
    println!("{}", summary_table(&report));
    if report.breakdown.is_empty() {
        println!("No category breakdown data available for {}", year);
        return Ok(());
    }
    println!("Category breakdown");
    println!("{}", breakdown_table(&report, palette.as_mut()));
    println!("Month-to-month spending");
    println!("{}", monthly_table(&report));
    Ok(())
}

fn years(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let state = loaded(
        TransactionsState::new(year_or_current(sub)?, ctx.settings.page_size),
        &ctx.client,
    )?;
    let years = available_years(&state.records);
    if !maybe_print_json(json_flag, jsonl_flag, &years)? {
        let rows = years.iter().map(|y| vec![y.to_string()]).collect();
        println!("{}", pretty_table(&["Year"], rows));
    }
    Ok(())
}

pub fn summary_table(report: &Analytics) -> Table {
    let s = &report.summary;
    pretty_table(
        &["Year", "Total Spent", "Transactions", "Avg Transaction", "Top Category"],
        vec![vec![
            report.year.to_string(),
            fmt_money(&s.total_spent),
            s.count.to_string(),
            fmt_money(&s.average),
            format!("{} ({})", s.top_category.name, fmt_money(&s.top_category.value)),
        ]],
    )
}

fn cell_or_dash(v: &Decimal) -> String {
    if *v > Decimal::ZERO {
        fmt_money(v)
    } else {
        "-".to_string()
    }
}

pub fn breakdown_table(report: &Analytics, mut palette: Option<&mut Palette>) -> Table {
    let b = &report.breakdown;
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    let mut header = vec!["Category".to_string()];
    header.extend(b.months.iter().map(|m| crate::analytics::month_label(m)));
    header.push("Total".to_string());
    t.set_header(header);

    for row in &b.rows {
        let mut name = Cell::new(&row.category);
        if let Some(p) = palette.as_deref_mut() {
            name = name.fg(to_table_color(p.color_for(&row.category)));
        }
        let mut cells = vec![name];
        cells.extend(row.cells.iter().map(|v| Cell::new(cell_or_dash(v))));
        cells.push(Cell::new(fmt_money(&row.total)));
        t.add_row(cells);
    }

    let mut totals = vec![Cell::new("Total")];
    totals.extend(b.month_totals().iter().map(|v| Cell::new(cell_or_dash(v))));
    totals.push(Cell::new(fmt_money(&report.summary.total_spent)));
    t.add_row(totals);
    align_amounts(&mut t, 1);
    t
}

pub fn monthly_table(report: &Analytics) -> Table {
    let categories: Vec<&str> = report
        .category_totals
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    let mut headers = vec!["Month"];
    headers.extend(categories.iter().copied());
    headers.push("Total");

    let rows = report
        .monthly
        .iter()
        .map(|m| {
            let mut r = vec![m.label.clone()];
            r.extend(categories.iter().map(|c| cell_or_dash(&m.value(c))));
            r.push(fmt_money(&m.total));
            r
        })
        .collect();
    let mut t = pretty_table(&headers, rows);
    align_amounts(&mut t, 1);
    t
}

fn suggestions(ctx: &Ctx, sub: &clap::ArgMatches, label: &str) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let query = sub.get_one::<String>("query").map(String::as_str);
    let res = if label == "Company" {
        ctx.client.companies(query)
    } else {
        ctx.client.categories(query)
    };
    let names: Vec<String> = res
        .map_err(|e| anyhow!("Could not load suggestions: {}", e.user_message()))?
        .into_iter()
        .map(|s| s.name)
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &names)? {
        let rows = names.into_iter().map(|n| vec![n]).collect();
        println!("{}", pretty_table(&[label], rows));
    }
    Ok(())
}
