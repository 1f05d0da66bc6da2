// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendlens::analytics::{
    self, available_years, breakdown_table, category_totals, filter_table, filter_year,
    monthly_matrix, summary, Analytics, CategoryFilter, TableFilter, NO_CATEGORY,
};
use spendlens::models::{Named, Transaction};

fn tx(id: &str, date: &str, company: &str, category: &str, item: &str, amount: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        company: Named::new(company),
        category: Named::new(category),
        item: item.to_string(),
        amount: amount.parse().unwrap(),
        payment_type: "Cash".to_string(),
    }
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sample() -> Vec<Transaction> {
    vec![
        tx("1", "2025-02-10", "Amazon", "Shopping", "Headphones", "120.00"),
        tx("2", "2025-01-03", "Whole Foods", "Groceries", "Weekly shop", "80.50"),
        tx("3", "2025-01-20", "Amazon", "Shopping", "Cables", "19.50"),
        tx("4", "2024-12-30", "Shell", "Fuel", "Gas", "45.00"),
        tx("5", "2025-02-14", "Trader Joe's", "Groceries", "Flowers", "30.00"),
        tx("6", "2025-03-01", "Netflix", "Subscriptions", "Streaming", "15.99"),
    ]
}

#[test]
fn search_matches_company_case_insensitively() {
    let records = vec![
        tx("1", "2025-01-03", "Amazon", "Shopping", "Electronics", "299.99"),
        tx("2", "2025-01-02", "Whole Foods", "Groceries", "Weekly Shopping", "125.50"),
    ];
    let filter = TableFilter {
        search: "amazon".to_string(),
        category: CategoryFilter::All,
    };
    let out = filter_table(&records, &filter);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "1");
}

#[test]
fn search_also_matches_item() {
    let records = sample();
    let filter = TableFilter {
        search: "FLOW".to_string(),
        category: CategoryFilter::All,
    };
    let ids: Vec<&str> = filter_table(&records, &filter)
        .into_iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["5"]);
}

#[test]
fn category_filter_is_exact() {
    let records = vec![
        tx("1", "2025-01-03", "Amazon", "Shopping", "Electronics", "299.99"),
        tx("2", "2025-01-02", "Whole Foods", "Groceries", "Weekly Shopping", "125.50"),
    ];
    let filter = TableFilter {
        search: String::new(),
        category: CategoryFilter::parse("Groceries"),
    };
    let out = filter_table(&records, &filter);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "2");

    let lower = TableFilter {
        search: String::new(),
        category: CategoryFilter::parse("groceries"),
    };
    assert!(filter_table(&records, &lower).is_empty());
}

#[test]
fn filters_combine_and_keep_source_order() {
    let records = sample();
    let filter = TableFilter {
        search: "a".to_string(),
        category: CategoryFilter::Only("Shopping".to_string()),
    };
    let ids: Vec<&str> = filter_table(&records, &filter)
        .into_iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "3"]);

    let all = filter_table(&records, &TableFilter::default());
    assert_eq!(all.len(), records.len());
    assert_eq!(all[0].id, "1");
    assert_eq!(all[5].id, "6");
}

#[test]
fn category_filter_parse_all() {
    assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
}

#[test]
fn category_totals_sum_to_year_total() {
    let records = sample();
    let scoped = filter_year(&records, 2025);
    let totals = category_totals(&scoped);
    let sum: Decimal = totals.iter().map(|c| c.value).sum();
    let expected: Decimal = records
        .iter()
        .filter(|t| chrono::Datelike::year(&t.date) == 2025)
        .map(|t| t.amount)
        .sum();
    assert_eq!(sum, expected);
    assert_eq!(sum, d("265.99"));
}

#[test]
fn category_totals_keep_first_appearance_order() {
    let records = sample();
    let scoped = filter_year(&records, 2025);
    let totals = category_totals(&scoped);
    let names: Vec<&str> = totals.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Shopping", "Groceries", "Subscriptions"]);
    assert_eq!(totals[0].value, d("139.50"));
}

#[test]
fn monthly_matrix_is_sorted_with_row_totals() {
    let records = sample();
    let scoped = filter_year(&records, 2025);
    let rows = monthly_matrix(&scoped);
    let keys: Vec<&str> = rows.iter().map(|r| r.month_key.as_str()).collect();
    assert_eq!(keys, vec!["2025-01", "2025-02", "2025-03"]);
    for w in rows.windows(2) {
        assert!(w[0].month_key < w[1].month_key);
    }
    for r in &rows {
        let sum: Decimal = r.values.iter().map(|(_, v)| *v).sum();
        assert_eq!(r.total, sum);
    }
    assert_eq!(rows[0].label, "Jan 2025");
    assert_eq!(rows[0].value("Shopping"), d("19.50"));
    assert_eq!(rows[0].value("Groceries"), d("80.50"));
    assert_eq!(rows[0].value("Subscriptions"), Decimal::ZERO);
    assert_eq!(rows[1].total, d("150.00"));
}

#[test]
fn breakdown_rows_total_their_cells() {
    let records = sample();
    let scoped = filter_year(&records, 2025);
    let table = breakdown_table(&scoped);
    assert_eq!(table.months, vec!["2025-01", "2025-02", "2025-03"]);
    assert_eq!(table.rows.len(), 3);
    for row in &table.rows {
        assert_eq!(row.cells.len(), table.months.len());
        let sum: Decimal = row.cells.iter().copied().sum();
        assert_eq!(row.total, sum);
    }
    let groceries = table.rows.iter().find(|r| r.category == "Groceries").unwrap();
    assert_eq!(groceries.cells, vec![d("80.50"), d("30.00"), Decimal::ZERO]);
    assert_eq!(table.month_totals(), vec![d("100.00"), d("150.00"), d("15.99")]);
}

#[test]
fn summary_average_and_top_category() {
    let records = sample();
    let scoped = filter_year(&records, 2025);
    let s = summary(&scoped);
    assert_eq!(s.count, 5);
    assert_eq!(s.total_spent, d("265.99"));
    assert_eq!(s.average, d("265.99") / Decimal::from(5));
    assert_eq!(s.top_category.name, "Shopping");
    assert_eq!(s.top_category.value, d("139.50"));
}

#[test]
fn empty_input_degrades_to_zero() {
    let records = sample();
    let scoped = filter_year(&records, 2019);
    let s = summary(&scoped);
    assert_eq!(s.count, 0);
    assert_eq!(s.average, Decimal::ZERO);
    assert_eq!(s.total_spent, Decimal::ZERO);
    assert_eq!(s.top_category.name, NO_CATEGORY);
    assert_eq!(s.top_category.value, Decimal::ZERO);
    assert!(monthly_matrix(&scoped).is_empty());
    assert!(breakdown_table(&scoped).is_empty());
    assert!(category_totals(&scoped).is_empty());
}

#[test]
fn top_category_tie_keeps_first_seen() {
    let records = vec![
        tx("1", "2025-01-01", "A", "Fuel", "x", "10"),
        tx("2", "2025-01-02", "B", "Food", "y", "10"),
    ];
    let scoped = filter_year(&records, 2025);
    assert_eq!(summary(&scoped).top_category.name, "Fuel");
}

#[test]
fn analytics_year_scopes_every_aggregate() {
    let records = sample();
    let a = Analytics::compute(&records, 2024);
    assert_eq!(a.summary.count, 1);
    assert_eq!(a.category_totals.len(), 1);
    assert_eq!(a.category_totals[0].name, "Fuel");
    assert_eq!(a.monthly.len(), 1);
    assert_eq!(a.breakdown.months, vec!["2024-12"]);
}

#[test]
fn years_are_newest_first() {
    assert_eq!(available_years(&sample()), vec![2025, 2024]);
    assert!(available_years(&[]).is_empty());
}

#[test]
fn month_helpers() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
    assert_eq!(analytics::month_key(date), "2025-03");
    assert_eq!(analytics::month_label("2025-03"), "Mar 2025");
    assert_eq!(analytics::month_label("garbage"), "garbage");
}

#[test]
fn huge_amounts_saturate_instead_of_panicking() {
    let mut big = tx("1", "2025-01-03", "Bank", "Transfer", "Wire", "0");
    big.amount = Decimal::MAX;
    let mut again = big.clone();
    again.id = "2".to_string();
    let mut other = big.clone();
    other.id = "3".to_string();
    other.date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    let records = vec![big, again, other];

    let report = Analytics::compute(&records, 2025);
    assert_eq!(report.summary.total_spent, Decimal::MAX);
    assert_eq!(report.category_totals[0].value, Decimal::MAX);
    assert_eq!(report.monthly[0].total, Decimal::MAX);
    assert_eq!(report.breakdown.rows[0].total, Decimal::MAX);
    assert_eq!(report.breakdown.month_totals()[0], Decimal::MAX);
    assert_eq!(analytics::sum_amounts([Decimal::MIN, Decimal::MIN]), Decimal::MIN);
}

#[test]
fn percent_of_degrades_to_zero() {
    assert_eq!(analytics::percent_of(d("10"), d("40")), d("25.0"));
    assert_eq!(analytics::percent_of(d("10"), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(analytics::percent_of(d("10"), d("-5")), Decimal::ZERO);
    // The ratio itself does not fit
    assert_eq!(
        analytics::percent_of(Decimal::MAX, Decimal::new(1, 28)),
        Decimal::ZERO
    );
}
