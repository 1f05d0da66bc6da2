// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use spendlens::models::{
    IncomePage, NetWorthSnapshot, SnapshotAccountInput, SnapshotInput, Transaction,
    TransactionInput,
};

#[test]
fn transaction_from_backend_json() {
    let raw = json!([
        {
            "id": "a1",
            "date": "2025-01-03",
            "company": { "name": "Amazon" },
            "category": { "name": "Shopping" },
            "item": "Electronics",
            "amount": 299.99,
            "paymentType": "Chase Sapphire"
        },
        {
            "id": 7,
            "date": "2025-01-02T00:00:00.000Z",
            "company": { "name": "Whole Foods" },
            "category": { "name": "Groceries" },
            "item": "Weekly Shopping",
            "amount": "125.5",
            "paymentType": "Cash"
        }
    ]);
    let txs: Vec<Transaction> = serde_json::from_value(raw).unwrap();
    assert_eq!(txs[0].id, "a1");
    assert_eq!(txs[0].company.name, "Amazon");
    assert_eq!(txs[0].amount, Decimal::new(29999, 2));
    assert_eq!(txs[0].payment_type, "Chase Sapphire");
    assert_eq!(txs[1].id, "7");
    assert_eq!(txs[1].date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    assert_eq!(txs[1].amount, Decimal::new(1255, 1));
}

#[test]
fn bad_date_is_rejected() {
    let raw = json!({
        "id": "x",
        "date": "yesterday",
        "company": { "name": "A" },
        "category": { "name": "B" },
        "item": "c",
        "amount": 1,
        "paymentType": "Cash"
    });
    assert!(serde_json::from_value::<Transaction>(raw).is_err());
}

#[test]
fn transaction_input_body_shape() {
    let input = TransactionInput {
        company: "Amazon".to_string(),
        category: "Shopping".to_string(),
        item: "Cable".to_string(),
        amount: Decimal::new(1250, 2),
        payment_type: "Cash".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
    };
    let v = serde_json::to_value(&input).unwrap();
    assert_eq!(v["company"], "Amazon");
    assert_eq!(v["paymentType"], "Cash");
    assert_eq!(v["date"], "2025-04-01");
    assert_eq!(v["amount"].as_f64(), Some(12.5));
}

#[test]
fn income_page_tolerates_missing_fields() {
    let page: IncomePage = serde_json::from_value(json!({
        "yearIncomes": [
            { "id": 1, "date": "2025-01-01", "source": "Salary", "amount": "5000" }
        ],
        "yearTotal": 5000
    }))
    .unwrap();
    assert_eq!(page.year_incomes.len(), 1);
    assert_eq!(page.year_incomes[0].id, "1");
    assert_eq!(page.year_total, Decimal::new(5000, 0));
    assert_eq!(page.all_time_total, Decimal::ZERO);
}

#[test]
fn snapshot_total_is_derived_from_accounts() {
    let s: NetWorthSnapshot = serde_json::from_value(json!({
        "id": "s1",
        "date": "2024-12-01",
        "accounts": [
            { "name": "Savings", "amount": 55000 },
            { "name": "Brokerage", "amount": 1200.5 }
        ],
        "totalAmount": 1
    }))
    .unwrap();
    assert_eq!(s.total(), Decimal::new(562005, 1));
    assert_eq!(s.total_amount, Some(Decimal::ONE));
    assert_eq!(s.key(), "2024-12-01");
}

#[test]
fn snapshot_input_uses_account_name_key() {
    let input = SnapshotInput {
        date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        accounts: vec![SnapshotAccountInput {
            account_name: "Savings".to_string(),
            amount: Decimal::new(100, 0),
        }],
    };
    let v = serde_json::to_value(&input).unwrap();
    assert_eq!(v["accounts"][0]["accountName"], "Savings");
    assert_eq!(v["accounts"][0]["amount"].as_f64(), Some(100.0));
}
