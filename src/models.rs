// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A `{ "name": ... }` object, the shape the backend uses for companies and categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
}

impl Named {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_date")]
    pub date: NaiveDate,
    pub company: Named,
    pub category: Named,
    pub item: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub payment_type: String,
}

/// Body of `POST /transactions` and `PUT /transactions/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub company: String,
    pub category: String,
    pub item: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub payment_type: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_date")]
    pub date: NaiveDate,
    pub source: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeInput {
    pub date: NaiveDate,
    pub source: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

/// Response of `GET /income`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncomePage {
    pub year_incomes: Vec<Income>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub year_total: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub all_time_total: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeYears {
    #[serde(default)]
    pub years: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSnapshot {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub accounts: Vec<AccountBalance>,
    /// Total as reported by the backend; `total()` is derived from the accounts.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub total_amount: Option<Decimal>,
}

impl NetWorthSnapshot {
    pub fn total(&self) -> Decimal {
        crate::analytics::sum_amounts(self.accounts.iter().map(|a| a.amount))
    }

    /// Identifier used by `PUT/DELETE /networth/:date`.
    pub fn key(&self) -> String {
        self.date.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotAccountInput {
    pub account_name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

/// Body of `POST /networth` and `PUT /networth/:date`; always the full account list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotInput {
    pub date: NaiveDate,
    pub accounts: Vec<SnapshotAccountInput>,
}

/// Auto-complete entry returned by `/companies` and `/categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Response of `POST /auth/login`; the session itself arrives as a cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: Option<User>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(d)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

// Accepts both `2025-01-03` and `2025-01-03T00:00:00.000Z`.
fn de_date<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(d)?;
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", raw, e)))
}
