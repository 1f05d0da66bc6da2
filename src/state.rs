// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction view state and its reducer.
//!
//! All view state lives in [`TransactionsState`]; the only way to change it is
//! [`reduce`]. Derived figures (filtered rows, pages, analytics) are computed
//! from the state on demand and never stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::analytics::{self, Analytics, CategoryFilter, TableFilter};
use crate::models::{Transaction, TransactionInput};
use crate::pagination::Pager;

/// Monotonic id attached to each collection fetch.
pub type RequestToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Company,
    Category,
    Item,
    Amount,
    PaymentType,
    Date,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Amount must not be negative")]
    NegativeAmount,
}

/// Raw, unvalidated form text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionForm {
    pub company: String,
    pub category: String,
    pub item: String,
    pub amount: String,
    pub payment_type: String,
    pub date: String,
}

impl TransactionForm {
    pub fn from_transaction(t: &Transaction) -> Self {
        Self {
            company: t.company.name.clone(),
            category: t.category.name.clone(),
            item: t.item.clone(),
            amount: t.amount.to_string(),
            payment_type: t.payment_type.clone(),
            date: t.date.to_string(),
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Company => self.company = value,
            FormField::Category => self.category = value,
            FormField::Item => self.item = value,
            FormField::Amount => self.amount = value,
            FormField::PaymentType => self.payment_type = value,
            FormField::Date => self.date = value,
        }
    }

    pub fn validate(&self) -> Result<TransactionInput, FormError> {
        let required = [
            ("company", &self.company),
            ("category", &self.category),
            ("item", &self.item),
            ("amount", &self.amount),
            ("payment type", &self.payment_type),
            ("date", &self.date),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(FormError::Missing(label));
            }
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(self.date.clone()))?;
        let amount: Decimal = self
            .amount
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidAmount(self.amount.clone()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(FormError::NegativeAmount);
        }
        Ok(TransactionInput {
            company: self.company.trim().to_string(),
            category: self.category.trim().to_string(),
            item: self.item.trim().to_string(),
            amount,
            payment_type: self.payment_type.trim().to_string(),
            date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionsState {
    pub records: Vec<Transaction>,
    /// Year the collection is fetched for.
    pub table_year: i32,
    /// Year the analytics figures are scoped to.
    pub analytics_year: i32,
    pub filter: TableFilter,
    pub pager: Pager,
    pub form: TransactionForm,
    pub editing_id: Option<String>,
    pub show_form: bool,
    pub error: Option<String>,
    /// Token of the most recently started fetch; older responses are dropped.
    pub latest_request: RequestToken,
    /// Set when the collection no longer matches `table_year` or a write happened.
    pub stale: bool,
}

impl TransactionsState {
    pub fn new(year: i32, per_page: usize) -> Self {
        Self {
            records: Vec::new(),
            table_year: year,
            analytics_year: year,
            filter: TableFilter::default(),
            pager: Pager::new(per_page),
            form: TransactionForm::default(),
            editing_id: None,
            show_form: false,
            error: None,
            latest_request: 0,
            stale: true,
        }
    }

    pub fn next_token(&self) -> RequestToken {
        self.latest_request + 1
    }

    pub fn table_rows(&self) -> Vec<&Transaction> {
        analytics::filter_table(&self.records, &self.filter)
    }

    pub fn page_rows(&self) -> Vec<&Transaction> {
        self.pager.slice(&self.table_rows()).to_vec()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.table_rows().len())
    }

    /// Category choices for the table filter, from the whole collection.
    pub fn categories(&self) -> Vec<String> {
        analytics::categories(&self.records)
    }

    pub fn analytics(&self) -> Analytics {
        Analytics::compute(&self.records, self.analytics_year)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetSearch(String),
    SetCategory(CategoryFilter),
    SetTableYear(i32),
    SetAnalyticsYear(i32),
    NextPage,
    PrevPage,
    GoToPage(usize),
    ToggleForm,
    BeginEdit(Transaction),
    CancelEdit,
    EditField(FormField, String),
    FetchStarted(RequestToken),
    Loaded {
        token: RequestToken,
        records: Vec<Transaction>,
    },
    Failed {
        token: RequestToken,
        message: String,
    },
    /// A create/update/delete succeeded; the collection must be re-fetched.
    Saved,
    MutationFailed(String),
}

pub fn reduce(mut state: TransactionsState, action: Action) -> TransactionsState {
    match action {
        // Filter changes keep the current page index.
        Action::SetSearch(search) => state.filter.search = search,
        Action::SetCategory(category) => state.filter.category = category,
        Action::SetTableYear(year) => {
            if year != state.table_year {
                state.table_year = year;
                state.stale = true;
            }
        }
        Action::SetAnalyticsYear(year) => state.analytics_year = year,
        Action::NextPage => {
            let len = state.table_rows().len();
            state.pager = state.pager.next(len);
        }
        Action::PrevPage => state.pager = state.pager.prev(),
        Action::GoToPage(page) => {
            let len = state.table_rows().len();
            state.pager = state.pager.go_to(page, len);
        }
        Action::ToggleForm => state.show_form = !state.show_form,
        Action::BeginEdit(t) => {
            state.form = TransactionForm::from_transaction(&t);
            state.editing_id = Some(t.id);
            state.show_form = true;
        }
        Action::CancelEdit => {
            state.form = TransactionForm::default();
            state.editing_id = None;
            state.show_form = false;
        }
        Action::EditField(field, value) => state.form.set(field, value),
        Action::FetchStarted(token) => {
            if token > state.latest_request {
                state.latest_request = token;
                state.stale = false;
            }
        }
        Action::Loaded { token, records } => {
            if token != state.latest_request {
                tracing::debug!(token, latest = state.latest_request, "dropping stale response");
                return state;
            }
            state.records = records;
            state.error = None;
        }
        Action::Failed { token, message } => {
            if token != state.latest_request {
                tracing::debug!(token, latest = state.latest_request, "dropping stale failure");
                return state;
            }
            state.error = Some(message);
            state.stale = true;
        }
        Action::Saved => {
            state.form = TransactionForm::default();
            state.editing_id = None;
            state.show_form = false;
            state.error = None;
            state.stale = true;
        }
        Action::MutationFailed(message) => state.error = Some(message),
    }
    state
}
