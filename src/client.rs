// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the finance backend.
//!
//! Every request carries the session cookie. Reads return the decoded body;
//! writes only report success, callers re-fetch the whole collection after.

use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Settings;
use crate::models::{
    Income, IncomeInput, IncomePage, IncomeYears, LoginResponse, NetWorthSnapshot,
    SnapshotInput, Suggestion, Transaction, TransactionInput,
};

const UA: &str = concat!("spendlens/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not signed in or session expired")]
    Unauthorized,
    #[error("access denied")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("rejected: {0}")]
    Validation(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid API base '{0}'")]
    BaseUrl(String),
    #[error("invalid id '{0}'")]
    InvalidKey(String),
}

impl ClientError {
    /// Short message suitable for showing inline next to the failed view.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthorized | ClientError::Forbidden => {
                "Please sign in again (spendlens auth login).".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    body.trim().to_string()
                }
            });
        match status.as_u16() {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound,
            409 => ClientError::Conflict(message),
            400 | 422 => ClientError::Validation(message),
            code => ClientError::Server {
                status: code,
                message,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    id_token: &'a str,
}

/// Year scope for `GET /income`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeYear {
    All,
    Year(i32),
}

impl IncomeYear {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        if s.eq_ignore_ascii_case("all") {
            Ok(IncomeYear::All)
        } else {
            Ok(IncomeYear::Year(crate::utils::parse_year(s)?))
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
    jar: Arc<Jar>,
}

impl ApiClient {
    /// `cookie_header` is a previously saved `Cookie` header value.
    pub fn new(settings: &Settings, cookie_header: Option<&str>) -> ClientResult<Self> {
        let base_url = parse_base(&settings.api_base)?;
        let jar = Arc::new(Jar::default());
        if let Some(header) = cookie_header {
            for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(pair, &base_url);
            }
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(UA)
            .cookie_provider(Arc::clone(&jar))
            .build()?;
        Ok(Self {
            base_url,
            http,
            jar,
        })
    }

    /// Current cookies for the backend, in `Cookie` header form.
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    pub fn url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::BaseUrl(format!("{}: {}", path, e)))
    }

    /// `<collection>/<key>` with `key` escaped as one path segment, so ids
    /// containing `/`, `..` or `?` cannot leave the collection.
    pub fn item_url(&self, collection: &str, key: &str) -> ClientResult<Url> {
        if matches!(key.trim(), "" | "." | "..") {
            return Err(ClientError::InvalidKey(key.to_string()));
        }
        let mut url = self.url(collection)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(key);
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.url(path)?;
        Ok(self.request_to(method, url))
    }

    fn item_request(&self, method: Method, collection: &str, key: &str) -> ClientResult<RequestBuilder> {
        let url = self.item_url(collection, key)?;
        Ok(self.request_to(method, url))
    }

    fn request_to(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "request");
        self.http.request(method, url)
    }

    fn send(&self, req: RequestBuilder) -> ClientResult<String> {
        let res = req.send()?;
        let status = res.status();
        let body = res.text()?;
        if status.is_success() {
            Ok(body)
        } else {
            tracing::warn!(status = status.as_u16(), "request failed");
            Err(ClientError::from_status(status, &body))
        }
    }

    fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let body = self.send(req)?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    // Transactions

    pub fn transactions(&self, year: i32) -> ClientResult<Vec<Transaction>> {
        let req = self
            .request(Method::GET, "transactions")?
            .query(&[("year", year)]);
        self.fetch(req)
    }

    pub fn create_transaction(&self, input: &TransactionInput) -> ClientResult<()> {
        tracing::info!(date = %input.date, amount = %input.amount, "creating transaction");
        self.send(self.request(Method::POST, "transactions")?.json(input))?;
        Ok(())
    }

    pub fn update_transaction(&self, id: &str, input: &TransactionInput) -> ClientResult<()> {
        tracing::info!(id, "updating transaction");
        self.send(self.item_request(Method::PUT, "transactions", id)?.json(input))?;
        Ok(())
    }

    pub fn delete_transaction(&self, id: &str) -> ClientResult<()> {
        tracing::info!(id, "deleting transaction");
        self.send(self.item_request(Method::DELETE, "transactions", id)?)?;
        Ok(())
    }

    pub fn companies(&self, query: Option<&str>) -> ClientResult<Vec<Suggestion>> {
        self.suggestions("companies", query)
    }

    pub fn categories(&self, query: Option<&str>) -> ClientResult<Vec<Suggestion>> {
        self.suggestions("categories", query)
    }

    fn suggestions(&self, path: &str, query: Option<&str>) -> ClientResult<Vec<Suggestion>> {
        let mut req = self.request(Method::GET, path)?;
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            req = req.query(&[("query", q)]);
        }
        self.fetch(req)
    }

    // Income

    pub fn incomes(&self, year: IncomeYear) -> ClientResult<IncomePage> {
        let mut req = self.request(Method::GET, "income")?;
        if let IncomeYear::Year(y) = year {
            req = req.query(&[("year", y)]);
        }
        self.fetch(req)
    }

    pub fn create_income(&self, input: &IncomeInput) -> ClientResult<Income> {
        tracing::info!(date = %input.date, amount = %input.amount, "creating income");
        self.fetch(self.request(Method::POST, "income")?.json(input))
    }

    pub fn delete_income(&self, id: &str) -> ClientResult<()> {
        tracing::info!(id, "deleting income");
        self.send(self.item_request(Method::DELETE, "income", id)?)?;
        Ok(())
    }

    pub fn income_years(&self) -> ClientResult<IncomeYears> {
        self.fetch(self.request(Method::GET, "income/years")?)
    }

    // Net worth

    pub fn net_worth_all(&self) -> ClientResult<Vec<NetWorthSnapshot>> {
        self.fetch(self.request(Method::GET, "networth/all")?)
    }

    pub fn create_snapshot(&self, input: &SnapshotInput) -> ClientResult<()> {
        tracing::info!(date = %input.date, accounts = input.accounts.len(), "creating snapshot");
        self.send(self.request(Method::POST, "networth")?.json(input))?;
        Ok(())
    }

    pub fn update_snapshot(&self, key: &str, input: &SnapshotInput) -> ClientResult<()> {
        tracing::info!(key, accounts = input.accounts.len(), "replacing snapshot");
        self.send(self.item_request(Method::PUT, "networth", key)?.json(input))?;
        Ok(())
    }

    pub fn delete_snapshot(&self, key: &str) -> ClientResult<()> {
        tracing::info!(key, "deleting snapshot");
        self.send(self.item_request(Method::DELETE, "networth", key)?)?;
        Ok(())
    }

    // Session

    pub fn login(&self, id_token: &str) -> ClientResult<LoginResponse> {
        let body = LoginBody { id_token };
        self.fetch(self.request(Method::POST, "auth/login")?.json(&body))
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.send(self.request(Method::POST, "auth/logout")?)?;
        Ok(())
    }
}

// Joining relative paths needs a trailing slash on the base.
fn parse_base(raw: &str) -> ClientResult<Url> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&with_slash).map_err(|e| ClientError::BaseUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::BaseUrl(raw.to_string()));
    }
    Ok(url)
}
