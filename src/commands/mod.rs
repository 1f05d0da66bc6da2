// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod transactions;
pub mod income;
pub mod networth;
pub mod dashboard;
pub mod exporter;
pub mod settings;

use crate::client::ApiClient;
use crate::config::Settings;
use crate::session::SessionStore;

/// Everything a subcommand handler needs.
pub struct Ctx {
    pub settings: Settings,
    pub client: ApiClient,
    pub session: SessionStore,
}

/// `--year` value, or the current year.
pub(crate) fn year_or_current(m: &clap::ArgMatches) -> anyhow::Result<i32> {
    match m.get_one::<String>("year") {
        Some(y) => crate::utils::parse_year(y),
        None => Ok(crate::utils::current_year()),
    }
}
