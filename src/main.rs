// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendlens::client::ApiClient;
use spendlens::commands::{self, Ctx};
use spendlens::config::Settings;
use spendlens::session::SessionStore;
use spendlens::{cli, utils};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let settings = Settings::load(cli::api_base_flag(&matches).as_deref())?;
    let session = SessionStore::open_default()?;
    let client = ApiClient::new(&settings, session.load()?.as_deref())?;
    let ctx = Ctx {
        settings,
        client,
        session,
    };

    match matches.subcommand() {
        Some(("auth", sub)) => commands::auth::handle(&ctx, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&ctx, sub)?,
        Some(("income", sub)) => commands::income::handle(&ctx, sub)?,
        Some(("networth", sub)) => commands::networth::handle(&ctx, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        Some(("config", sub)) => commands::settings::handle(&ctx, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
