// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Ctx;
use crate::config::config_path;
use crate::utils::pretty_table;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let s = &ctx.settings;
            let rows = vec![
                vec!["api_base".to_string(), s.api_base.clone()],
                vec!["timeout_secs".to_string(), s.timeout_secs.to_string()],
                vec!["page_size".to_string(), s.page_size.to_string()],
                vec![
                    "session".to_string(),
                    ctx.session.path().display().to_string(),
                ],
            ];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("path", _)) => println!("{}", config_path()?.display()),
        _ => {}
    }
    Ok(())
}
