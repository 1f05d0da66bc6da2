// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};

use super::Ctx;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => login(ctx, sub)?,
        Some(("logout", _)) => logout(ctx)?,
        Some(("status", _)) => status(ctx)?,
        _ => {}
    }
    Ok(())
}

fn login(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let token = sub
        .get_one::<String>("id-token")
        .ok_or_else(|| anyhow!("--id-token is required"))?;
    let res = ctx
        .client
        .login(token)
        .map_err(|e| anyhow!("Login failed: {}", e.user_message()))?;
    let cookie = ctx
        .client
        .cookie_header()
        .ok_or_else(|| anyhow!("Login succeeded but the server set no session cookie"))?;
    ctx.session.save(&cookie)?;
    tracing::info!(session = %ctx.session.path().display(), "session stored");
    match res.user {
        Some(u) if !u.name.is_empty() => println!("Signed in as {} <{}>", u.name, u.email),
        _ => println!("Signed in"),
    }
    Ok(())
}

fn logout(ctx: &Ctx) -> Result<()> {
    // A failed server-side logout still drops the local session.
    if let Err(e) = ctx.client.logout() {
        tracing::warn!(error = %e, "server logout failed");
    }
    ctx.session.clear()?;
    println!("Signed out");
    Ok(())
}

fn status(ctx: &Ctx) -> Result<()> {
    match ctx.session.load()? {
        Some(_) => println!(
            "Session stored at {} for {}",
            ctx.session.path().display(),
            ctx.settings.api_base
        ),
        None => println!("Not signed in"),
    }
    Ok(())
}
