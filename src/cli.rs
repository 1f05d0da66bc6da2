// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

fn json_flags(c: Command) -> Command {
    c.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn year_arg(help: &'static str) -> Arg {
    Arg::new("year").long("year").help(help)
}

fn transaction_fields(c: Command, required: bool) -> Command {
    c.arg(Arg::new("company").long("company").required(required))
        .arg(Arg::new("category").long("category").required(required))
        .arg(Arg::new("item").long("item").required(required))
        .arg(
            Arg::new("amount")
                .long("amount")
                .required(required)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("payment-type")
                .long("payment-type")
                .required(required),
        )
        .arg(
            Arg::new("date")
                .long("date")
                .required(required)
                .help("YYYY-MM-DD"),
        )
}

fn account_arg() -> Arg {
    Arg::new("account")
        .long("account")
        .required(true)
        .action(ArgAction::Append)
        .help("NAME=AMOUNT, repeat for every account in the snapshot")
}

pub fn build_cli() -> Command {
    Command::new("spendlens")
        .about("Track spending, income, and net worth against your finance API")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api-base")
                .long("api-base")
                .global(true)
                .help("Backend base URL (overrides config and SPENDLENS_API_BASE)"),
        )
        .subcommand(
            Command::new("auth")
                .about("Sign in and out")
                .subcommand(
                    Command::new("login").arg(
                        Arg::new("id-token")
                            .long("id-token")
                            .required(true)
                            .help("Google ID token"),
                    ),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("status")),
        )
        .subcommand(
            Command::new("tx")
                .about("Spending transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(year_arg("Year to fetch (default: current year)"))
                        .arg(Arg::new("search").long("search").help(
                            "Case-insensitive match on company or item",
                        ))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Exact category name, or 'all'"),
                        )
                        .arg(
                            Arg::new("page")
                                .long("page")
                                .value_parser(value_parser!(usize))
                                .default_value("1"),
                        ),
                ))
                .subcommand(transaction_fields(Command::new("add"), true))
                .subcommand(transaction_fields(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(year_arg("Year the transaction is in (default: current year)")),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true))
                        .arg(year_arg("Year to refresh afterwards")),
                )
                .subcommand(json_flags(
                    Command::new("analytics")
                        .arg(year_arg("Analytics year (default: current year)"))
                        .arg(
                            Arg::new("color")
                                .long("color")
                                .action(ArgAction::SetTrue)
                                .help("Color category names"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("years")
                        .about("Years present in the fetched transactions, newest first")
                        .arg(year_arg("Year to fetch (default: current year)")),
                ))
                .subcommand(json_flags(
                    Command::new("companies").arg(Arg::new("query").long("query")),
                ))
                .subcommand(json_flags(
                    Command::new("categories").arg(Arg::new("query").long("query")),
                )),
        )
        .subcommand(
            Command::new("income")
                .about("Income entries")
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("year")
                            .long("year")
                            .default_value("all")
                            .help("YYYY or 'all'"),
                    ),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("source").long("source").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("year").long("year").default_value("all")),
                )
                .subcommand(json_flags(Command::new("years"))),
        )
        .subcommand(
            Command::new("networth")
                .about("Net-worth snapshots")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(account_arg()),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("date").required(true).help("Snapshot date"))
                        .arg(
                            Arg::new("new-date")
                                .long("new-date")
                                .help("Move the snapshot to another date"),
                        )
                        .arg(account_arg()),
                )
                .subcommand(Command::new("rm").arg(Arg::new("date").required(true))),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Overview of income, spending, and net worth")
                .arg(year_arg("Spending year (default: current year)")),
        ))
        .subcommand(
            Command::new("export")
                .about("Write data to a file")
                .subcommand(
                    Command::new("transactions")
                        .arg(year_arg("Year to export (default: current year)"))
                        .arg(Arg::new("search").long("search"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("breakdown")
                        .arg(year_arg("Analytics year (default: current year)"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Show effective settings")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("path")),
        )
}

/// `--api-base`, wherever on the command line it was given.
pub fn api_base_flag(m: &ArgMatches) -> Option<String> {
    let mut cur = m;
    loop {
        if let Some(v) = cur.get_one::<String>("api-base") {
            return Some(v.clone());
        }
        match cur.subcommand() {
            Some((_, sub)) => cur = sub,
            None => return None,
        }
    }
}
