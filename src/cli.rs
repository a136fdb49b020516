// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn period_args(cmd: Command) -> Command {
    json_args(
        cmd.arg(
            Arg::new("range")
                .long("range")
                .help("7days | 30days | 90days | year (relative to --as-of)"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .conflicts_with("range")
                .help("Start date YYYY-MM-DD (inclusive)"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .conflicts_with("range")
                .help("End date YYYY-MM-DD (inclusive)"),
        )
        .arg(
            Arg::new("as_of")
                .long("as-of")
                .help("Reference date for relative ranges, defaults to today"),
        ),
    )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse transactions")
        .subcommand(
            Command::new("add")
                .about("Add an income or expense")
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("expense")
                        .help("income | expense"),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                .arg(
                    Arg::new("payment_method")
                        .long("payment-method")
                        .default_value("Cash"),
                )
                .arg(Arg::new("tags").long("tags").help("Comma-separated tags"))
                .arg(Arg::new("wallet").long("wallet").help("Wallet id or name"))
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("from").long("from"))
                .arg(Arg::new("to").long("to"))
                .arg(Arg::new("type").long("type"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("wallet").long("wallet"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction and undo its wallet effect")
                .arg(Arg::new("id").required(true)),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Category spending caps")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("period")
                        .long("period")
                        .default_value("monthly")
                        .help("weekly | monthly | yearly"),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help("Window start, defaults to the first of this month"),
                )
                .arg(Arg::new("end").long("end").help("Override the window end")),
        )
        .subcommand(
            Command::new("edit")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .allow_negative_numbers(true),
                )
                .arg(Arg::new("period").long("period")),
        )
        .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
        .subcommand(json_args(Command::new("list")))
        .subcommand(json_args(
            Command::new("progress").about("Spent vs. target for every budget"),
        ))
}

fn wallet_cmd() -> Command {
    Command::new("wallet")
        .about("Balance buckets")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .default_value("0")
                        .allow_negative_numbers(true),
                )
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("color").long("color").default_value("#3182CE")),
        )
        .subcommand(
            Command::new("edit")
                .arg(Arg::new("wallet").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .allow_negative_numbers(true),
                )
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(Command::new("rm").arg(Arg::new("wallet").required(true)))
        .subcommand(Command::new("default").arg(Arg::new("wallet").required(true)))
        .subcommand(json_args(Command::new("list")))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Summaries over a period")
        .subcommand(period_args(Command::new("summary")))
        .subcommand(period_args(Command::new("categories")))
        .subcommand(period_args(Command::new("payment-methods")))
        .subcommand(period_args(Command::new("income")))
        .subcommand(period_args(Command::new("cashflow")))
        .subcommand(period_args(Command::new("stats")))
}

fn streak_cmd() -> Command {
    Command::new("streak")
        .about("Daily habit check-ins")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("target")
                        .long("target")
                        .value_parser(value_parser!(u32).range(1..))
                        .default_value("7"),
                )
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(
            Command::new("check")
                .arg(Arg::new("streak").required(true))
                .arg(Arg::new("date").long("date").help("Defaults to today")),
        )
        .subcommand(Command::new("rm").arg(Arg::new("streak").required(true)))
        .subcommand(json_args(Command::new("list")))
}

pub fn build_cli() -> Command {
    Command::new("trakr")
        .about("Personal finance tracking: transactions, budgets, wallets, reports and streaks")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the data store"))
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(wallet_cmd())
        .subcommand(Command::new("category").subcommand(json_args(Command::new("list"))))
        .subcommand(report_cmd())
        .subcommand(streak_cmd())
        .subcommand(
            Command::new("settings")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("name").required(true).help(
                            "currency | language | notifications | shame-free | \
                             backup-frequency | export-format | display-name | email",
                        ))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write all data to a file")
                .arg(Arg::new("out").long("out").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("csv | json, defaults to the export-format setting"),
                ),
        )
        .subcommand(
            Command::new("data").subcommand(
                Command::new("clear")
                    .about("Remove transactions, budgets, wallets and streaks")
                    .arg(
                        Arg::new("yes")
                            .long("yes")
                            .action(ArgAction::SetTrue)
                            .required(true),
                    ),
            ),
        )
}
