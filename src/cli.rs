// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn amount(name: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(long).required(true).help(help)
}

pub fn build_cli() -> Command {
    Command::new("daybook")
        .about("Daily milk, bread and payment tracker with billing-month totals")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("add")
                .about("Save the figures for one date (updates after confirmation)")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(amount("milk", "milk", "Milk amount (digits only)"))
                .arg(amount("bread", "bread", "Bread amount (digits only)"))
                .arg(amount("online", "online", "Online payment (digits only)"))
                .arg(amount("cash", "cash", "Cash payment (digits only)"))
                .arg(amount("material", "material", "Material cost (digits only)"))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Overwrite an existing entry without asking"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("Show saved entries, newest first")
                .arg(Arg::new("month").long("month").help("Only YYYY-MM"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_flags(
            Command::new("month")
                .about("Totals for the billing month (11th to 10th of next month)")
                .arg(
                    Arg::new("as-of")
                        .long("as-of")
                        .help("Any date in the starting month, defaults to today"),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Write all entries to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(Command::new("session").about("Interactive entry form"))
        .subcommand(
            Command::new("config")
                .about("Show or change the document store settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-store")
                        .arg(Arg::new("store").required(true).help("local|firestore")),
                )
                .subcommand(
                    Command::new("set-firestore")
                        .arg(Arg::new("project").long("project").required(true))
                        .arg(Arg::new("api-key").long("api-key"))
                        .arg(Arg::new("collection").long("collection")),
                ),
        )
}
