// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use tracing_subscriber::EnvFilter;

use daybook::{app::App, cli, commands, config::Config, db};

fn init_tracing() {
    let filter = std::env::var("DAYBOOK_LOG")
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let today = Local::now().date_naive();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        Some((name, sub)) => {
            let cfg = Config::load(&conn)?;
            let mut store = commands::open_store(conn, &cfg)?;
            match name {
                "add" => commands::expenses::handle_add(&mut store, sub, today)?,
                "list" => commands::expenses::handle_list(&store, sub)?,
                "month" => commands::month::handle(&store, sub, today)?,
                "export" => commands::exporter::handle(&store, sub)?,
                "session" => {
                    let mut app = App::load(store, today)?;
                    let stdin = std::io::stdin();
                    let mut input = stdin.lock();
                    let mut out = std::io::stdout();
                    commands::session::run(&mut app, &mut input, &mut out, today, &Instant::now)?;
                }
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
