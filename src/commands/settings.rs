// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, Backend, Config, KEY_API_KEY, KEY_COLLECTION, KEY_PROJECT, KEY_STORE};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-store", sub)) => {
            let backend: Backend = sub.get_one::<String>("store").unwrap().parse()?;
            config::set_setting(conn, KEY_STORE, &backend.to_string())?;
            println!("Document store set to {}", backend);
        }
        Some(("set-firestore", sub)) => {
            let project = sub.get_one::<String>("project").unwrap().trim();
            config::set_setting(conn, KEY_PROJECT, project)?;
            if let Some(key) = sub.get_one::<String>("api-key") {
                config::set_setting(conn, KEY_API_KEY, key.trim())?;
            }
            if let Some(c) = sub.get_one::<String>("collection") {
                config::set_setting(conn, KEY_COLLECTION, c.trim())?;
            }
            println!("Firestore project set to {}", project);
        }
        _ => show(conn)?,
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let cfg = Config::load(conn)?;
    let rows = vec![
        vec!["store".to_string(), cfg.backend.to_string()],
        vec!["collection".to_string(), cfg.collection.clone()],
        vec![
            "firestore project".to_string(),
            cfg.firestore_project.clone().unwrap_or_default(),
        ],
        vec![
            "firestore api key".to_string(),
            if cfg.firestore_api_key.is_some() {
                "(set)".to_string()
            } else {
                String::new()
            },
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
