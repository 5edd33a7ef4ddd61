// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod expenses;
pub mod exporter;
pub mod month;
pub mod session;
pub mod settings;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

use crate::config::{Backend, Config};
use crate::store::{ExpenseStore, FirestoreStore, SqliteStore};

/// Builds the configured backend. The local backend takes over `conn`.
pub fn open_store(conn: Connection, cfg: &Config) -> Result<ExpenseStore> {
    let backend: Box<dyn crate::store::DocumentStore> = match cfg.backend {
        Backend::Local => Box::new(SqliteStore::new(conn)),
        Backend::Firestore => {
            let project = cfg
                .firestore_project
                .as_deref()
                .context("Firestore store selected but no project configured")?;
            Box::new(FirestoreStore::new(project, cfg.firestore_api_key.clone())?)
        }
    };
    info!(store = %cfg.backend, collection = %cfg.collection, "opened document store");
    Ok(ExpenseStore::with_collection(backend, &cfg.collection))
}
