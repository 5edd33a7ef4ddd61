// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::store::DEFAULT_COLLECTION;

pub const KEY_STORE: &str = "store";
pub const KEY_PROJECT: &str = "firestore_project";
pub const KEY_API_KEY: &str = "firestore_api_key";
pub const KEY_COLLECTION: &str = "collection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Local,
    Firestore,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" | "sqlite" => Ok(Backend::Local),
            "firestore" => Ok(Backend::Firestore),
            other => Err(anyhow::anyhow!(
                "Unknown store '{}' (use local|firestore)",
                other
            )),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Local => "local",
            Backend::Firestore => "firestore",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub backend: Backend,
    pub collection: String,
    pub firestore_project: Option<String>,
    #[serde(skip_serializing)]
    pub firestore_api_key: Option<String>,
}

impl Config {
    /// Stored settings, with `DAYBOOK_*` environment variables taking precedence.
    pub fn load(conn: &Connection) -> Result<Self> {
        Self::load_with(conn, |k| std::env::var(k).ok())
    }

    pub fn load_with(conn: &Connection, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let pick = |env_key: &str, setting: &str| -> Result<Option<String>> {
            match env(env_key).filter(|v| !v.trim().is_empty()) {
                Some(v) => Ok(Some(v)),
                None => get_setting(conn, setting),
            }
        };
        let backend = match pick("DAYBOOK_STORE", KEY_STORE)? {
            Some(s) => s.parse()?,
            None => Backend::Local,
        };
        Ok(Self {
            backend,
            collection: pick("DAYBOOK_COLLECTION", KEY_COLLECTION)?
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            firestore_project: pick("DAYBOOK_FIRESTORE_PROJECT", KEY_PROJECT)?,
            firestore_api_key: pick("DAYBOOK_FIRESTORE_API_KEY", KEY_API_KEY)?,
        })
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
