// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use tracing::debug;

use super::{merge_fields, Document, DocumentStore, StoreError};

/// JSON documents kept in the local `documents` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Expects a connection whose schema was set up by `db::init_schema`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

fn parse_body(id: &str, body: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(body)
        .with_context(|| format!("Invalid JSON body for document '{}'", id))?
    {
        Value::Object(m) => Ok(m),
        _ => Err(anyhow::anyhow!("Document '{}' body is not an object", id)),
    }
}

impl DocumentStore for SqliteStore {
    fn list_all(&self, collection: &str) -> Result<Vec<Document>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM documents WHERE collection=?1 ORDER BY rowid")?;
        let rows = stmt.query_map(params![collection], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, body) = row?;
            let fields = parse_body(&id, &body)?;
            out.push(Document { id, fields });
        }
        Ok(out)
    }

    fn create(&mut self, collection: &str, fields: Map<String, Value>) -> Result<String> {
        let body = serde_json::to_string(&Value::Object(fields))?;
        let id: String = self.conn.query_row(
            "INSERT INTO documents(id, collection, body)
             VALUES (lower(hex(randomblob(10))), ?1, ?2)
             RETURNING id",
            params![collection, body],
            |r| r.get(0),
        )?;
        debug!(collection, id = %id, "created document");
        Ok(id)
    }

    fn update_by_id(
        &mut self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<()> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection=?1 AND id=?2",
                params![collection, id],
                |r| r.get(0),
            )
            .optional()?;
        let Some(body) = body else {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }
            .into());
        };
        let mut current = parse_body(id, &body)?;
        merge_fields(&mut current, fields);
        self.conn.execute(
            "UPDATE documents SET body=?1, updated_at=datetime('now')
             WHERE collection=?2 AND id=?3",
            params![serde_json::to_string(&Value::Object(current))?, collection, id],
        )?;
        debug!(collection, id, "updated document");
        Ok(())
    }
}
