// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Document store abstraction and the expense adapter built on top of it.
//!
//! Backends only know about schemaless JSON documents grouped in named
//! collections. [`ExpenseStore`] maps those documents to [`ExpenseRecord`]s.

pub mod firestore;
pub mod memory;
pub mod sqlite;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{ExpenseFields, ExpenseRecord};

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const DEFAULT_COLLECTION: &str = "expenses";

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document '{id}' not found in collection '{collection}'")]
    NotFound { collection: String, id: String },
}

pub trait DocumentStore {
    /// Full scan of a collection. No filtering, no pagination for the caller.
    fn list_all(&self, collection: &str) -> Result<Vec<Document>>;

    /// Stores a new document and returns the identifier assigned to it.
    fn create(&mut self, collection: &str, fields: Map<String, Value>) -> Result<String>;

    /// Merges `fields` into an existing document. Keys not present are kept.
    fn update_by_id(
        &mut self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<()>;
}

/// Merge helper shared by the local backends.
pub(crate) fn merge_fields(target: &mut Map<String, Value>, fields: Map<String, Value>) {
    for (k, v) in fields {
        target.insert(k, v);
    }
}

pub struct ExpenseStore {
    backend: Box<dyn DocumentStore>,
    collection: String,
}

impl ExpenseStore {
    pub fn new(backend: Box<dyn DocumentStore>) -> Self {
        Self::with_collection(backend, DEFAULT_COLLECTION)
    }

    pub fn with_collection(backend: Box<dyn DocumentStore>, collection: &str) -> Self {
        Self {
            backend,
            collection: collection.to_string(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn list(&self) -> Result<Vec<ExpenseRecord>> {
        let docs = self
            .backend
            .list_all(&self.collection)
            .with_context(|| format!("List collection '{}'", self.collection))?;
        debug!(collection = %self.collection, count = docs.len(), "fetched documents");
        let mut out = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = doc.id.clone();
            match record_from_document(doc) {
                Ok(r) => out.push(r),
                Err(e) => {
                    warn!(id = %id, error = %format!("{:#}", e), "skipping undecodable document")
                }
            }
        }
        Ok(out)
    }

    pub fn create(&mut self, record: &ExpenseRecord) -> Result<String> {
        let mut fields = to_fields(record)?;
        fields.remove("id");
        self.backend
            .create(&self.collection, fields)
            .with_context(|| format!("Create expense for {}", record.date))
    }

    /// Writes the five amounts plus `total`; `date` is left untouched.
    pub fn update(&mut self, id: &str, fields: &ExpenseFields) -> Result<()> {
        let mut body = to_fields(fields)?;
        body.insert("total".into(), serde_json::to_value(fields.total())?);
        self.backend
            .update_by_id(&self.collection, id, body)
            .with_context(|| format!("Update expense '{}'", id))
    }
}

fn to_fields<T: serde::Serialize>(v: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(v)? {
        Value::Object(m) => Ok(m),
        other => Err(anyhow::anyhow!("Expected a JSON object, got {}", other)),
    }
}

pub fn record_from_document(doc: Document) -> Result<ExpenseRecord> {
    let mut record: ExpenseRecord = serde_json::from_value(Value::Object(doc.fields))
        .with_context(|| format!("Malformed expense document '{}'", doc.id))?;
    record.id = Some(doc.id);
    Ok(record)
}
