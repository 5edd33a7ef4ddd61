// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::{Map, Value};

use super::{merge_fields, Document, DocumentStore, StoreError};

/// In-process store used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    docs: Vec<(String, Document)>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn list_all(&self, collection: &str) -> Result<Vec<Document>> {
        Ok(self
            .docs
            .iter()
            .filter(|(c, _)| c == collection)
            .map(|(_, d)| d.clone())
            .collect())
    }

    fn create(&mut self, collection: &str, fields: Map<String, Value>) -> Result<String> {
        self.next_id += 1;
        let id = format!("doc-{}", self.next_id);
        self.docs.push((
            collection.to_string(),
            Document {
                id: id.clone(),
                fields,
            },
        ));
        Ok(id)
    }

    fn update_by_id(
        &mut self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<()> {
        let doc = self
            .docs
            .iter_mut()
            .find(|(c, d)| c == collection && d.id == id)
            .map(|(_, d)| d)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        merge_fields(&mut doc.fields, fields);
        Ok(())
    }
}
