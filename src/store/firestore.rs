// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cloud Firestore backend over the v1 REST API.
//!
//! Firestore wraps every value in a typed envelope (`{"stringValue": "12"}`),
//! so documents are translated to and from plain JSON at this boundary.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::{Document, DocumentStore};
use crate::utils::http_client;

const API_ROOT: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: &str = "300";

pub struct FirestoreStore {
    client: reqwest::blocking::Client,
    project: String,
    api_key: Option<String>,
    root: String,
}

#[derive(Debug, Deserialize)]
struct FsDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<FsDocument>,
    next_page_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(project: &str, api_key: Option<String>) -> Result<Self> {
        Self::with_root(API_ROOT, project, api_key)
    }

    /// Points the client at another endpoint, e.g. the local emulator.
    pub fn with_root(root: &str, project: &str, api_key: Option<String>) -> Result<Self> {
        if project.trim().is_empty() {
            bail!(
                "Firestore project id is empty; \
                 run `daybook config set-firestore --project <id>`"
            );
        }
        Ok(Self {
            client: http_client()?,
            project: project.trim().to_string(),
            api_key,
            root: root.trim_end_matches('/').to_string(),
        })
    }

    pub fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.root, self.project, collection
        )
    }

    fn key_param(&self) -> Vec<(&'static str, String)> {
        self.api_key
            .iter()
            .map(|k| ("key", k.clone()))
            .collect()
    }
}

impl DocumentStore for FirestoreStore {
    fn list_all(&self, collection: &str) -> Result<Vec<Document>> {
        let url = self.collection_url(collection);
        let mut out = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = self.key_param();
            query.push(("pageSize", PAGE_SIZE.to_string()));
            if let Some(t) = &page_token {
                query.push(("pageToken", t.clone()));
            }
            let page: ListResponse = self
                .client
                .get(&url)
                .query(&query)
                .send()?
                .error_for_status()?
                .json()?;
            for d in page.documents {
                out.push(Document {
                    id: document_id(&d.name)?,
                    fields: from_firestore_fields(&d.fields)?,
                });
            }
            match page.next_page_token {
                Some(t) if !t.is_empty() => page_token = Some(t),
                _ => break,
            }
        }
        debug!(collection, count = out.len(), "listed firestore documents");
        Ok(out)
    }

    fn create(&mut self, collection: &str, fields: Map<String, Value>) -> Result<String> {
        let body = json!({ "fields": to_firestore_fields(&fields) });
        let created: FsDocument = self
            .client
            .post(self.collection_url(collection))
            .query(&self.key_param())
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        document_id(&created.name)
    }

    fn update_by_id(
        &mut self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<()> {
        let mut query = self.key_param();
        for k in fields.keys() {
            query.push(("updateMask.fieldPaths", k.clone()));
        }
        query.push(("currentDocument.exists", "true".to_string()));
        let body = json!({ "fields": to_firestore_fields(&fields) });
        self.client
            .patch(format!("{}/{}", self.collection_url(collection), id))
            .query(&query)
            .json(&body)
            .send()?
            .error_for_status()
            .with_context(|| format!("Firestore rejected update of '{}'", id))?;
        Ok(())
    }
}

/// Last path segment of a resource name such as
/// `projects/p/databases/(default)/documents/expenses/AbC123`.
pub fn document_id(name: &str) -> Result<String> {
    name.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .with_context(|| format!("Malformed Firestore document name '{}'", name))
}

pub fn to_firestore_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), to_firestore_value(v)))
        .collect()
}

pub fn to_firestore_value(v: &Value) -> Value {
    match v {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // int64 travels as a JSON string
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(to_firestore_value).collect::<Vec<_>>() }
        }),
        Value::Object(m) => json!({ "mapValue": { "fields": to_firestore_fields(m) } }),
    }
}

pub fn from_firestore_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>> {
    fields
        .iter()
        .map(|(k, v)| Ok((k.clone(), from_firestore_value(v)?)))
        .collect()
}

pub fn from_firestore_value(v: &Value) -> Result<Value> {
    let (kind, inner) = v
        .as_object()
        .and_then(|o| o.iter().next())
        .with_context(|| format!("Unexpected Firestore value {}", v))?;
    let out = match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" | "doubleValue" => inner.clone(),
        "stringValue" | "timestampValue" | "referenceValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => Value::from(
                s.parse::<i64>()
                    .with_context(|| format!("Invalid integerValue '{}'", s))?,
            ),
            other => other.clone(),
        },
        "mapValue" => match inner.get("fields").and_then(Value::as_object) {
            Some(m) => Value::Object(from_firestore_fields(m)?),
            None => Value::Object(Map::new()),
        },
        "arrayValue" => match inner.get("values").and_then(Value::as_array) {
            Some(items) => Value::Array(
                items
                    .iter()
                    .map(from_firestore_value)
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => Value::Array(Vec::new()),
        },
        other => bail!("Unsupported Firestore value type '{}'", other),
    };
    Ok(out)
}
