//! In-memory [`DocumentStore`] used by tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::merge::merge_documents;
use crate::{DocumentStore, ListQuery, StoreError};

/// Map-backed store. Documents keep insertion order within a collection so
/// unordered lists are deterministic.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<(String, Value)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, mut doc: Value) -> Result<Value, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let map = doc.as_object_mut().ok_or(StoreError::NotAnObject)?;
        map.insert("id".into(), Value::String(id.clone()));

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id, doc.clone()));
        Ok(doc)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(_, doc)| doc.clone())
        }))
    }

    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let mut docs: Vec<Value> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| matches_filters(doc, &query.filters))
                    .map(|(_, doc)| doc.clone())
                    .collect()
            })
            .unwrap_or_default();

        if let Some(field) = query.order_by {
            docs.sort_by(|a, b| {
                let ordering = compare_field(a, b, field);
                if query.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }
        Ok(docs)
    }

    async fn merge_write(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Value, StoreError> {
        if !patch.is_object() {
            return Err(StoreError::NotAnObject);
        }

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if let Some((_, doc)) = docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            merge_documents(doc, &patch);
            Ok(doc.clone())
        } else {
            let mut doc = serde_json::json!({ "id": id });
            merge_documents(&mut doc, &patch);
            docs.push((id.to_string(), doc.clone()));
            Ok(doc)
        }
    }

    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn matches_filters(doc: &Value, filters: &[(String, Value)]) -> bool {
    filters
        .iter()
        .all(|(field, value)| doc.get(field) == Some(value))
}

/// Compare two documents on a field. Strings compare lexicographically
/// (ISO-8601 timestamps order correctly this way), numbers numerically;
/// anything else ties.
fn compare_field(a: &Value, b: &Value, field: &str) -> std::cmp::Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        _ => std::cmp::Ordering::Equal,
    }
}
