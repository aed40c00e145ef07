//! Document store capability layer.
//!
//! The gateway talks to persistence through the narrow [`DocumentStore`]
//! trait: create / get / list / merge-write addressed by collection + id over
//! schemaless JSON documents. Two implementations are provided:
//!
//! - [`MemoryStore`] -- in-process map, used by tests and local development.
//! - [`PgStore`] -- a single `documents` JSONB table on PostgreSQL. The pool
//!   is created lazily so a missing or unreachable database surfaces
//!   per-request as [`StoreError::Unavailable`], not as a boot failure.

pub mod memory;
pub mod merge;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use serde_json::Value;

/// Errors surfaced by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing database is unreachable or not yet provisioned.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// A query failed for a reason other than availability.
    #[error("document store query failed: {0}")]
    Query(String),

    /// The caller handed over something that is not a JSON object.
    #[error("document must be a JSON object")]
    NotAnObject,
}

/// Equality filters, ordering, and limit for [`DocumentStore::list`].
///
/// Order-by fields are server-chosen constants (`created_at`, `date`), never
/// client input.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<&'static str>,
    pub descending: bool,
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only documents whose `field` equals `value`.
    pub fn filter(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push((field.to_string(), value.into()));
        self
    }

    /// Ascending order on a string-comparable field.
    pub fn order_by(mut self, field: &'static str) -> Self {
        self.order_by = Some(field);
        self.descending = false;
        self
    }

    /// Descending order on a string-comparable field.
    pub fn order_by_desc(mut self, field: &'static str) -> Self {
        self.order_by = Some(field);
        self.descending = true;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Narrow persistence interface injected into request handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document, assigning it a fresh id. The stored document
    /// (with its `id` field set) is returned.
    async fn create(&self, collection: &str, doc: Value) -> Result<Value, StoreError>;

    /// Fetch one document, `None` when absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// List documents matching `query`.
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Value>, StoreError>;

    /// Deep-merge `patch` into the document, creating it when absent, and
    /// return the merged result. Map fields merge recursively; every other
    /// value (lists included) is replaced wholesale. Unknown fields already
    /// on the document are preserved.
    ///
    /// This is a read-modify-write without locking: concurrent writers to the
    /// same document race and the last write wins.
    async fn merge_write(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Value, StoreError>;

    /// Cheap readiness probe for health endpoints.
    async fn health(&self) -> Result<(), StoreError>;
}
