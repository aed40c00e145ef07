//! PostgreSQL-backed [`DocumentStore`]: one `documents` table keyed by
//! (collection, id) with a JSONB payload.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::merge::merge_documents;
use crate::{DocumentStore, ListQuery, StoreError};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over a lazily-connected pool.
    ///
    /// No connection is attempted here; the first query that cannot reach the
    /// database fails with [`StoreError::Unavailable`], keeping startup
    /// independent of database provisioning.
    pub fn connect_lazy(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect_lazy(database_url)
            .map_err(classify)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply embedded migrations (creates the `documents` table).
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn create(&self, collection: &str, mut doc: Value) -> Result<Value, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let map = doc.as_object_mut().ok_or(StoreError::NotAnObject)?;
        map.insert("id".into(), Value::String(id.clone()));

        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(&doc)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(doc)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        sqlx::query_scalar::<_, Value>(
            "SELECT data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)
    }

    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Value>, StoreError> {
        let mut sql = String::from("SELECT data FROM documents WHERE collection = $1");
        let mut param_idx = 2;
        for _ in &query.filters {
            sql.push_str(&format!(" AND data @> ${param_idx}"));
            param_idx += 1;
        }
        if let Some(field) = query.order_by {
            // Order fields are compile-time constants, never client input.
            let direction = if query.descending { "DESC" } else { "ASC" };
            sql.push_str(&format!(" ORDER BY data->>'{field}' {direction}"));
        }
        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut q = sqlx::query_scalar::<_, Value>(&sql).bind(collection);
        for (field, value) in &query.filters {
            let mut containment = serde_json::Map::new();
            containment.insert(field.clone(), value.clone());
            q = q.bind(Value::Object(containment));
        }
        q.fetch_all(&self.pool).await.map_err(classify)
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

        // Read-modify-write without row locking: concurrent writers to the
        // same document race and the last write wins.
        let existing = self.get(collection, id).await?;
        let mut doc = existing.unwrap_or_else(|| serde_json::json!({ "id": id }));
        merge_documents(&mut doc, &patch);

        sqlx::query(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data",
        )
        .bind(collection)
        .bind(id)
        .bind(&doc)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(doc)
    }

    async fn health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(classify)
    }
}

/// Availability problems (no connection, closed pool, bad config) map to
/// [`StoreError::Unavailable`] so callers can attach a remediation hint;
/// everything else is a query failure.
fn classify(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Configuration(_) => StoreError::Unavailable(err.to_string()),
        other => {
            tracing::error!(error = %other, "Document store query failed");
            StoreError::Query(err.to_string())
        }
    }
}
