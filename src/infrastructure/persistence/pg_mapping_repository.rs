//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use super::unique_constraint;
use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::db_error::{InsertFault, classify};

#[derive(Debug, sqlx::FromRow)]
struct MappingRow {
    short_code: String,
    long_url: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(row.short_code, row.long_url, row.created_at)
    }
}

/// PostgreSQL repository for mapping storage and retrieval.
///
/// The table name is configurable and always quoted as an identifier; values
/// are always bound as parameters.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
    table: String,
    insert_sql: String,
    select_sql: String,
}

impl PgMappingRepository {
    /// Creates a new repository over `table_name` with a database connection pool.
    pub fn new(pool: Arc<PgPool>, table_name: &str) -> Self {
        let table = quote_identifier(table_name);

        let insert_sql = format!(
            "INSERT INTO {table} (short_code, long_url) VALUES ($1, $2) \
             RETURNING short_code, long_url, created_at"
        );
        let select_sql =
            format!("SELECT short_code, long_url, created_at FROM {table} WHERE short_code = $1");

        Self {
            pool,
            table: table_name.to_string(),
            insert_sql,
            select_sql,
        }
    }

    /// Creates the mapping table and its uniqueness constraints if missing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id BIGSERIAL PRIMARY KEY,
                short_code TEXT NOT NULL,
                long_url TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT {code_key} UNIQUE (short_code),
                CONSTRAINT {url_key} UNIQUE (long_url)
            )
            "#,
            table = quote_identifier(&self.table),
            code_key = quote_identifier(&unique_constraint(&self.table, "short_code")),
            url_key = quote_identifier(&unique_constraint(&self.table, "long_url")),
        );

        sqlx::query(&sql).execute(self.pool.as_ref()).await?;

        tracing::info!(table = %self.table, "Mapping table ready");

        Ok(())
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(&self.insert_sql)
            .bind(&new_mapping.short_code)
            .bind(&new_mapping.long_url)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| match classify(&e) {
                InsertFault::Duplicate { kind, constraint } => AppError::duplicate(
                    kind,
                    e.to_string(),
                    json!({ "constraint": constraint }),
                ),
                InsertFault::Other => AppError::from(e),
            })?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(&self.select_sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

/// Quotes `name` as a PostgreSQL identifier.
///
/// Embedded double quotes are doubled and anything after a NUL byte is
/// dropped, so the result is always a single identifier.
pub fn quote_identifier(name: &str) -> String {
    let name = name.split('\0').next().unwrap_or_default();
    format!("\"{}\"", name.replace('"', "\"\""))
}
