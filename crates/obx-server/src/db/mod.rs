//! Database access: pool construction and the concept definition store
//!
//! The concept definition store holds the OMOP vocabulary rows this service
//! reads (domain and concept class drive the category hint in reverse
//! translation). It is populated by an external ETL and treated as read-only
//! here.

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Database operation errors with contextual information
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Database configuration is invalid or missing
    #[error("Database configuration error: {0}. Check DATABASE_URL and connection settings.")]
    Config(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Create the PostgreSQL connection pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> DbResult<PgPool> {
    if config.url.is_empty() {
        return Err(DbError::Config("DATABASE_URL not set".to_string()));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await?;

    Ok(pool)
}

/// Definition of a single OMOP concept from the vocabulary store
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ConceptDefinition {
    pub concept_id: i64,
    pub concept_name: String,
    pub domain_id: String,
    pub concept_class_id: String,
}

/// Fetch definitions for a batch of OMOP concept ids in a single query.
///
/// Ids unknown to the store are simply missing from the returned map; the
/// caller treats absence as "no definition", not as an error.
pub async fn concept_definitions(
    pool: &PgPool,
    ids: &[i64],
) -> DbResult<HashMap<i64, ConceptDefinition>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<ConceptDefinition> = sqlx::query_as(
        r#"
        SELECT concept_id, concept_name, domain_id, concept_class_id
        FROM concepts
        WHERE concept_id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|def| (def.concept_id, def)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        let config = DatabaseConfig {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        };

        let result = tokio_test::block_on(create_pool(&config));
        assert!(matches!(result, Err(DbError::Config(_))));
    }
}
