//! Feature modules implementing the OBX API
//!
//! Each feature is a vertical slice with its own routes and query handlers:
//!
//! - **predicates**: static capability declaration
//! - **query**: version-dispatched protocol endpoint
//! - **translate**: bidirectional identifier translation
//!
//! The endpoint paths are fixed by the protocol contract, so feature routes
//! mount at the router root rather than under an API version prefix.

pub mod predicates;
pub mod query;
pub mod translate;

use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;

use crate::mapping::ConceptMapper;
use crate::normalizer::NodeNormalizerClient;
use crate::protocol::ProtocolRegistry;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// PostgreSQL connection pool for the concept definition store
    pub db: PgPool,
    /// Cross-reference table, loaded once at startup and read-only
    pub mapper: Arc<ConceptMapper>,
    /// Client for the remote node-normalization authority
    pub normalizer: NodeNormalizerClient,
    /// Registered protocol-handler variants
    pub registry: Arc<ProtocolRegistry>,
    /// Version substituted when a query request omits `?version=`
    pub default_version: String,
}

/// Creates the main API router with all feature routes mounted
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .merge(predicates::predicates_routes())
        .merge(query::query_routes())
        .merge(translate::translate_routes())
        .with_state(state)
}
