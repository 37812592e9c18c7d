//! OBX Server Library
//!
//! HTTP translation layer between Biolink CURIEs and OMOP concept ids.
//!
//! # Overview
//!
//! The OBX server sits in front of a biomedical knowledge-query engine and
//! provides:
//!
//! - **Protocol Dispatch**: `POST /query?version=<semver>` routes each
//!   request to the protocol-handler variant whose version range contains
//!   the requested semantic version
//! - **Identifier Translation**: `POST /biolink_to_omop` and
//!   `POST /omop_to_biolink` translate identifier batches between the two
//!   coding systems
//! - **Capability Declaration**: `GET /predicates` publishes the static map
//!   of supported relationship predicates
//!
//! # Architecture
//!
//! Translation chains two lookups:
//!
//! 1. **Concept Mapper** (local): a cross-reference table loaded once from
//!    PostgreSQL at startup and held read-only in memory
//! 2. **Node Normalizer** (remote): an external authority queried with one
//!    batched HTTP call per translation request
//!
//! Lookup misses are not errors anywhere in this pipeline: an identifier
//! with no mapping or no normalization is reported as `null`, and a failed
//! normalizer call degrades the whole batch to `null` values instead of
//! failing the request.
//!
//! ## Framework Stack
//!
//! - **Axum**: HTTP routing and extraction
//! - **SQLx**: PostgreSQL access for the concept definition store
//! - **Reqwest**: client for the remote normalization authority
//!
//! The binary in `main.rs` wires these together: logging, configuration,
//! pool + migrations, the concept mapper, and [`api::create_router`].

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod mapping;
pub mod middleware;
pub mod normalizer;
pub mod protocol;

// Re-export commonly used types
pub use error::{AppError, AppResult};
