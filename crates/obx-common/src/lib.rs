//! OBX Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the OBX project.
//!
//! # Overview
//!
//! This crate provides common functionality used across all OBX workspace members:
//!
//! - **Logging**: Centralized tracing-subscriber initialization
//! - **Types**: Shared domain types, notably the [`types::ConceptIdentifier`]
//!   discriminated identifier used throughout the translation pipeline
//!
//! # Example
//!
//! ```no_run
//! use obx_common::types::ConceptIdentifier;
//!
//! let id = ConceptIdentifier::from_json(&serde_json::json!("OMOP:197508"));
//! assert_eq!(id.and_then(|i| i.as_omop_id()), Some(197508));
//! ```

pub mod logging;
pub mod types;
