//! Identifier translation endpoints
//!
//! Bidirectional batch translation between Biolink CURIEs and OMOP concept
//! ids:
//!
//! - `POST /biolink_to_omop` runs entirely against the local cross-reference
//!   table
//! - `POST /omop_to_biolink` chains the concept definition store, reverse
//!   mapping, and one batched remote normalization call
//!
//! Both endpoints treat lookup misses as `null` values and never fail a
//! batch because of individual elements.

pub mod queries;
pub mod routes;

pub use routes::translate_routes;
