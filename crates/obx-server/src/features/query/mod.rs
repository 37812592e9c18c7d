//! Version-dispatched protocol query endpoint
//!
//! `POST /query?version=<semver>` parses the requested version and delegates
//! to the matching protocol-handler variant via [`crate::protocol`]. The
//! route itself inspects nothing beyond the version parameter.

pub mod routes;

pub use routes::query_routes;
