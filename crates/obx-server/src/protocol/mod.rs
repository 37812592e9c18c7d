//! Protocol version dispatch
//!
//! The query endpoint speaks several protocol versions at once. Each handler
//! variant is registered against a semantic-version matcher, and dispatch
//! walks the registrations in priority order, delegating to the first one
//! whose matcher contains the requested version. Version comparison follows
//! SemVer precedence, so `1.0.0-beta` sorts below `1.0.0` and still lands in
//! a range whose inclusive lower bound is `1.0.0-beta`.
//!
//! The registry is built once at startup and never mutated; adding a future
//! protocol version is a pure data change here.

pub mod handlers;

use semver::Version;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::mapping::ConceptMapper;

pub use handlers::{ProtocolHandler, ReasonerV093Handler, ReasonerV1Handler};

/// How a registration matches requested versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionMatch {
    /// Inclusive lower, exclusive upper: `min <= v < max`
    Range { min: Version, max: Version },
    /// Strict equality, for frozen historical protocol versions
    Exact(Version),
}

impl VersionMatch {
    pub fn contains(&self, version: &Version) -> bool {
        match self {
            VersionMatch::Range { min, max } => min <= version && version < max,
            VersionMatch::Exact(pin) => version == pin,
        }
    }
}

/// One registered protocol-handler variant.
pub struct HandlerRegistration {
    pub matcher: VersionMatch,
    pub handler: Arc<dyn ProtocolHandler>,
}

/// Ordered registry of protocol-handler variants.
pub struct ProtocolRegistry {
    registrations: Vec<HandlerRegistration>,
}

impl ProtocolRegistry {
    /// Registry with the variants this deployment supports: the current
    /// handler for `[1.0.0-beta, 1.1.0)` and the frozen legacy handler
    /// pinned to exactly `0.9.3`.
    pub fn standard(mapper: Arc<ConceptMapper>) -> Self {
        Self {
            registrations: vec![
                HandlerRegistration {
                    matcher: VersionMatch::Range {
                        min: Version::parse("1.0.0-beta").expect("static version"),
                        max: Version::parse("1.1.0").expect("static version"),
                    },
                    handler: Arc::new(ReasonerV1Handler::new(mapper.clone())),
                },
                HandlerRegistration {
                    matcher: VersionMatch::Exact(Version::parse("0.9.3").expect("static version")),
                    handler: Arc::new(ReasonerV093Handler::new(mapper)),
                },
            ],
        }
    }

    /// Registry from explicit registrations, in priority order.
    pub fn new(registrations: Vec<HandlerRegistration>) -> Self {
        Self { registrations }
    }

    /// First registered handler whose matcher contains `version`.
    pub fn resolve(&self, version: &Version) -> Option<&dyn ProtocolHandler> {
        self.registrations
            .iter()
            .find(|reg| reg.matcher.contains(version))
            .map(|reg| reg.handler.as_ref())
    }

    /// Parse the requested version, select the handler variant, and delegate.
    ///
    /// A missing version string falls back to `default_version`. A string
    /// that is not a semantic version is a client error; a valid version no
    /// variant covers is an unsupported-version error. The selected
    /// handler's response is returned verbatim.
    #[tracing::instrument(skip(self, request))]
    pub async fn dispatch(
        &self,
        requested: Option<&str>,
        default_version: &str,
        request: Value,
    ) -> AppResult<Value> {
        let raw = requested.unwrap_or(default_version);

        let version = Version::parse(raw)
            .map_err(|_| AppError::MalformedVersion(raw.to_string()))?;

        let handler = self
            .resolve(&version)
            .ok_or_else(|| AppError::UnsupportedVersion(version.to_string()))?;

        tracing::debug!(version = %version, handler = handler.name(), "Dispatching query");

        handler.operate(request).await
    }
}
