//! Node Normalizer client
//!
//! Client for the remote node-normalization authority, which resolves a
//! Biolink CURIE to its canonical preferred identifier and equivalent
//! identifiers. All CURIEs of one translation request go out in a single
//! batched call so the number of outbound requests is bounded at one
//! regardless of batch size.
//!
//! Remote failure is absorbed here: any transport error, non-success status,
//! or malformed body degrades the whole batch to "no normalization
//! available" instead of surfacing an error to the request.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::NormalizerConfig;

const USER_AGENT: &str = concat!("obx-server/", env!("CARGO_PKG_VERSION"));

/// An identifier with its optional human-readable label, as the authority
/// reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdentifier {
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Normalization result for one CURIE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedNode {
    /// Canonical preferred identifier
    pub id: NodeIdentifier,
    /// All identifiers the authority considers equivalent
    #[serde(default)]
    pub equivalent_identifiers: Vec<NodeIdentifier>,
    /// Biolink categories of the node
    #[serde(rename = "type", default)]
    pub categories: Vec<String>,
}

#[derive(Error, Debug)]
enum NormalizerError {
    #[error("Normalizer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Normalizer responded with status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    curies: &'a [String],
}

/// HTTP client for the node-normalization authority.
#[derive(Debug, Clone)]
pub struct NodeNormalizerClient {
    client: Client,
    base_url: String,
}

impl NodeNormalizerClient {
    pub fn new(config: &NormalizerConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Normalize a batch of CURIEs with one remote call.
    ///
    /// Every input CURIE is a key of the returned map. CURIEs unknown to the
    /// authority map to `None`, and a failed call maps the whole batch to
    /// `None`. This method never errors; absence is the uniform "no answer"
    /// signal.
    pub async fn get_normalized_nodes(
        &self,
        curies: &[String],
    ) -> HashMap<String, Option<NormalizedNode>> {
        if curies.is_empty() {
            return HashMap::new();
        }

        match self.fetch_batch(curies).await {
            Ok(mut nodes) => curies
                .iter()
                .map(|curie| {
                    let node = nodes.remove(curie).flatten();
                    (curie.clone(), node)
                })
                .collect(),
            Err(err) => {
                warn!(
                    batch_size = curies.len(),
                    error = %err,
                    "Node normalization unavailable, degrading batch to absent results"
                );
                curies.iter().map(|curie| (curie.clone(), None)).collect()
            },
        }
    }

    async fn fetch_batch(
        &self,
        curies: &[String],
    ) -> Result<HashMap<String, Option<NormalizedNode>>, NormalizerError> {
        let url = format!("{}/get_normalized_nodes", self.base_url);
        debug!(batch_size = curies.len(), url = %url, "Requesting node normalization");

        let response = self
            .client
            .post(&url)
            .json(&BatchRequest { curies })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NormalizerError::Status(response.status()));
        }

        let nodes = response
            .json::<HashMap<String, Option<NormalizedNode>>>()
            .await?;

        Ok(nodes)
    }
}
