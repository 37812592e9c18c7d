//! Protocol handler variants
//!
//! Each variant implements the query contract for one protocol version
//! range. The statistical correlation engine behind these handlers is an
//! external collaborator; the variants here own the translation-layer part
//! of query handling: validating the version-specific envelope, resolving
//! the query graph's CURIEs to OMOP concepts, and answering in that
//! version's response shape.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::mapping::ConceptMapper;

/// The query contract implemented by every protocol-handler variant.
#[async_trait]
pub trait ProtocolHandler: Send + Sync {
    /// Stable variant name for logging and dispatch tests.
    fn name(&self) -> &'static str;

    /// Handle one protocol request and produce the version-specific
    /// response body.
    async fn operate(&self, request: Value) -> AppResult<Value>;
}

/// Handler for protocol versions `[1.0.0-beta, 1.1.0)`.
///
/// Request envelope: `{"message": {"query_graph": {"nodes": {...},
/// "edges": {...}}}}` where nodes carry an `ids` list of CURIEs.
pub struct ReasonerV1Handler {
    mapper: Arc<ConceptMapper>,
}

impl ReasonerV1Handler {
    pub fn new(mapper: Arc<ConceptMapper>) -> Self {
        Self { mapper }
    }

    fn node_curies(query_graph: &Value) -> Vec<String> {
        let mut curies = Vec::new();
        if let Some(nodes) = query_graph.get("nodes").and_then(Value::as_object) {
            for node in nodes.values() {
                if let Some(ids) = node.get("ids").and_then(Value::as_array) {
                    curies.extend(ids.iter().filter_map(Value::as_str).map(String::from));
                }
            }
        }
        curies
    }
}

#[async_trait]
impl ProtocolHandler for ReasonerV1Handler {
    fn name(&self) -> &'static str {
        "reasoner-1.0"
    }

    async fn operate(&self, request: Value) -> AppResult<Value> {
        let query_graph = request
            .get("message")
            .and_then(|m| m.get("query_graph"))
            .filter(|qg| {
                qg.get("nodes").map_or(false, Value::is_object)
                    && qg.get("edges").map_or(false, Value::is_object)
            })
            .cloned()
            .ok_or_else(|| AppError::BadRequest("Bad request".to_string()))?;

        let curies = Self::node_curies(&query_graph);
        let mappings = self.mapper.map_to_omop(&curies);

        let mut kg_nodes = Map::new();
        for (curie, mapping) in mappings {
            if let Some(mapping) = mapping {
                kg_nodes.insert(
                    curie,
                    json!({
                        "name": mapping.omop_concept_name,
                        "attributes": [{
                            "attribute_type_id": "OMOP:concept_id",
                            "value": mapping.omop_concept_id,
                        }],
                    }),
                );
            }
        }

        Ok(json!({
            "message": {
                "query_graph": query_graph,
                "knowledge_graph": {
                    "nodes": kg_nodes,
                    "edges": {},
                },
                "results": [],
            }
        }))
    }
}

/// Frozen legacy handler, pinned to exactly protocol version `0.9.3`.
///
/// The historical envelope nests the query graph under `query_message` and
/// represents nodes as a list of `{node_id, curie}` objects; the response is
/// flat rather than wrapped in `message`.
pub struct ReasonerV093Handler {
    mapper: Arc<ConceptMapper>,
}

impl ReasonerV093Handler {
    pub fn new(mapper: Arc<ConceptMapper>) -> Self {
        Self { mapper }
    }

    fn node_curies(query_graph: &Value) -> Vec<String> {
        query_graph
            .get("nodes")
            .and_then(Value::as_array)
            .map(|nodes| {
                nodes
                    .iter()
                    .filter_map(|node| node.get("curie").and_then(Value::as_str))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProtocolHandler for ReasonerV093Handler {
    fn name(&self) -> &'static str {
        "reasoner-0.9.3"
    }

    async fn operate(&self, request: Value) -> AppResult<Value> {
        let query_graph = request
            .get("query_message")
            .and_then(|m| m.get("query_graph"))
            .filter(|qg| {
                qg.get("nodes").map_or(false, Value::is_array)
                    && qg.get("edges").map_or(false, Value::is_array)
            })
            .cloned()
            .ok_or_else(|| AppError::BadRequest("Bad request".to_string()))?;

        let curies = Self::node_curies(&query_graph);
        let mappings = self.mapper.map_to_omop(&curies);

        let kg_nodes: Vec<Value> = curies
            .iter()
            .filter_map(|curie| {
                mappings.get(curie).and_then(|m| m.as_ref()).map(|mapping| {
                    json!({
                        "id": curie,
                        "name": mapping.omop_concept_name,
                        "omop_concept_id": mapping.omop_concept_id,
                    })
                })
            })
            .collect();

        Ok(json!({
            "query_graph": query_graph,
            "knowledge_graph": {
                "nodes": kg_nodes,
                "edges": [],
            },
            "results": [],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::XrefEntry;

    fn mapper() -> Arc<ConceptMapper> {
        Arc::new(ConceptMapper::from_entries(vec![XrefEntry {
            curie: "MONDO:0001187".to_string(),
            omop_concept_id: 197508,
            omop_concept_name: "Malignant tumor of urinary bladder".to_string(),
            biolink_category: "biolink:DiseaseOrPhenotypicFeature".to_string(),
            distance: 2,
        }]))
    }

    #[tokio::test]
    async fn test_v1_resolves_query_graph_curies() {
        let handler = ReasonerV1Handler::new(mapper());
        let request = json!({
            "message": {
                "query_graph": {
                    "nodes": {
                        "n00": { "ids": ["MONDO:0001187"], "categories": ["biolink:DiseaseOrPhenotypicFeature"] },
                        "n01": { "categories": ["biolink:Drug"] }
                    },
                    "edges": {
                        "e00": { "subject": "n00", "object": "n01", "predicates": ["biolink:correlated_with"] }
                    }
                }
            }
        });

        let response = handler.operate(request).await.unwrap();
        let node = &response["message"]["knowledge_graph"]["nodes"]["MONDO:0001187"];
        assert_eq!(node["name"], "Malignant tumor of urinary bladder");
        assert_eq!(node["attributes"][0]["value"], 197508);
        // the query graph comes back verbatim
        assert_eq!(
            response["message"]["query_graph"]["edges"]["e00"]["subject"],
            "n00"
        );
    }

    #[tokio::test]
    async fn test_v1_missing_query_graph_is_bad_request() {
        let handler = ReasonerV1Handler::new(mapper());
        let result = handler.operate(json!({ "message": {} })).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_v1_wrong_envelope_shape_is_bad_request() {
        let handler = ReasonerV1Handler::new(mapper());
        // 0.9.3-style list nodes are not a valid 1.0 envelope
        let result = handler
            .operate(json!({
                "message": { "query_graph": { "nodes": [], "edges": [] } }
            }))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_legacy_envelope() {
        let handler = ReasonerV093Handler::new(mapper());
        let request = json!({
            "query_message": {
                "query_graph": {
                    "nodes": [
                        { "node_id": "n00", "curie": "MONDO:0001187" },
                        { "node_id": "n01" }
                    ],
                    "edges": [
                        { "edge_id": "e00", "source_id": "n00", "target_id": "n01" }
                    ]
                }
            }
        });

        let response = handler.operate(request).await.unwrap();
        assert_eq!(response["knowledge_graph"]["nodes"][0]["omop_concept_id"], 197508);
        assert!(response.get("message").is_none());
    }

    #[tokio::test]
    async fn test_legacy_missing_envelope_is_bad_request() {
        let handler = ReasonerV093Handler::new(mapper());
        let result = handler.operate(json!({})).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_v1_unknown_curie_omitted_from_knowledge_graph() {
        let handler = ReasonerV1Handler::new(mapper());
        let request = json!({
            "message": {
                "query_graph": {
                    "nodes": { "n00": { "ids": ["HP:0000001"] } },
                    "edges": {}
                }
            }
        });

        let response = handler.operate(request).await.unwrap();
        assert!(response["message"]["knowledge_graph"]["nodes"]
            .as_object()
            .unwrap()
            .is_empty());
    }
}
