//! Reverse translation: OMOP concept ids to normalized Biolink nodes
//!
//! Pipeline per request: coerce the heterogeneous input list to distinct
//! integer ids, look up concept definitions in one batched query, derive a
//! category hint per id, reverse-map through the cross-reference table, then
//! normalize all distinct target CURIEs with exactly one remote call.

use serde_json::Value;
use std::collections::{BTreeSet, HashMap, HashSet};

use obx_common::types::ConceptIdentifier;

use crate::db::ConceptDefinition;
use crate::error::AppError;
use crate::mapping::{map_omop_domain_to_category, ConceptMapper, CurieMapping};
use crate::normalizer::{NodeNormalizerClient, NormalizedNode};

/// Extract and validate the `omop_ids` field of the request body.
pub fn parse_omop_ids(body: &Value) -> Result<&Vec<Value>, AppError> {
    body.get("omop_ids")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::BadRequest("Bad request".to_string()))
}

/// Coerce raw batch elements to distinct OMOP ids, preserving first-seen
/// order. Non-coercible elements are dropped silently; duplicates collapse.
pub fn coerce_ids(values: &[Value]) -> Vec<i64> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter_map(ConceptIdentifier::from_json)
        .filter_map(|id| id.as_omop_id())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Run the translation pipeline for a batch of coerced ids.
///
/// Every id gets an output entry keyed by its decimal string. The value is
/// the normalized node for the reverse-mapped CURIE, or `null` when the id
/// has no definition, no cross-reference, or no normalization.
#[tracing::instrument(skip_all, fields(batch_size = ids.len()))]
pub async fn handle(
    mapper: &ConceptMapper,
    normalizer: &NodeNormalizerClient,
    ids: &[i64],
    definitions: &HashMap<i64, ConceptDefinition>,
) -> HashMap<String, Option<NormalizedNode>> {
    let mut mappings: HashMap<i64, Option<CurieMapping>> = HashMap::with_capacity(ids.len());
    for &id in ids {
        let mapping = definitions.get(&id).and_then(|def| {
            let hint = map_omop_domain_to_category(&def.domain_id, &def.concept_class_id);
            mapper.map_from_omop(id, Some(hint))
        });
        mappings.insert(id, mapping);
    }

    // Distinct target CURIEs, ordered for a deterministic outbound batch
    let target_curies: Vec<String> = mappings
        .values()
        .flatten()
        .map(|mapping| mapping.target_curie.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // The single remote call of this request
    let normalized = normalizer.get_normalized_nodes(&target_curies).await;

    ids.iter()
        .map(|id| {
            let node = mappings
                .get(id)
                .and_then(|mapping| mapping.as_ref())
                .and_then(|mapping| normalized.get(&mapping.target_curie))
                .cloned()
                .flatten();
            (id.to_string(), node)
        })
        .collect()
}
