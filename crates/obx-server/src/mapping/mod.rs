//! Concept Mapper: bidirectional Biolink/OMOP cross-referencing
//!
//! The mapper owns the precomputed cross-reference table, loaded once from
//! PostgreSQL at startup and held read-only behind an `Arc` for the life of
//! the process. Lookups never fail: an identifier without a cross-reference
//! resolves to `None`, which every layer above propagates as `null`.

pub mod categories;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

pub use categories::{map_omop_domain_to_category, DEFAULT_CATEGORY};

/// One row of the cross-reference table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct XrefEntry {
    /// Biolink-space identifier
    pub curie: String,
    /// OMOP-space identifier
    pub omop_concept_id: i64,
    /// Human-readable name of the OMOP concept
    pub omop_concept_name: String,
    /// Biolink category of the cross-referenced concept
    pub biolink_category: String,
    /// Categorical mapping distance; smaller is closer
    pub distance: i32,
}

/// Forward translation result (Biolink -> OMOP), in the shape the
/// `/biolink_to_omop` endpoint returns per CURIE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmopMapping {
    pub distance: i32,
    pub omop_concept_id: i64,
    pub omop_concept_name: String,
}

/// Reverse translation result (OMOP -> Biolink): the target CURIE that the
/// normalizer is subsequently asked about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurieMapping {
    pub target_curie: String,
    pub distance: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// In-memory cross-reference table with forward and reverse indexes.
#[derive(Debug, Default)]
pub struct ConceptMapper {
    forward: HashMap<String, Vec<XrefEntry>>,
    reverse: HashMap<i64, Vec<XrefEntry>>,
}

impl ConceptMapper {
    /// Build the mapper from cross-reference rows. Used by [`Self::load`]
    /// and directly by tests.
    pub fn from_entries(entries: Vec<XrefEntry>) -> Self {
        let mut forward: HashMap<String, Vec<XrefEntry>> = HashMap::new();
        let mut reverse: HashMap<i64, Vec<XrefEntry>> = HashMap::new();

        for entry in entries {
            forward
                .entry(entry.curie.clone())
                .or_default()
                .push(entry.clone());
            reverse
                .entry(entry.omop_concept_id)
                .or_default()
                .push(entry);
        }

        Self { forward, reverse }
    }

    /// Load the full cross-reference table from the database.
    pub async fn load(pool: &PgPool) -> sqlx::Result<Self> {
        let entries: Vec<XrefEntry> = sqlx::query_as(
            r#"
            SELECT curie, omop_concept_id, omop_concept_name, biolink_category, distance
            FROM concept_xrefs
            "#,
        )
        .fetch_all(pool)
        .await?;

        tracing::info!(rows = entries.len(), "Loaded concept cross-reference table");

        Ok(Self::from_entries(entries))
    }

    /// Number of distinct CURIEs with at least one cross-reference.
    pub fn curie_count(&self) -> usize {
        self.forward.len()
    }

    /// Translate a batch of Biolink CURIEs to OMOP concepts.
    ///
    /// Every input CURIE appears in the output; unresolvable CURIEs map to
    /// `None`. When several OMOP candidates exist, the one with the smallest
    /// distance wins, then the lowest concept id for determinism.
    pub fn map_to_omop(&self, curies: &[String]) -> HashMap<String, Option<OmopMapping>> {
        curies
            .iter()
            .map(|curie| {
                let best = self
                    .forward
                    .get(curie)
                    .and_then(|candidates| {
                        candidates
                            .iter()
                            .min_by_key(|entry| (entry.distance, entry.omop_concept_id))
                    })
                    .map(|entry| OmopMapping {
                        distance: entry.distance,
                        omop_concept_id: entry.omop_concept_id,
                        omop_concept_name: entry.omop_concept_name.clone(),
                    });
                (curie.clone(), best)
            })
            .collect()
    }

    /// Translate one OMOP concept id to a Biolink CURIE.
    ///
    /// When a category hint is given and at least one candidate carries that
    /// category, only hint-consistent candidates compete; otherwise all
    /// candidates do. Ties break by smallest distance, then lexicographically
    /// smallest CURIE.
    pub fn map_from_omop(&self, omop_id: i64, category_hint: Option<&str>) -> Option<CurieMapping> {
        let candidates = self.reverse.get(&omop_id)?;

        let hinted: Vec<&XrefEntry> = match category_hint {
            Some(hint) if candidates.iter().any(|e| e.biolink_category == hint) => candidates
                .iter()
                .filter(|e| e.biolink_category == hint)
                .collect(),
            _ => candidates.iter().collect(),
        };

        hinted
            .into_iter()
            .min_by(|a, b| {
                a.distance
                    .cmp(&b.distance)
                    .then_with(|| a.curie.cmp(&b.curie))
            })
            .map(|entry| CurieMapping {
                target_curie: entry.curie.clone(),
                distance: entry.distance,
                label: Some(entry.omop_concept_name.clone()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xref(curie: &str, omop_id: i64, name: &str, category: &str, distance: i32) -> XrefEntry {
        XrefEntry {
            curie: curie.to_string(),
            omop_concept_id: omop_id,
            omop_concept_name: name.to_string(),
            biolink_category: category.to_string(),
            distance,
        }
    }

    fn sample_mapper() -> ConceptMapper {
        ConceptMapper::from_entries(vec![
            xref(
                "MONDO:0001187",
                197508,
                "Malignant tumor of urinary bladder",
                "biolink:DiseaseOrPhenotypicFeature",
                2,
            ),
            xref(
                "MONDO:0001187",
                197509,
                "Bladder neoplasm",
                "biolink:DiseaseOrPhenotypicFeature",
                3,
            ),
            xref(
                "CHEBI:6801",
                1503297,
                "metformin",
                "biolink:ChemicalSubstance",
                1,
            ),
            // Same concept reachable through two categories
            xref(
                "RXCUI:6809",
                1503297,
                "metformin",
                "biolink:Drug",
                1,
            ),
        ])
    }

    #[test]
    fn test_forward_known_curie() {
        let mapper = sample_mapper();
        let result = mapper.map_to_omop(&["MONDO:0001187".to_string()]);

        let mapping = result["MONDO:0001187"].as_ref().unwrap();
        assert_eq!(mapping.omop_concept_id, 197508);
        assert_eq!(mapping.distance, 2);
        assert_eq!(mapping.omop_concept_name, "Malignant tumor of urinary bladder");
    }

    #[test]
    fn test_forward_unknown_curie_is_absent_not_error() {
        let mapper = sample_mapper();
        let result = mapper.map_to_omop(&["HP:0000001".to_string()]);

        assert_eq!(result.len(), 1);
        assert!(result["HP:0000001"].is_none());
    }

    #[test]
    fn test_forward_empty_batch() {
        let mapper = sample_mapper();
        assert!(mapper.map_to_omop(&[]).is_empty());
    }

    #[test]
    fn test_forward_tie_break_prefers_distance_then_id() {
        let mapper = ConceptMapper::from_entries(vec![
            xref("MONDO:1", 20, "b", "biolink:DiseaseOrPhenotypicFeature", 1),
            xref("MONDO:1", 10, "a", "biolink:DiseaseOrPhenotypicFeature", 1),
            xref("MONDO:1", 5, "c", "biolink:DiseaseOrPhenotypicFeature", 2),
        ]);

        let result = mapper.map_to_omop(&["MONDO:1".to_string()]);
        let mapping = result["MONDO:1"].as_ref().unwrap();
        // distance 1 beats distance 2; among distance 1, the lower id wins
        assert_eq!(mapping.omop_concept_id, 10);
    }

    #[test]
    fn test_reverse_with_matching_hint() {
        let mapper = sample_mapper();
        let mapping = mapper
            .map_from_omop(1503297, Some("biolink:Drug"))
            .unwrap();
        assert_eq!(mapping.target_curie, "RXCUI:6809");
    }

    #[test]
    fn test_reverse_hint_without_match_falls_back_to_all() {
        let mapper = sample_mapper();
        // No candidate is a Procedure; all candidates compete and the
        // lexicographically smaller CURIE wins the distance tie.
        let mapping = mapper
            .map_from_omop(1503297, Some("biolink:Procedure"))
            .unwrap();
        assert_eq!(mapping.target_curie, "CHEBI:6801");
    }

    #[test]
    fn test_reverse_without_hint() {
        let mapper = sample_mapper();
        let mapping = mapper.map_from_omop(197508, None).unwrap();
        assert_eq!(mapping.target_curie, "MONDO:0001187");
        assert_eq!(mapping.distance, 2);
        assert_eq!(
            mapping.label.as_deref(),
            Some("Malignant tumor of urinary bladder")
        );
    }

    #[test]
    fn test_reverse_unknown_id_is_absent() {
        let mapper = sample_mapper();
        assert!(mapper.map_from_omop(999999, None).is_none());
    }

    #[test]
    fn test_idempotence() {
        let mapper = sample_mapper();
        let curies = vec!["MONDO:0001187".to_string(), "CHEBI:6801".to_string()];
        assert_eq!(mapper.map_to_omop(&curies), mapper.map_to_omop(&curies));
    }
}
