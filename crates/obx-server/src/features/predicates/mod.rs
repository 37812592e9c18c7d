//! Capability declaration
//!
//! `GET /predicates` publishes the static map of supported relationship
//! predicates between entity categories. The content is constant data: every
//! supported source category relates to every supported target category
//! through the correlation predicate.

pub mod routes;

pub use routes::predicates_routes;

use serde_json::{json, Map, Value};
use std::sync::OnceLock;

/// Entity categories this service can relate.
pub const SUPPORTED_CATEGORIES: [&str; 5] = [
    "biolink:ChemicalSubstance",
    "biolink:DiseaseOrPhenotypicFeature",
    "biolink:Drug",
    "biolink:Procedure",
    "biolink:PopulationOfIndividualOrganisms",
];

/// The single predicate the correlation engine supports.
pub const CORRELATION_PREDICATE: &str = "biolink:correlated_with";

/// The capability map, built once.
pub fn capability_map() -> &'static Value {
    static MAP: OnceLock<Value> = OnceLock::new();
    MAP.get_or_init(|| {
        let mut sources = Map::new();
        for source in SUPPORTED_CATEGORIES {
            let mut targets = Map::new();
            for target in SUPPORTED_CATEGORIES {
                targets.insert(target.to_string(), json!([CORRELATION_PREDICATE]));
            }
            sources.insert(source.to_string(), Value::Object(targets));
        }
        Value::Object(sources)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_map_is_complete() {
        let map = capability_map().as_object().unwrap();
        assert_eq!(map.len(), SUPPORTED_CATEGORIES.len());

        for source in SUPPORTED_CATEGORIES {
            let targets = map[source].as_object().unwrap();
            assert_eq!(targets.len(), SUPPORTED_CATEGORIES.len());
            for target in SUPPORTED_CATEGORIES {
                assert_eq!(targets[target], json!([CORRELATION_PREDICATE]));
            }
        }
    }

    #[test]
    fn test_capability_map_is_stable() {
        // OnceLock means repeated calls observe identical content
        assert_eq!(capability_map(), capability_map());
    }
}
