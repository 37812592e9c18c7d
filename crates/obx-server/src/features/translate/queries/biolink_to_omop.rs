//! Forward translation: Biolink CURIEs to OMOP concepts

use serde_json::Value;
use std::collections::HashMap;

use crate::error::AppError;
use crate::mapping::{ConceptMapper, OmopMapping};

/// Extract and validate the `curies` field of the request body.
///
/// The body must carry a `curies` list of strings; anything else is a
/// client error with the endpoint's fixed diagnostic text.
pub fn parse_curies(body: &Value) -> Result<Vec<String>, AppError> {
    let items = body
        .get("curies")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::BadRequest("Bad request".to_string()))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(String::from)
                .ok_or_else(|| AppError::BadRequest("Bad request".to_string()))
        })
        .collect()
}

/// Translate the batch against the cross-reference table.
///
/// Purely local: no normalization call happens on this path.
#[tracing::instrument(skip(mapper, curies), fields(batch_size = curies.len()))]
pub fn handle(mapper: &ConceptMapper, curies: &[String]) -> HashMap<String, Option<OmopMapping>> {
    mapper.map_to_omop(curies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::XrefEntry;
    use serde_json::json;

    fn mapper() -> ConceptMapper {
        ConceptMapper::from_entries(vec![XrefEntry {
            curie: "MONDO:0001187".to_string(),
            omop_concept_id: 197508,
            omop_concept_name: "Malignant tumor of urinary bladder".to_string(),
            biolink_category: "biolink:DiseaseOrPhenotypicFeature".to_string(),
            distance: 2,
        }])
    }

    #[test]
    fn test_parse_valid_body() {
        let body = json!({ "curies": ["MONDO:0001187", "CHEBI:6801"] });
        let curies = parse_curies(&body).unwrap();
        assert_eq!(curies, vec!["MONDO:0001187", "CHEBI:6801"]);
    }

    #[test]
    fn test_parse_missing_curies_is_client_error() {
        assert!(parse_curies(&json!({})).is_err());
        assert!(parse_curies(&json!({ "curies": null })).is_err());
    }

    #[test]
    fn test_parse_non_list_curies_is_client_error() {
        assert!(parse_curies(&json!({ "curies": "MONDO:0001187" })).is_err());
        assert!(parse_curies(&json!({ "curies": 42 })).is_err());
    }

    #[test]
    fn test_parse_non_string_element_is_client_error() {
        assert!(parse_curies(&json!({ "curies": ["MONDO:0001187", 42] })).is_err());
    }

    #[test]
    fn test_empty_batch_yields_empty_mapping() {
        let result = handle(&mapper(), &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_unknown_curie_maps_to_null_not_error() {
        let result = handle(&mapper(), &["HP:0000001".to_string()]);
        assert_eq!(result.len(), 1);
        assert!(result["HP:0000001"].is_none());
    }

    #[test]
    fn test_known_curie_maps_to_concept() {
        let result = handle(&mapper(), &["MONDO:0001187".to_string()]);
        let mapping = result["MONDO:0001187"].as_ref().unwrap();
        assert_eq!(mapping.omop_concept_id, 197508);
        assert_eq!(mapping.distance, 2);
    }

    #[test]
    fn test_serialized_shape() {
        let result = handle(&mapper(), &["MONDO:0001187".to_string()]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["MONDO:0001187"]["omop_concept_id"], 197508);
        assert_eq!(json["MONDO:0001187"]["distance"], 2);
        assert_eq!(
            json["MONDO:0001187"]["omop_concept_name"],
            "Malignant tumor of urinary bladder"
        );
    }
}
