//! Discriminated concept identifiers
//!
//! Translation requests mix OMOP concept ids (positive integers) and Biolink
//! CURIEs (prefixed strings such as `MONDO:0001187`), often encoded
//! inconsistently: bare integers, numeric strings, or `OMOP:`-prefixed
//! strings with arbitrary prefix casing. [`ConceptIdentifier`] makes the
//! coercion rules exhaustive instead of scattering type checks through the
//! request handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::OMOP_CURIE_PREFIX;

/// An identifier in either of the two coding systems the service translates
/// between.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConceptIdentifier {
    /// An OMOP concept id (always positive)
    Omop(i64),
    /// A Biolink CURIE, e.g. `MONDO:0001187`
    Curie(String),
}

impl ConceptIdentifier {
    /// Coerce a JSON value into an identifier.
    ///
    /// Accepted encodings:
    /// - positive integer -> OMOP id
    /// - numeric string -> OMOP id
    /// - `OMOP:<digits>` string, prefix case-insensitive -> OMOP id
    /// - any other prefixed string -> CURIE
    ///
    /// Everything else (floats, negative numbers, booleans, objects, bare
    /// non-numeric strings) yields `None`. Callers drop such elements from
    /// the batch rather than failing it.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().filter(|id| *id > 0).map(Self::Omop),
            Value::String(s) => Self::from_str_repr(s),
            _ => None,
        }
    }

    /// Coerce a string representation into an identifier.
    pub fn from_str_repr(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        // Recognized OMOP prefix is case-insensitive; the remainder must be
        // a plain positive integer. Compare raw bytes so inputs with
        // multi-byte characters around the prefix length cannot split a
        // character; a matched prefix is all ASCII, so slicing past it is
        // always on a char boundary.
        let bytes = s.as_bytes();
        if bytes.len() >= OMOP_CURIE_PREFIX.len()
            && bytes[..OMOP_CURIE_PREFIX.len()].eq_ignore_ascii_case(OMOP_CURIE_PREFIX.as_bytes())
        {
            return parse_omop_id(&s[OMOP_CURIE_PREFIX.len()..]).map(Self::Omop);
        }

        if let Some(id) = parse_omop_id(s) {
            return Some(Self::Omop(id));
        }

        if s.contains(':') {
            return Some(Self::Curie(s.to_string()));
        }

        None
    }

    /// The OMOP concept id, if this identifier is in OMOP space.
    pub fn as_omop_id(&self) -> Option<i64> {
        match self {
            Self::Omop(id) => Some(*id),
            Self::Curie(_) => None,
        }
    }

    /// The CURIE string, if this identifier is in Biolink space.
    pub fn as_curie(&self) -> Option<&str> {
        match self {
            Self::Omop(_) => None,
            Self::Curie(curie) => Some(curie),
        }
    }
}

impl std::fmt::Display for ConceptIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Omop(id) => write!(f, "{}{}", OMOP_CURIE_PREFIX, id),
            Self::Curie(curie) => write!(f, "{}", curie),
        }
    }
}

fn parse_omop_id(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_integer() {
        assert_eq!(
            ConceptIdentifier::from_json(&json!(123)),
            Some(ConceptIdentifier::Omop(123))
        );
    }

    #[test]
    fn test_coerce_numeric_string() {
        assert_eq!(
            ConceptIdentifier::from_json(&json!("123")),
            Some(ConceptIdentifier::Omop(123))
        );
    }

    #[test]
    fn test_coerce_omop_prefix_case_insensitive() {
        for repr in ["OMOP:123", "omop:123", "Omop:123"] {
            assert_eq!(
                ConceptIdentifier::from_json(&json!(repr)),
                Some(ConceptIdentifier::Omop(123)),
                "failed for {repr}"
            );
        }
    }

    #[test]
    fn test_all_encodings_agree() {
        let ids: Vec<_> = [json!(123), json!("123"), json!("OMOP:123"), json!("omop:123")]
            .iter()
            .filter_map(ConceptIdentifier::from_json)
            .filter_map(|id| id.as_omop_id())
            .collect();
        assert_eq!(ids, vec![123, 123, 123, 123]);
    }

    #[test]
    fn test_non_coercible_dropped() {
        assert_eq!(ConceptIdentifier::from_json(&json!("not-a-number")), None);
        assert_eq!(ConceptIdentifier::from_json(&json!("OMOP:abc")), None);
        assert_eq!(ConceptIdentifier::from_json(&json!("")), None);
        assert_eq!(ConceptIdentifier::from_json(&json!(1.5)), None);
        assert_eq!(ConceptIdentifier::from_json(&json!(-5)), None);
        assert_eq!(ConceptIdentifier::from_json(&json!(0)), None);
        assert_eq!(ConceptIdentifier::from_json(&json!(true)), None);
        assert_eq!(ConceptIdentifier::from_json(&json!(null)), None);
    }

    #[test]
    fn test_multibyte_input_dropped_without_panic() {
        // Characters wider than one byte near the prefix length must not
        // split the string mid-character
        assert_eq!(ConceptIdentifier::from_str_repr("ddddé"), None);
        assert_eq!(ConceptIdentifier::from_str_repr("ommméd"), None);
        assert_eq!(ConceptIdentifier::from_str_repr("OMOP:é"), None);
        assert_eq!(ConceptIdentifier::from_str_repr("é"), None);
    }

    #[test]
    fn test_multibyte_curie_passthrough() {
        assert_eq!(
            ConceptIdentifier::from_str_repr("préfix:0001"),
            Some(ConceptIdentifier::Curie("préfix:0001".to_string()))
        );
    }

    #[test]
    fn test_curie_passthrough() {
        assert_eq!(
            ConceptIdentifier::from_json(&json!("MONDO:0001187")),
            Some(ConceptIdentifier::Curie("MONDO:0001187".to_string()))
        );
    }

    #[test]
    fn test_omop_id_from_curie_is_none() {
        let id = ConceptIdentifier::Curie("MONDO:0001187".to_string());
        assert_eq!(id.as_omop_id(), None);
        assert_eq!(id.as_curie(), Some("MONDO:0001187"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ConceptIdentifier::Omop(197508).to_string(), "OMOP:197508");
        assert_eq!(
            ConceptIdentifier::Curie("MONDO:0001187".to_string()).to_string(),
            "MONDO:0001187"
        );
    }
}
