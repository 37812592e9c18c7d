//! Common types used across OBX

mod identifier;

pub use identifier::ConceptIdentifier;

/// Prefix marking an OMOP concept id in CURIE notation, matched
/// case-insensitively on input.
pub const OMOP_CURIE_PREFIX: &str = "OMOP:";
