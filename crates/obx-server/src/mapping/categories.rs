//! OMOP domain to Biolink category mapping
//!
//! The concept definition store records an OMOP domain and concept class for
//! every concept. Reverse translation turns that pair into a Biolink category
//! hint so the mapper can prefer cross-references of the matching kind.

/// Fallback category when the domain is unrecognized.
pub const DEFAULT_CATEGORY: &str = "biolink:NamedThing";

/// Derive a Biolink category from an OMOP domain and concept class.
///
/// The drug domain is split: ingredient-level concepts are chemical
/// substances, while clinical drug products stay drugs.
pub fn map_omop_domain_to_category(domain_id: &str, concept_class_id: &str) -> &'static str {
    match domain_id {
        "Condition" => "biolink:DiseaseOrPhenotypicFeature",
        "Drug" => {
            if concept_class_id == "Ingredient" {
                "biolink:ChemicalSubstance"
            } else {
                "biolink:Drug"
            }
        },
        "Procedure" => "biolink:Procedure",
        "Device" => "biolink:Device",
        "Ethnicity" | "Gender" | "Race" => "biolink:PopulationOfIndividualOrganisms",
        _ => DEFAULT_CATEGORY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_maps_to_disease() {
        assert_eq!(
            map_omop_domain_to_category("Condition", "Clinical Finding"),
            "biolink:DiseaseOrPhenotypicFeature"
        );
    }

    #[test]
    fn test_drug_ingredient_split() {
        assert_eq!(
            map_omop_domain_to_category("Drug", "Ingredient"),
            "biolink:ChemicalSubstance"
        );
        assert_eq!(
            map_omop_domain_to_category("Drug", "Clinical Drug"),
            "biolink:Drug"
        );
    }

    #[test]
    fn test_unknown_domain_falls_back() {
        assert_eq!(
            map_omop_domain_to_category("Metadata", "Unknown"),
            DEFAULT_CATEGORY
        );
    }
}
