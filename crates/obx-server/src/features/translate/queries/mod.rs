pub mod biolink_to_omop;
pub mod omop_to_biolink;
