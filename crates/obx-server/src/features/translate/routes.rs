use axum::{extract::State, routing::post, Json, Router};
use serde_json::Value;
use std::collections::HashMap;

use crate::db;
use crate::error::AppError;
use crate::features::FeatureState;
use crate::mapping::OmopMapping;
use crate::normalizer::NormalizedNode;

use super::queries::{biolink_to_omop, omop_to_biolink};

pub fn translate_routes() -> Router<FeatureState> {
    Router::new()
        .route("/biolink_to_omop", post(biolink_to_omop_handler))
        .route("/omop_to_biolink", post(omop_to_biolink_handler))
}

#[tracing::instrument(skip(state, body))]
async fn biolink_to_omop_handler(
    State(state): State<FeatureState>,
    Json(body): Json<Value>,
) -> Result<Json<HashMap<String, Option<OmopMapping>>>, AppError> {
    let curies = biolink_to_omop::parse_curies(&body)?;
    let mappings = biolink_to_omop::handle(&state.mapper, &curies);

    tracing::debug!(
        requested = curies.len(),
        resolved = mappings.values().filter(|m| m.is_some()).count(),
        "Translated Biolink batch"
    );

    Ok(Json(mappings))
}

#[tracing::instrument(skip(state, body))]
async fn omop_to_biolink_handler(
    State(state): State<FeatureState>,
    Json(body): Json<Value>,
) -> Result<Json<HashMap<String, Option<NormalizedNode>>>, AppError> {
    let raw_ids = omop_to_biolink::parse_omop_ids(&body)?;
    let ids = omop_to_biolink::coerce_ids(raw_ids);

    let definitions = db::concept_definitions(&state.db, &ids).await?;
    let normalized =
        omop_to_biolink::handle(&state.mapper, &state.normalizer, &ids, &definitions).await;

    tracing::debug!(
        requested = raw_ids.len(),
        coerced = ids.len(),
        resolved = normalized.values().filter(|n| n.is_some()).count(),
        "Translated OMOP batch"
    );

    Ok(Json(normalized))
}
