use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::features::FeatureState;

pub fn query_routes() -> Router<FeatureState> {
    Router::new().route("/query", post(query))
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    version: Option<String>,
}

#[tracing::instrument(skip(state, body), fields(version = params.version.as_deref()))]
async fn query(
    State(state): State<FeatureState>,
    Query(params): Query<QueryParams>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let response = state
        .registry
        .dispatch(params.version.as_deref(), &state.default_version, body)
        .await?;

    Ok(Json(response))
}
