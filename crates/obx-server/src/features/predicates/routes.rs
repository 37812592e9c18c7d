use axum::{response::IntoResponse, routing::get, Json, Router};

use crate::features::FeatureState;

pub fn predicates_routes() -> Router<FeatureState> {
    Router::new().route("/predicates", get(predicates))
}

async fn predicates() -> impl IntoResponse {
    Json(super::capability_map().clone())
}
