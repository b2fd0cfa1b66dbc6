use crate::models::{GetParams, HealthResponse, SetParams};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use tracing::info;

/// GET /kv/set?key=..&value=..
///
/// Scalar write; the boolean is the facade's swallow-and-log verdict, so a
/// `false` body means "not written, see the server log".
pub async fn set_value(
    State(state): State<AppState>,
    Query(params): Query<SetParams>,
) -> Json<bool> {
    info!("SET: key={}", params.key);
    Json(state.kv.set(&params.key, &params.value).await)
}

/// GET /kv/get?key=..
///
/// Scalar read; `null` for an absent key.
pub async fn get_value(
    State(state): State<AppState>,
    Query(params): Query<GetParams>,
) -> Json<Option<serde_json::Value>> {
    info!("GET: key={}", params.key);
    Json(state.kv.get(&params.key).await)
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { message: "OK".into() })
}
