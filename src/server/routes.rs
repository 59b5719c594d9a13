use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::generator::GenerateCredential;
use crate::observability::metrics::get_metrics;
use crate::server::server::AppState;

/// `GET|POST /token` — serve the cached credential, generating one first if
/// none is valid. All failures of the round surface here as a 500.
pub async fn serve_token<G>(State(state): State<AppState<G>>) -> Response
where
    G: GenerateCredential + Send + Sync + 'static,
{
    let metrics = get_metrics().await;

    match state.invoker.ensure_fresh().await {
        Ok(credential) => {
            metrics.token_requests.with_label_values(&["success"]).inc();
            (StatusCode::OK, Json(credential)).into_response()
        }
        Err(err) => {
            metrics.token_requests.with_label_values(&["error"]).inc();
            error!("token request failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// `GET /health` — static liveness payload; never touches the store.
pub async fn serve_health<G>(State(state): State<AppState<G>>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "port": state.port }))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
