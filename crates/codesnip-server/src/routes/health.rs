use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Liveness probe. Answers 503 when the document store is unreachable.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Health>, ApiError> {
    state
        .snippets
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::Unavailable {
            message: "document store unreachable".to_string(),
            error: e.to_string(),
        })?;

    Ok(Json(Health { status: "ok" }))
}
