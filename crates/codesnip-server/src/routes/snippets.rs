use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use codesnip_core::models::envelope::{Created, Data, Message};
use codesnip_core::models::snippet::{CodeSnippet, SnippetInput};

use crate::error::ApiError;
use crate::state::AppState;

/// Request bodies are decoded as JSON whatever the `Content-Type` header says.
fn decode_input(body: &[u8]) -> Result<SnippetInput, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

pub async fn list_snippets(
    State(state): State<AppState>,
) -> Result<Json<Data<Vec<CodeSnippet>>>, ApiError> {
    let snippets = state
        .snippets
        .get_all()
        .await
        .map_err(|e| ApiError::from_snippet(e, "failed to fetch snippets"))?;

    Ok(Json(Data { data: snippets }))
}

pub async fn get_snippet(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Data<CodeSnippet>>, ApiError> {
    let snippet = state.snippets.get_by_name(&name).await?;
    Ok(Json(Data { data: snippet }))
}

pub async fn create_snippet(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let input = decode_input(&body)?;

    let id = state
        .snippets
        .create(&input)
        .await
        .map_err(|e| ApiError::from_snippet(e, "Failed to save Code Snippet"))?;

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "Snippet created successfully".to_string(),
            snippet_id: id.to_hex(),
        }),
    ))
}

pub async fn update_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Message>, ApiError> {
    let input = decode_input(&body)?;

    let counts = state
        .snippets
        .update_by_id(&id, &input)
        .await
        .map_err(|e| ApiError::from_snippet(e, "Failed to update snippet"))?;

    if counts.matched == 0 {
        return Err(ApiError::not_found(format!("no snippet with id {}", id.trim())));
    }

    Ok(Json(Message::new("Snippet updated successfully")))
}

pub async fn delete_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let deleted = state
        .snippets
        .delete_by_id(&id)
        .await
        .map_err(|e| ApiError::from_snippet(e, "Failed to delete snippet"))?;

    if deleted == 0 {
        return Err(ApiError::not_found(format!("no snippet with id {}", id.trim())));
    }

    Ok(Json(Message::new("Code Snippet deleted successfully")))
}
