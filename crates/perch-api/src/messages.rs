use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use perch_core::ServiceError;
use perch_types::api::{CreateMessageRequest, UpdateMessageRequest};

use crate::{AppState, error_reply};

/// Run blocking rusqlite work off the async runtime.
async fn run_blocking<T, F>(f: F) -> Result<T, (StatusCode, String)>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
        })?
        .map_err(error_reply)
}

pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let svc = state.messages.clone();
    let message = run_blocking(move || {
        svc.create(req.posted_by, &req.message_text, req.time_posted_epoch)
    })
    .await?;

    Ok(Json(message))
}

pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let svc = state.messages.clone();
    let messages = run_blocking(move || svc.list_all()).await?;

    Ok(Json(messages))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, (StatusCode, String)> {
    let svc = state.messages.clone();
    let message = run_blocking(move || svc.get_by_id(message_id)).await?;

    // Absence is still a 200, with an empty body.
    Ok(match message {
        Some(m) => Json(m).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, (StatusCode, String)> {
    let svc = state.messages.clone();
    let rows = run_blocking(move || svc.delete_by_id(message_id)).await?;

    // Idempotent: a missing row is still a 200, with an empty body
    // instead of the rows-affected count.
    Ok(match rows {
        0 => StatusCode::OK.into_response(),
        n => Json(n).into_response(),
    })
}

pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    Json(req): Json<UpdateMessageRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let svc = state.messages.clone();
    let rows = run_blocking(move || svc.update_text(message_id, &req.message_text)).await?;

    Ok(Json(rows))
}

pub async fn list_messages_by_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let svc = state.messages.clone();
    let messages = run_blocking(move || svc.list_by_account(account_id)).await?;

    Ok(Json(messages))
}
