use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use perch_types::api::{LoginRequest, RegisterRequest};

use crate::{AppState, error_reply};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let account = state
        .accounts
        .register(&req.username, &req.password)
        .map_err(error_reply)?;

    Ok(Json(account))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let account = state
        .accounts
        .login(&req.username, &req.password)
        .map_err(error_reply)?;

    Ok(Json(account))
}
