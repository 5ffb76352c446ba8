pub mod accounts;
pub mod messages;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use perch_core::{AccountService, MessageService, ServiceError};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

/// Assemble the full HTTP surface over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route(
            "/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message)
                .patch(messages::update_message)
                .delete(messages::delete_message),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::list_messages_by_account),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Map a service failure to its status code, with the error message as
/// the body — the same shape the original exception handler produced.
pub(crate) fn error_reply(err: ServiceError) -> (StatusCode, String) {
    let status = match &err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Duplicate => StatusCode::CONFLICT,
        ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceError::Store(e) => {
            error!("store failure: {e:#}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into());
        }
    };
    (status, err.to_string())
}
