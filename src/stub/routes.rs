//! Development endpoint route handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::issuer::issue_token;
use super::server::SharedState;
use crate::auth::{Credentials, TokenResponse};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            error: message.into(),
        })
    }
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// Authentication

pub async fn authenticate(
    State(state): State<SharedState>,
    Json(req): Json<Credentials>,
) -> axum::response::Response {
    let stub = &state.config.stub;

    let user = match stub.get_user(&req.username) {
        Some(user) if user.password == req.password => user,
        _ => {
            tracing::warn!("Rejected credentials for '{}'", req.username);
            return (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Bad credentials"),
            )
                .into_response();
        }
    };

    match issue_token(user, &stub.secret, stub.token_ttl_secs) {
        Ok(jwt) => {
            tracing::info!("Issued token for '{}'", user.username);
            (StatusCode::OK, Json(TokenResponse { jwt: Some(jwt) })).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(e.to_string()),
        )
            .into_response(),
    }
}
