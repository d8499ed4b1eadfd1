use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::response::ApiResponse;
use crate::state::AppState;
use crate::user::dto::{LoginRequest, SignupRequest};
use crate::user::extractors::CurrentUser;
use crate::user::services;
use crate::user::token::TokenKeys;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/", get(index).post(store_user))
        .route("/user/login", post(user_auth))
}

/// Current user details, or the all-null user for guests.
#[instrument(skip_all)]
pub async fn index(CurrentUser(identity): CurrentUser) -> ApiResponse {
    services::get_current_user(identity.as_ref())
}

/// Create a user in the system.
#[instrument(skip_all)]
pub async fn store_user(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResponse {
    services::create_user(state.directory.as_ref(), payload)
        .await
        .unwrap_or_else(ApiResponse::from)
}

/// Exchange credentials for an access token.
#[instrument(skip_all)]
pub async fn user_auth(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResponse {
    let keys = TokenKeys::from_ref(&state);
    services::login_user(state.directory.as_ref(), &keys, payload)
        .await
        .unwrap_or_else(ApiResponse::from)
}
