use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::state::AppState;
use crate::user::model::User;
use crate::user::services::resolve_identity;
use crate::user::token::TokenKeys;

/// Identity attached to a request, if any. Resolution never rejects: a
/// missing, malformed, or expired credential is simply `None`.
pub struct CurrentUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let keys = TokenKeys::from_ref(state);
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());
        let identity = resolve_identity(header, &keys, state.directory.as_ref()).await;
        Ok(CurrentUser(identity))
    }
}
