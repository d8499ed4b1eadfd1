use crate::state::AppState;
use axum::Router;

pub mod directory;
pub mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod model;
pub mod password;
pub mod services;
pub mod token;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
