use crate::state::AppState;
use axum::Router;

pub mod domain;
mod dto;
pub mod errors;
pub mod handlers;
pub mod memory;
pub mod password;
pub mod repo;
mod repo_types;
pub mod services;
pub mod token;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::user_routes())
}
