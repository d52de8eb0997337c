use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    handlers::skill_routes()
}

pub fn legacy_router() -> Router<AppState> {
    handlers::legacy_skill_routes()
}
