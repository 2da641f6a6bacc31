use crate::routes;
use crate::state::AppState;
use crate::utils::config::CONFIG;
use axum::Router;

pub fn create_app() -> Router {
    create_app_with_state(AppState::from_config(&CONFIG))
}

pub fn create_app_with_state(state: AppState) -> Router {
    routes::create_routes(state)
}
