//! Route table

use axum::routing::get;
use axum::Router;

use crate::handlers::{health, menus};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/v1/menus",
            get(menus::list_menus)
                .post(menus::create_menu)
                .put(menus::update_menu),
        )
        .route(
            "/api/v1/menus/{menu_id}",
            get(menus::get_menu).delete(menus::delete_menu),
        )
        .route("/api/v1/menus/{menu_id}/render", get(menus::render_menu))
        .with_state(state)
}
