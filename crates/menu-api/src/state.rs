use std::sync::Arc;

use menu_core::services::MenuService;
use menu_security::JwtService;
use menu_shared::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub menu_service: Arc<MenuService>,
    pub jwt: Arc<JwtService>,
    pub config: AppConfig,
}
