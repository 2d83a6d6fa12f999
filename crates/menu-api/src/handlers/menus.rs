// ============================================================================
// Menu API - Menu Handlers
// File: crates/menu-api/src/handlers/menus.rs
// ============================================================================
//! Menu HTTP handlers (read, render, create, update, delete)

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use menu_core::dto::MenuDto;

use crate::error::{ApiError, MENU_NOT_FOUND_MESSAGE};
use crate::extractors::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// Create request payload
#[derive(Debug, Deserialize)]
pub struct CreateMenuRequest {
    pub name: String,
}

/// Update request payload: a full menu replacement
#[derive(Debug, Deserialize)]
pub struct UpdateMenuRequest {
    pub menu: MenuDto,
}

#[derive(Debug, Deserialize)]
pub struct ShareTokenQuery {
    #[serde(rename = "shareToken")]
    pub share_token: Option<String>,
}

// Menu ids are opaque to clients: an unparseable id gets the same 404 as a
// missing menu.
fn parse_menu_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(MENU_NOT_FOUND_MESSAGE.to_string()))
}

/// Fetch one menu - GET /api/v1/menus/{menu_id}
pub async fn get_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<String>,
    Query(query): Query<ShareTokenQuery>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<Json<MenuDto>, ApiError> {
    let menu_id = parse_menu_id(&menu_id)?;
    let menu = state
        .menu_service
        .get_menu(&menu_id, user.as_ref(), query.share_token.as_deref())
        .await?;
    Ok(Json(menu))
}

/// Render one menu - GET /api/v1/menus/{menu_id}/render
pub async fn render_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<String>,
    Query(query): Query<ShareTokenQuery>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<Response, ApiError> {
    let menu_id = parse_menu_id(&menu_id)?;
    let menu = state
        .menu_service
        .get_menu(&menu_id, user.as_ref(), query.share_token.as_deref())
        .await?;

    let bytes = state.menu_service.render_menu(&menu).await?;
    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes).into_response())
}

/// List the caller's menus - GET /api/v1/menus
pub async fn list_menus(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<MenuDto>>, ApiError> {
    let menus = state.menu_service.get_menus_by_owner(&user).await?;
    Ok(Json(menus))
}

/// Create a menu - POST /api/v1/menus
pub async fn create_menu(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateMenuRequest>,
) -> Result<(StatusCode, Json<MenuDto>), ApiError> {
    let menu = state.menu_service.create_menu(&user, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

/// Replace a menu - PUT /api/v1/menus
pub async fn update_menu(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<UpdateMenuRequest>,
) -> Result<Json<MenuDto>, ApiError> {
    let menu = state.menu_service.update_menu(payload.menu, &user).await?;
    Ok(Json(menu))
}

/// Delete a menu - DELETE /api/v1/menus/{menu_id}
///
/// Responds 200 whether or not an owned menu existed; the service deletes
/// owner-scoped and stays silent otherwise.
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<String>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, ApiError> {
    if let Ok(menu_id) = Uuid::parse_str(&menu_id) {
        state.menu_service.delete_menu(&menu_id, &user).await?;
    }
    Ok(StatusCode::OK)
}
