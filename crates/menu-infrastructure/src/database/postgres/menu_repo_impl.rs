// ============================================================================
// Menu Infrastructure - PostgreSQL Menu Repository
// File: crates/menu-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use menu_core::domain::{Menu, MenuCategory};
use menu_core::error::DomainError;
use menu_core::repositories::MenuRepository;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping; categories live in a JSONB column.
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub categories: Json<Vec<MenuCategory>>,
    pub shared: bool,
    pub share_token: String,
    pub markdown: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            name: row.name,
            owner_id: row.owner_id,
            categories: row.categories.0,
            shared: row.shared,
            share_token: row.share_token,
            markdown: row.markdown,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, owner_id, categories, shared,
                share_token, markdown, created_at, modified_at
            FROM menus
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding menu by id: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, owner_id, categories, shared,
                share_token, markdown, created_at, modified_at
            FROM menus
            WHERE owner_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding menus by owner: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn insert(&self, menu: &Menu) -> Result<Menu, DomainError> {
        info!("Inserting menu {} for owner {}", menu.id, menu.owner_id);

        let row: MenuRow = sqlx::query_as(
            r#"
            INSERT INTO menus (
                id, name, owner_id, categories, shared,
                share_token, markdown, created_at, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, name, owner_id, categories, shared,
                share_token, markdown, created_at, modified_at
            "#,
        )
        .bind(menu.id)
        .bind(&menu.name)
        .bind(menu.owner_id)
        .bind(Json(&menu.categories))
        .bind(menu.shared)
        .bind(&menu.share_token)
        .bind(&menu.markdown)
        .bind(menu.created_at)
        .bind(menu.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error inserting menu: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn replace(&self, menu: &Menu) -> Result<Menu, DomainError> {
        let row: MenuRow = sqlx::query_as(
            r#"
            UPDATE menus
            SET
                name = $2,
                categories = $3,
                shared = $4,
                share_token = $5,
                markdown = $6,
                modified_at = $7
            WHERE id = $1
            RETURNING
                id, name, owner_id, categories, shared,
                share_token, markdown, created_at, modified_at
            "#,
        )
        .bind(menu.id)
        .bind(&menu.name)
        .bind(Json(&menu.categories))
        .bind(menu.shared)
        .bind(&menu.share_token)
        .bind(&menu.markdown)
        .bind(menu.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error replacing menu: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            DELETE FROM menus
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error deleting menu: {}", e);
            DomainError::Database(e.to_string())
        })?;

        Ok(())
    }
}
