//! Menu repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::domain::Menu;
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError>;
    async fn find_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Menu>, DomainError>;
    async fn insert(&self, menu: &Menu) -> Result<Menu, DomainError>;
    /// Full-document replacement keyed by `menu.id`. Last writer wins.
    async fn replace(&self, menu: &Menu) -> Result<Menu, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
