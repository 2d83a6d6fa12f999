// ============================================================================
// Menu Core - Menu Service
// File: crates/menu-core/src/services/menu_service.rs
// ============================================================================
//! Menu access control, document consistency, and render delegation

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::RendererClient;
use crate::domain::{Identity, Menu, MenuCategory};
use crate::dto::MenuDto;
use crate::error::DomainError;
use crate::markdown;
use crate::repositories::MenuRepository;
use crate::validation;

/// Owns the per-menu access policy and every write path.
///
/// Server-owned fields (`id`, `owner_id`, `share_token`, `markdown`) are
/// re-derived or carried forward here; client-supplied values for them never
/// reach the repository.
pub struct MenuService {
    repo: Arc<dyn MenuRepository>,
    renderer: Arc<dyn RendererClient>,
}

impl MenuService {
    pub fn new(repo: Arc<dyn MenuRepository>, renderer: Arc<dyn RendererClient>) -> Self {
        Self { repo, renderer }
    }

    /// Fetch a menu the requester is allowed to see.
    ///
    /// A missing menu and a menu the requester may not see produce the same
    /// `MenuNotFound`, so callers cannot probe which ids exist.
    pub async fn get_menu(
        &self,
        menu_id: &Uuid,
        requester: Option<&Identity>,
        share_token: Option<&str>,
    ) -> Result<MenuDto, DomainError> {
        let menu = self.find_visible(menu_id, requester, share_token).await?;
        Ok(MenuDto::from(&menu))
    }

    /// List every menu belonging to the authenticated requester.
    pub async fn get_menus_by_owner(
        &self,
        owner: &Identity,
    ) -> Result<Vec<MenuDto>, DomainError> {
        let menus = self.repo.find_by_owner(&owner.user_id).await?;
        Ok(menus.iter().map(MenuDto::from).collect())
    }

    /// Create an empty menu: fresh id and share token, `shared = false`,
    /// markdown derived immediately.
    pub async fn create_menu(
        &self,
        owner: &Identity,
        name: &str,
    ) -> Result<MenuDto, DomainError> {
        validation::validate_menu_name(name)?;

        let menu = Menu::new(owner.user_id, name.to_string());
        let created = self.repo.insert(&menu).await?;

        info!("Menu {} created by {}", created.id, owner.username);
        Ok(MenuDto::from(&created))
    }

    /// Replace a menu's content wholesale.
    ///
    /// Authorization is the read-visibility rule evaluated with the
    /// requester id alone; no share token flows through this path. The
    /// stored `owner_id`, `share_token`, and `created_at` are carried
    /// forward, and the markdown is re-derived from the submitted content.
    pub async fn update_menu(
        &self,
        updated: MenuDto,
        requester: &Identity,
    ) -> Result<MenuDto, DomainError> {
        let menu_id = Uuid::parse_str(&updated.id).map_err(|_| DomainError::MenuNotFound)?;
        let existing = self.find_visible(&menu_id, Some(requester), None).await?;

        validation::validate_menu(&updated)?;

        let categories: Vec<MenuCategory> =
            updated.categories.into_iter().map(MenuCategory::from).collect();
        let replacement = Menu {
            id: existing.id,
            markdown: markdown::generate(&updated.name, &categories),
            name: updated.name,
            owner_id: existing.owner_id,
            categories,
            shared: updated.shared,
            share_token: existing.share_token,
            created_at: existing.created_at,
            modified_at: Some(Utc::now()),
        };
        let stored = self.repo.replace(&replacement).await?;

        info!("Menu {} updated by {}", stored.id, requester.username);
        Ok(MenuDto::from(&stored))
    }

    /// Delete a menu the requester owns. Anything else, including a menu
    /// that does not exist or belongs to someone else, is a silent no-op.
    pub async fn delete_menu(
        &self,
        menu_id: &Uuid,
        requester: &Identity,
    ) -> Result<(), DomainError> {
        match self.repo.find_by_id(menu_id).await? {
            Some(menu) if menu.is_owned_by(&requester.user_id) => {
                self.repo.delete(&menu.id).await?;
                info!("Menu {} deleted by {}", menu.id, requester.username);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Forward the menu projection to the external renderer. One attempt,
    /// no retry; failures surface to the caller untouched.
    pub async fn render_menu(&self, menu: &MenuDto) -> Result<Vec<u8>, DomainError> {
        let bytes = self.renderer.render(menu).await?;
        Ok(bytes)
    }

    async fn find_visible(
        &self,
        menu_id: &Uuid,
        requester: Option<&Identity>,
        share_token: Option<&str>,
    ) -> Result<Menu, DomainError> {
        let menu = self
            .repo
            .find_by_id(menu_id)
            .await?
            .ok_or(DomainError::MenuNotFound)?;

        let requester_id = requester.map(|r| &r.user_id);
        if !menu.is_visible_to(requester_id, share_token) {
            warn!("Menu {} access denied", menu_id);
            return Err(DomainError::MenuNotFound);
        }
        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::clients::renderer::{MockRendererClient, RendererError};
    use crate::dto::{MenuCategoryDto, MenuItemDto};
    use crate::error::MenuField;

    struct InMemoryMenuRepository {
        menus: Mutex<HashMap<Uuid, Menu>>,
    }

    impl InMemoryMenuRepository {
        fn new() -> Self {
            Self {
                menus: Mutex::new(HashMap::new()),
            }
        }

        fn stored(&self, id: &Uuid) -> Option<Menu> {
            self.menus.lock().unwrap().get(id).cloned()
        }
    }

    #[async_trait]
    impl MenuRepository for InMemoryMenuRepository {
        async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError> {
            Ok(self.menus.lock().unwrap().get(id).cloned())
        }

        async fn find_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Menu>, DomainError> {
            let mut menus: Vec<Menu> = self
                .menus
                .lock()
                .unwrap()
                .values()
                .filter(|m| m.owner_id == *owner_id)
                .cloned()
                .collect();
            menus.sort_by_key(|m| m.created_at);
            Ok(menus)
        }

        async fn insert(&self, menu: &Menu) -> Result<Menu, DomainError> {
            self.menus.lock().unwrap().insert(menu.id, menu.clone());
            Ok(menu.clone())
        }

        async fn replace(&self, menu: &Menu) -> Result<Menu, DomainError> {
            self.menus.lock().unwrap().insert(menu.id, menu.clone());
            Ok(menu.clone())
        }

        async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
            self.menus.lock().unwrap().remove(id);
            Ok(())
        }
    }

    fn identity(name: &str) -> Identity {
        Identity::new(Uuid::new_v4(), name.to_string())
    }

    fn service() -> (Arc<InMemoryMenuRepository>, MenuService) {
        let repo = Arc::new(InMemoryMenuRepository::new());
        let service = MenuService::new(repo.clone(), Arc::new(MockRendererClient::new()));
        (repo, service)
    }

    fn update_payload(id: &str, author: &str) -> MenuDto {
        MenuDto {
            id: id.to_string(),
            name: "Lunch".to_string(),
            categories: vec![MenuCategoryDto {
                name: "Mains".to_string(),
                items: vec![MenuItemDto {
                    name: "Soup".to_string(),
                    price: 5.0,
                    description: "Hot soup".to_string(),
                    image: None,
                }],
            }],
            author: author.to_string(),
            shared: false,
            markdown: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_owner_reads() {
        let (_, service) = service();
        let owner = identity("alice");

        let created = service.create_menu(&owner, "Lunch").await.unwrap();
        assert_eq!(created.name, "Lunch");
        assert!(created.categories.is_empty());
        assert!(!created.shared);
        assert_eq!(created.author, owner.user_id.to_string());
        assert_eq!(created.markdown.as_deref(), Some("Lunch\n=====\n\n"));

        let menu_id = Uuid::parse_str(&created.id).unwrap();
        let fetched = service.get_menu(&menu_id, Some(&owner), None).await.unwrap();
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_name() {
        let (_, service) = service();

        let err = service
            .create_menu(&identity("alice"), "Lunch <Menu>")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(MenuField::MenuName)));
    }

    #[tokio::test]
    async fn test_absent_and_forbidden_are_indistinguishable() {
        let (_, service) = service();
        let owner = identity("alice");
        let stranger = identity("mallory");

        let created = service.create_menu(&owner, "Lunch").await.unwrap();
        let menu_id = Uuid::parse_str(&created.id).unwrap();

        let forbidden = service
            .get_menu(&menu_id, Some(&stranger), None)
            .await
            .unwrap_err();
        let absent = service
            .get_menu(&Uuid::new_v4(), Some(&stranger), None)
            .await
            .unwrap_err();

        assert!(matches!(forbidden, DomainError::MenuNotFound));
        assert!(matches!(absent, DomainError::MenuNotFound));
        assert_eq!(forbidden.to_string(), absent.to_string());
    }

    #[tokio::test]
    async fn test_share_token_and_shared_flag_grant_reads() {
        let (repo, service) = service();
        let owner = identity("alice");

        let created = service.create_menu(&owner, "Lunch").await.unwrap();
        let menu_id = Uuid::parse_str(&created.id).unwrap();
        let token = repo.stored(&menu_id).unwrap().share_token;

        // Anonymous with the token.
        assert!(service
            .get_menu(&menu_id, None, Some(&token))
            .await
            .is_ok());
        // Anonymous with a wrong or empty token.
        assert!(service.get_menu(&menu_id, None, Some("nope")).await.is_err());
        assert!(service.get_menu(&menu_id, None, Some("")).await.is_err());
        assert!(service.get_menu(&menu_id, None, None).await.is_err());

        let mut shared = repo.stored(&menu_id).unwrap();
        shared.shared = true;
        repo.replace(&shared).await.unwrap();
        assert!(service.get_menu(&menu_id, None, None).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_rederives_markdown_and_keeps_token() {
        let (repo, service) = service();
        let owner = identity("alice");

        let created = service.create_menu(&owner, "Lunch").await.unwrap();
        let menu_id = Uuid::parse_str(&created.id).unwrap();
        let original_token = repo.stored(&menu_id).unwrap().share_token;

        let mut payload = update_payload(&created.id, &created.author);
        payload.markdown = Some("client-supplied garbage".to_string());
        let updated = service.update_menu(payload, &owner).await.unwrap();

        let markdown = updated.markdown.unwrap();
        assert!(markdown.contains("Lunch\n====="));
        assert!(markdown.contains("Mains\n-----"));
        assert!(markdown.contains("**Soup** — 5.0"));
        assert!(markdown.contains("Hot soup"));

        // Byte-identical to a fresh derivation of the submitted content.
        let expected = markdown::generate(
            "Lunch",
            &[MenuCategory {
                name: "Mains".to_string(),
                items: vec![crate::domain::MenuItem {
                    name: "Soup".to_string(),
                    price: 5.0,
                    description: "Hot soup".to_string(),
                    image: None,
                }],
            }],
        );
        assert_eq!(markdown, expected);

        // Token unchanged across two consecutive updates.
        assert_eq!(repo.stored(&menu_id).unwrap().share_token, original_token);
        let again = update_payload(&created.id, &created.author);
        service.update_menu(again, &owner).await.unwrap();
        assert_eq!(repo.stored(&menu_id).unwrap().share_token, original_token);
    }

    #[tokio::test]
    async fn test_update_ignores_client_author() {
        let (repo, service) = service();
        let owner = identity("alice");

        let created = service.create_menu(&owner, "Lunch").await.unwrap();
        let menu_id = Uuid::parse_str(&created.id).unwrap();

        let mut payload = update_payload(&created.id, &created.author);
        payload.author = Uuid::new_v4().to_string();
        let updated = service.update_menu(payload, &owner).await.unwrap();

        assert_eq!(updated.author, owner.user_id.to_string());
        assert_eq!(repo.stored(&menu_id).unwrap().owner_id, owner.user_id);
    }

    #[tokio::test]
    async fn test_public_viewer_may_update_but_stranger_may_not() {
        let (repo, service) = service();
        let owner = identity("alice");
        let viewer = identity("bob");

        let created = service.create_menu(&owner, "Lunch").await.unwrap();
        let menu_id = Uuid::parse_str(&created.id).unwrap();

        // Not shared yet: the update path hides the menu from non-owners.
        let err = service
            .update_menu(update_payload(&created.id, &created.author), &viewer)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MenuNotFound));

        // Publicly shared: read visibility also grants the update.
        let mut shared = repo.stored(&menu_id).unwrap();
        shared.shared = true;
        repo.replace(&shared).await.unwrap();

        let mut payload = update_payload(&created.id, &created.author);
        payload.shared = true;
        assert!(service.update_menu(payload, &viewer).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_unknown_or_malformed_id_hidden() {
        let (_, service) = service();
        let requester = identity("alice");

        let missing = update_payload(&Uuid::new_v4().to_string(), "any");
        assert!(matches!(
            service.update_menu(missing, &requester).await.unwrap_err(),
            DomainError::MenuNotFound
        ));

        let malformed = update_payload("not-a-uuid", "any");
        assert!(matches!(
            service.update_menu(malformed, &requester).await.unwrap_err(),
            DomainError::MenuNotFound
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_nonpositive_price() {
        let (_, service) = service();
        let owner = identity("alice");

        let created = service.create_menu(&owner, "Lunch").await.unwrap();
        let mut payload = update_payload(&created.id, &created.author);
        payload.categories[0].items[0].price = 0.0;

        let err = service.update_menu(payload, &owner).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(MenuField::ItemPrice)));
    }

    #[tokio::test]
    async fn test_last_writer_wins_on_repeated_replacement() {
        let (repo, service) = service();
        let owner = identity("alice");

        let created = service.create_menu(&owner, "Lunch").await.unwrap();
        let menu_id = Uuid::parse_str(&created.id).unwrap();

        let first = update_payload(&created.id, &created.author);
        service.update_menu(first, &owner).await.unwrap();

        let mut second = update_payload(&created.id, &created.author);
        second.categories[0].items[0].name = "Stew".to_string();
        service.update_menu(second, &owner).await.unwrap();

        // No version check anywhere: the second replacement simply wins.
        let stored = repo.stored(&menu_id).unwrap();
        assert_eq!(stored.categories[0].items[0].name, "Stew");
        assert!(stored.markdown.contains("**Stew**"));
        assert!(!stored.markdown.contains("**Soup**"));
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped_and_silent() {
        let (repo, service) = service();
        let owner = identity("alice");
        let stranger = identity("mallory");

        let created = service.create_menu(&owner, "Lunch").await.unwrap();
        let menu_id = Uuid::parse_str(&created.id).unwrap();

        // Non-owner delete succeeds silently and removes nothing.
        service.delete_menu(&menu_id, &stranger).await.unwrap();
        assert!(repo.stored(&menu_id).is_some());
        assert!(service.get_menu(&menu_id, Some(&owner), None).await.is_ok());

        service.delete_menu(&menu_id, &owner).await.unwrap();
        assert!(repo.stored(&menu_id).is_none());

        // Deleting a menu that never existed is also fine.
        service.delete_menu(&Uuid::new_v4(), &owner).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let (_, service) = service();
        let alice = identity("alice");
        let bob = identity("bob");

        service.create_menu(&alice, "Lunch").await.unwrap();
        service.create_menu(&alice, "Dinner").await.unwrap();
        service.create_menu(&bob, "Specials").await.unwrap();

        let alices = service.get_menus_by_owner(&alice).await.unwrap();
        assert_eq!(alices.len(), 2);
        assert!(alices.iter().all(|m| m.author == alice.user_id.to_string()));

        let bobs = service.get_menus_by_owner(&bob).await.unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].name, "Specials");
    }

    #[tokio::test]
    async fn test_render_failure_surfaces_without_retry() {
        let repo = Arc::new(InMemoryMenuRepository::new());
        let mut renderer = MockRendererClient::new();
        renderer
            .expect_render()
            .times(1)
            .returning(|_| Err(RendererError::Transport("connection refused".to_string())));
        let service = MenuService::new(repo, Arc::new(renderer));

        let owner = identity("alice");
        let created = service.create_menu(&owner, "Lunch").await.unwrap();

        let err = service.render_menu(&created).await.unwrap_err();
        assert!(matches!(err, DomainError::Renderer(_)));
        // MockRendererClient verifies the single call on drop.
    }

    #[tokio::test]
    async fn test_render_passes_bytes_through() {
        let repo = Arc::new(InMemoryMenuRepository::new());
        let mut renderer = MockRendererClient::new();
        renderer
            .expect_render()
            .times(1)
            .returning(|_| Ok(b"%PDF-1.4".to_vec()));
        let service = MenuService::new(repo, Arc::new(renderer));

        let owner = identity("alice");
        let created = service.create_menu(&owner, "Lunch").await.unwrap();

        let bytes = service.render_menu(&created).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4");
    }
}
