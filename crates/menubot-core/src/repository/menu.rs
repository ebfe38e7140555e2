//! Menu repository trait and the read-only snapshot port used by the
//! recommendation service.

use menubot_types::error::RepositoryError;
use menubot_types::menu::{MenuItem, MenuSnapshot};

/// Trait for menu item persistence.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in menubot-infra.
pub trait MenuRepository: Send + Sync {
    /// All menu items in insertion order.
    fn list_items(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MenuItem>, RepositoryError>> + Send;

    fn get_item(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<MenuItem>, RepositoryError>> + Send;

    /// Insert or fully replace the item with `item.id`.
    fn upsert_item(
        &self,
        item: &MenuItem,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete an item. Returns whether a row existed.
    fn delete_item(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Point-in-time read of the menu for prompt enrichment.
///
/// Callers treat failure as "no menu available" rather than as an error.
pub trait MenuSnapshotSource: Send + Sync {
    fn list_menu_items(
        &self,
    ) -> impl std::future::Future<Output = Result<MenuSnapshot, RepositoryError>> + Send;
}

impl<T: MenuRepository> MenuSnapshotSource for T {
    fn list_menu_items(
        &self,
    ) -> impl std::future::Future<Output = Result<MenuSnapshot, RepositoryError>> + Send {
        self.list_items()
    }
}
