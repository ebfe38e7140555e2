//! Category and subcategory repository trait.

use std::collections::BTreeMap;

use menubot_types::error::RepositoryError;
use menubot_types::menu::{SubcategoryAdded, SubcategoryRemoval};

/// Trait for category/subcategory persistence.
///
/// Categories are keyed by name. Subcategory names are unique within their
/// category and listed in insertion order.
pub trait CategoryRepository: Send + Sync {
    /// Category names in insertion order.
    fn list_categories(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;

    /// Idempotent: adding an existing category is a no-op.
    fn add_category(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a category and all its subcategories. Menu items that reference
    /// the category are left untouched.
    fn delete_category(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Every category mapped to its subcategory names.
    fn list_subcategories(
        &self,
    ) -> impl std::future::Future<Output = Result<BTreeMap<String, Vec<String>>, RepositoryError>> + Send;

    /// Add a subcategory, creating the parent category if it does not exist.
    fn add_subcategory(
        &self,
        category: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<SubcategoryAdded, RepositoryError>> + Send;

    fn delete_subcategory(
        &self,
        category: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<SubcategoryRemoval, RepositoryError>> + Send;
}
