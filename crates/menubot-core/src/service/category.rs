//! Category and subcategory management service.

use std::collections::BTreeMap;

use tracing::info;

use menubot_types::error::CategoryError;
use menubot_types::menu::{SubcategoryAdded, SubcategoryRemoval};

use crate::repository::category::CategoryRepository;

pub const CATEGORY_NAME_REQUIRED: &str = "Category name is required.";
pub const SUBCATEGORY_FIELDS_REQUIRED: &str = "Category name and subcategory name are required.";

pub struct CategoryService<C: CategoryRepository> {
    repo: C,
}

impl<C: CategoryRepository> CategoryService<C> {
    pub fn new(repo: C) -> Self {
        Self { repo }
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, CategoryError> {
        Ok(self.repo.list_categories().await?)
    }

    /// Add a category. Returns the stored (trimmed) name.
    pub async fn add_category(&self, name: Option<&str>) -> Result<String, CategoryError> {
        let name = required(name)
            .ok_or_else(|| CategoryError::Invalid(CATEGORY_NAME_REQUIRED.to_string()))?;
        self.repo.add_category(name).await?;
        info!(category = %name, "Category added");
        Ok(name.to_string())
    }

    pub async fn delete_category(&self, name: &str) -> Result<(), CategoryError> {
        self.repo.delete_category(name).await?;
        info!(category = %name, "Category deleted");
        Ok(())
    }

    pub async fn list_subcategories(&self) -> Result<BTreeMap<String, Vec<String>>, CategoryError> {
        Ok(self.repo.list_subcategories().await?)
    }

    pub async fn add_subcategory(
        &self,
        category: Option<&str>,
        name: Option<&str>,
    ) -> Result<(String, String, SubcategoryAdded), CategoryError> {
        let (Some(category), Some(name)) = (required(category), required(name)) else {
            return Err(CategoryError::Invalid(SUBCATEGORY_FIELDS_REQUIRED.to_string()));
        };
        let outcome = self.repo.add_subcategory(category, name).await?;
        info!(category = %category, subcategory = %name, ?outcome, "Subcategory added");
        Ok((category.to_string(), name.to_string(), outcome))
    }

    pub async fn delete_subcategory(
        &self,
        category: &str,
        name: &str,
    ) -> Result<SubcategoryRemoval, CategoryError> {
        Ok(self.repo.delete_subcategory(category, name).await?)
    }
}

fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
