//! In-memory fakes of the repository and storage ports for unit tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use menubot_types::error::{RepositoryError, UploadError};
use menubot_types::menu::{MenuItem, StoredUpload, SubcategoryAdded, SubcategoryRemoval};

use crate::repository::category::CategoryRepository;
use crate::repository::menu::MenuRepository;
use crate::storage::upload_store::UploadStore;

#[derive(Default)]
pub struct FakeMenuRepository {
    pub items: Mutex<Vec<MenuItem>>,
    pub fail: bool,
}

impl FakeMenuRepository {
    pub fn with_items(items: Vec<MenuItem>) -> Self {
        Self {
            items: Mutex::new(items),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail {
            Err(RepositoryError::Connection)
        } else {
            Ok(())
        }
    }
}

impl MenuRepository for FakeMenuRepository {
    async fn list_items(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        self.check()?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn get_item(&self, id: &str) -> Result<Option<MenuItem>, RepositoryError> {
        self.check()?;
        Ok(self.items.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn upsert_item(&self, item: &MenuItem) -> Result<(), RepositoryError> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() != before)
    }
}

pub struct FakeUploadStore {
    pub saved: Mutex<Vec<(String, usize)>>,
    dir: PathBuf,
}

impl Default for FakeUploadStore {
    fn default() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            dir: PathBuf::from("/tmp/uploads"),
        }
    }
}

impl UploadStore for FakeUploadStore {
    async fn save(&self, filename: &str, data: &[u8]) -> Result<StoredUpload, UploadError> {
        self.saved
            .lock()
            .unwrap()
            .push((filename.to_string(), data.len()));
        Ok(StoredUpload {
            filename: filename.to_string(),
        })
    }

    fn dir(&self) -> &Path {
        &self.dir
    }
}

#[derive(Default)]
pub struct FakeCategoryRepository {
    pub categories: Mutex<Vec<(String, Vec<String>)>>,
}

impl CategoryRepository for FakeCategoryRepository {
    async fn list_categories(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn add_category(&self, name: &str) -> Result<(), RepositoryError> {
        let mut categories = self.categories.lock().unwrap();
        if !categories.iter().any(|(n, _)| n == name) {
            categories.push((name.to_string(), Vec::new()));
        }
        Ok(())
    }

    async fn delete_category(&self, name: &str) -> Result<(), RepositoryError> {
        self.categories.lock().unwrap().retain(|(n, _)| n != name);
        Ok(())
    }

    async fn list_subcategories(&self) -> Result<BTreeMap<String, Vec<String>>, RepositoryError> {
        Ok(self.categories.lock().unwrap().iter().cloned().collect())
    }

    async fn add_subcategory(
        &self,
        category: &str,
        name: &str,
    ) -> Result<SubcategoryAdded, RepositoryError> {
        let mut categories = self.categories.lock().unwrap();
        match categories.iter_mut().find(|(n, _)| n == category) {
            Some((_, subs)) if subs.iter().any(|s| s == name) => Ok(SubcategoryAdded::AlreadyExists),
            Some((_, subs)) => {
                subs.push(name.to_string());
                Ok(SubcategoryAdded::Added)
            }
            None => {
                categories.push((category.to_string(), vec![name.to_string()]));
                Ok(SubcategoryAdded::AddedWithNewCategory)
            }
        }
    }

    async fn delete_subcategory(
        &self,
        category: &str,
        name: &str,
    ) -> Result<SubcategoryRemoval, RepositoryError> {
        let mut categories = self.categories.lock().unwrap();
        let Some((_, subs)) = categories.iter_mut().find(|(n, _)| n == category) else {
            return Ok(SubcategoryRemoval::CategoryNotFound);
        };
        let before = subs.len();
        subs.retain(|s| s != name);
        if subs.len() == before {
            Ok(SubcategoryRemoval::NotFound)
        } else {
            Ok(SubcategoryRemoval::Removed)
        }
    }
}
