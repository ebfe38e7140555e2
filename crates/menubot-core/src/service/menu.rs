//! Menu management service.
//!
//! Creates, merges, deletes and lists menu items. Files submitted alongside a
//! menu item are stored as `{id}_{filename}` and their public URL is recorded
//! on the item.

use tracing::{debug, info};
use uuid::Uuid;

use menubot_types::error::MenuError;
use menubot_types::menu::{MenuItem, MenuItemForm, UploadSlot, UploadedFile};

use crate::repository::menu::MenuRepository;
use crate::storage::upload_store::{UploadStore, is_allowed_upload, sanitize_filename};

/// Service for menu item CRUD with attached uploads.
///
/// Generic over repository and storage traits -- menubot-core never
/// depends on menubot-infra.
pub struct MenuService<R: MenuRepository, U: UploadStore> {
    repo: R,
    uploads: U,
    public_base_url: String,
}

impl<R: MenuRepository, U: UploadStore> MenuService<R, U> {
    /// - `repo`: persistence for menu items
    /// - `uploads`: where submitted model/image files are written
    /// - `public_base_url`: origin used to build `/uploads/...` URLs
    pub fn new(repo: R, uploads: U, public_base_url: impl Into<String>) -> Self {
        Self {
            repo,
            uploads,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn uploads(&self) -> &U {
        &self.uploads
    }

    pub async fn list_items(&self) -> Result<Vec<MenuItem>, MenuError> {
        Ok(self.repo.list_items().await?)
    }

    /// Create an item. Uses the submitted id when present, otherwise a new UUID.
    pub async fn create_item(
        &self,
        form: MenuItemForm,
        files: Vec<UploadedFile>,
    ) -> Result<MenuItem, MenuError> {
        let id = form
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut item = MenuItem {
            id,
            ..Default::default()
        };
        form.apply_to(&mut item);
        self.attach_files(&mut item, files).await?;

        self.repo.upsert_item(&item).await?;
        info!(item_id = %item.id, "Menu item created");
        Ok(item)
    }

    /// Merge submitted fields into an existing item.
    ///
    /// Fields that were not submitted keep their stored values.
    pub async fn update_item(
        &self,
        id: &str,
        form: MenuItemForm,
        files: Vec<UploadedFile>,
    ) -> Result<MenuItem, MenuError> {
        let mut item = self.repo.get_item(id).await?.ok_or(MenuError::NotFound)?;

        form.apply_to(&mut item);
        self.attach_files(&mut item, files).await?;

        self.repo.upsert_item(&item).await?;
        info!(item_id = %item.id, "Menu item updated");
        Ok(item)
    }

    /// Delete an item. Deleting an unknown id is not an error.
    pub async fn delete_item(&self, id: &str) -> Result<(), MenuError> {
        let existed = self.repo.delete_item(id).await?;
        info!(item_id = %id, existed, "Menu item deleted");
        Ok(())
    }

    async fn attach_files(
        &self,
        item: &mut MenuItem,
        files: Vec<UploadedFile>,
    ) -> Result<(), MenuError> {
        for file in files {
            let original = sanitize_filename(&file.filename);
            if !is_allowed_upload(&original) {
                debug!(
                    item_id = %item.id,
                    filename = %file.filename,
                    "Skipping upload with disallowed file type"
                );
                continue;
            }

            let stored = self
                .uploads
                .save(&sanitize_filename(&format!("{}_{original}", item.id)), &file.data)
                .await?;
            let url = format!("{}/uploads/{}", self.public_base_url, stored.filename);

            match file.slot {
                UploadSlot::Model => item.model_url = Some(url),
                UploadSlot::Image => item.image_url = Some(url),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeMenuRepository, FakeUploadStore};

    fn service() -> MenuService<FakeMenuRepository, FakeUploadStore> {
        MenuService::new(
            FakeMenuRepository::default(),
            FakeUploadStore::default(),
            "http://localhost:5000/",
        )
    }

    fn form(fields: &[(&str, &str)]) -> MenuItemForm {
        let mut form = MenuItemForm::default();
        for (name, value) in fields {
            form.set_field(name, value.to_string());
        }
        form
    }

    #[tokio::test]
    async fn test_create_generates_id_when_missing() {
        let svc = service();
        let item = svc
            .create_item(form(&[("name", "Burger"), ("id", "  ")]), vec![])
            .await
            .unwrap();
        assert!(Uuid::parse_str(&item.id).is_ok());
        assert_eq!(svc.list_items().await.unwrap(), vec![item]);
    }

    #[tokio::test]
    async fn test_create_stores_files_with_id_prefix() {
        let svc = service();
        let files = vec![
            UploadedFile {
                slot: UploadSlot::Model,
                filename: "big burger.glb".into(),
                data: vec![1, 2, 3],
            },
            UploadedFile {
                slot: UploadSlot::Image,
                filename: "virus.exe".into(),
                data: vec![0],
            },
        ];
        let item = svc
            .create_item(form(&[("id", "b1"), ("name", "Burger")]), files)
            .await
            .unwrap();

        assert_eq!(
            item.model_url.as_deref(),
            Some("http://localhost:5000/uploads/b1_big_burger.glb")
        );
        assert!(item.image_url.is_none());
        let saved = svc.uploads().saved.lock().unwrap().clone();
        assert_eq!(saved, vec![("b1_big_burger.glb".to_string(), 3)]);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let svc = service();
        svc.create_item(
            form(&[("id", "b1"), ("name", "Burger"), ("price", "$9.99")]),
            vec![],
        )
        .await
        .unwrap();

        let updated = svc
            .update_item("b1", form(&[("price", "$10.99")]), vec![])
            .await
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Burger"));
        assert_eq!(updated.price.as_deref(), Some("$10.99"));
    }

    #[tokio::test]
    async fn test_update_unknown_item_is_not_found() {
        let svc = service();
        let err = svc
            .update_item("missing", form(&[("name", "x")]), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, MenuError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let svc = service();
        svc.create_item(form(&[("id", "b1")]), vec![]).await.unwrap();
        svc.delete_item("b1").await.unwrap();
        svc.delete_item("b1").await.unwrap();
        assert!(svc.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let svc = MenuService::new(
            FakeMenuRepository::failing(),
            FakeUploadStore::default(),
            "http://localhost:5000",
        );
        assert!(matches!(svc.list_items().await, Err(MenuError::Storage(_))));
    }
}
