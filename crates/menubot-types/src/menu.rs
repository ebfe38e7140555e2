//! Menu item, category and upload types.
//!
//! Every menu field except `id` is optional: items are written by arbitrary
//! CRUD clients and readers must tolerate missing values.

use serde::{Deserialize, Serialize};

/// File extensions accepted for menu images and 3D models.
pub const ALLOWED_UPLOAD_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "glb", "gltf"];

/// A single dish on the menu.
///
/// Serialized with camelCase keys (`modelUrl`, `imageUrl`) to match the
/// frontend's wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Display glyph or short image hint (e.g. an emoji).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

/// Request-scoped, point-in-time read of the menu.
pub type MenuSnapshot = Vec<MenuItem>;

/// Text fields submitted when creating or updating a menu item.
///
/// `None` means "not submitted"; on update the stored value is kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub model_url: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

impl MenuItemForm {
    /// Set a field by its form name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "id" => &mut self.id,
            "name" => &mut self.name,
            "description" => &mut self.description,
            "price" => &mut self.price,
            "image" => &mut self.image,
            "modelUrl" => &mut self.model_url,
            "imageUrl" => &mut self.image_url,
            "category" => &mut self.category,
            "subcategory" => &mut self.subcategory,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Overlay submitted fields onto `item`, keeping values that were not submitted.
    pub fn apply_to(self, item: &mut MenuItem) {
        fn overlay(target: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *target = value;
            }
        }

        overlay(&mut item.name, self.name);
        overlay(&mut item.description, self.description);
        overlay(&mut item.price, self.price);
        overlay(&mut item.image, self.image);
        overlay(&mut item.model_url, self.model_url);
        overlay(&mut item.image_url, self.image_url);
        overlay(&mut item.category, self.category);
        overlay(&mut item.subcategory, self.subcategory);
    }
}

/// Which slot of a menu item an uploaded file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSlot {
    /// Multipart field `modelFile`: a GLB/GLTF model.
    Model,
    /// Multipart field `imageFile`.
    Image,
}

impl UploadSlot {
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "modelFile" => Some(UploadSlot::Model),
            "imageFile" => Some(UploadSlot::Image),
            _ => None,
        }
    }
}

/// A file received in a multipart request, before it is stored.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub slot: UploadSlot,
    pub filename: String,
    pub data: Vec<u8>,
}

/// A file that has been written to the upload store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredUpload {
    /// Sanitized name under which the file was stored.
    pub filename: String,
}

/// Outcome of adding a subcategory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubcategoryAdded {
    Added,
    AlreadyExists,
    /// The parent category did not exist and was created alongside.
    AddedWithNewCategory,
}

/// Outcome of removing a subcategory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubcategoryRemoval {
    Removed,
    NotFound,
    CategoryNotFound,
}
