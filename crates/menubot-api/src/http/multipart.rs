//! Multipart form collection for menu and upload endpoints.

use axum::extract::Multipart;

use menubot_types::menu::{MenuItemForm, UploadSlot, UploadedFile};

use crate::http::error::AppError;

/// Collect menu text fields and `modelFile` / `imageFile` parts.
///
/// File parts submitted without a filename (an empty file input) are dropped.
pub async fn read_menu_form(
    mut multipart: Multipart,
) -> Result<(MenuItemForm, Vec<UploadedFile>), AppError> {
    let mut form = MenuItemForm::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match UploadSlot::from_field_name(&name) {
            Some(slot) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                if filename.trim().is_empty() {
                    continue;
                }
                files.push(UploadedFile {
                    slot,
                    filename,
                    data: data.to_vec(),
                });
            }
            None => {
                let value = field.text().await?;
                form.set_field(&name, value);
            }
        }
    }

    Ok((form, files))
}

/// Find the part named `field_name` and return its filename and bytes.
///
/// Returns `None` when the request carries no such part.
pub async fn read_file_part(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<Option<(String, Vec<u8>)>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        return Ok(Some((filename, data.to_vec())));
    }
    Ok(None)
}
