//! SQLite menu repository implementation.
//!
//! Implements `MenuRepository` from `menubot-core` using sqlx with split
//! read/write pools. Items are listed in insertion order.

use chrono::Utc;
use sqlx::Row;

use menubot_core::repository::menu::MenuRepository;
use menubot_types::error::RepositoryError;
use menubot_types::menu::MenuItem;

use super::pool::DatabasePool;

const SELECT_COLUMNS: &str =
    "id, name, description, price, image, model_url, image_url, category, subcategory";

/// SQLite-backed implementation of `MenuRepository`.
#[derive(Clone)]
pub struct SqliteMenuRepository {
    pool: DatabasePool,
}

impl SqliteMenuRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn item_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<MenuItem, sqlx::Error> {
    Ok(MenuItem {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        image: row.try_get("image")?,
        model_url: row.try_get("model_url")?,
        image_url: row.try_get("image_url")?,
        category: row.try_get("category")?,
        subcategory: row.try_get("subcategory")?,
    })
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

impl MenuRepository for SqliteMenuRepository {
    async fn list_items(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM menu_items ORDER BY rowid"
        ))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| item_from_row(row).map_err(query_error))
            .collect()
    }

    async fn get_item(&self, id: &str) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM menu_items WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        row.as_ref()
            .map(item_from_row)
            .transpose()
            .map_err(query_error)
    }

    async fn upsert_item(&self, item: &MenuItem) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO menu_items
                 (id, name, description, price, image, model_url, image_url,
                  category, subcategory, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT (id) DO UPDATE SET
                 name = excluded.name,
                 description = excluded.description,
                 price = excluded.price,
                 image = excluded.image,
                 model_url = excluded.model_url,
                 image_url = excluded.image_url,
                 category = excluded.category,
                 subcategory = excluded.subcategory,
                 updated_at = excluded.updated_at"#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.price)
        .bind(&item.image)
        .bind(&item.model_url)
        .bind(&item.image_url)
        .bind(&item.category)
        .bind(&item.subcategory)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }
}
