//! SQLite category/subcategory repository implementation.
//!
//! Subcategories reference their category by name with `ON DELETE CASCADE`,
//! so deleting a category drops its subcategories in the same statement.

use std::collections::BTreeMap;

use chrono::Utc;
use sqlx::Row;

use menubot_core::repository::category::CategoryRepository;
use menubot_types::error::RepositoryError;
use menubot_types::menu::{SubcategoryAdded, SubcategoryRemoval};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CategoryRepository`.
#[derive(Clone)]
pub struct SqliteCategoryRepository {
    pool: DatabasePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

impl CategoryRepository for SqliteCategoryRepository {
    async fn list_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT name FROM categories ORDER BY rowid")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(query_error))
            .collect()
    }

    async fn add_category(&self, name: &str) -> Result<(), RepositoryError> {
        sqlx::query("INSERT OR IGNORE INTO categories (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(())
    }

    async fn delete_category(&self, name: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM categories WHERE name = ?")
            .bind(name)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(())
    }

    async fn list_subcategories(&self) -> Result<BTreeMap<String, Vec<String>>, RepositoryError> {
        let mut map: BTreeMap<String, Vec<String>> = self
            .list_categories()
            .await?
            .into_iter()
            .map(|name| (name, Vec::new()))
            .collect();

        let rows = sqlx::query("SELECT category, name FROM subcategories ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        for row in &rows {
            let category: String = row.try_get("category").map_err(query_error)?;
            let name: String = row.try_get("name").map_err(query_error)?;
            map.entry(category).or_default().push(name);
        }

        Ok(map)
    }

    async fn add_subcategory(
        &self,
        category: &str,
        name: &str,
    ) -> Result<SubcategoryAdded, RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let created_category =
            sqlx::query("INSERT OR IGNORE INTO categories (name, created_at) VALUES (?, ?)")
                .bind(category)
                .bind(&now)
                .execute(&mut *tx)
                .await
                .map_err(query_error)?
                .rows_affected()
                > 0;

        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO subcategories (category, name, created_at) VALUES (?, ?, ?)",
        )
        .bind(category)
        .bind(name)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?
        .rows_affected()
            > 0;

        tx.commit().await.map_err(query_error)?;

        Ok(match (created_category, inserted) {
            (true, _) => SubcategoryAdded::AddedWithNewCategory,
            (false, true) => SubcategoryAdded::Added,
            (false, false) => SubcategoryAdded::AlreadyExists,
        })
    }

    async fn delete_subcategory(
        &self,
        category: &str,
        name: &str,
    ) -> Result<SubcategoryRemoval, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let exists = sqlx::query("SELECT 1 FROM categories WHERE name = ?")
            .bind(category)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?
            .is_some();
        if !exists {
            return Ok(SubcategoryRemoval::CategoryNotFound);
        }

        let removed = sqlx::query("DELETE FROM subcategories WHERE category = ? AND name = ?")
            .bind(category)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?
            .rows_affected()
            > 0;

        tx.commit().await.map_err(query_error)?;

        Ok(if removed {
            SubcategoryRemoval::Removed
        } else {
            SubcategoryRemoval::NotFound
        })
    }
}
