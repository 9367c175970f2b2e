use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite};
use tracing::{debug, info};

use super::Db;
use crate::errors::{LibraryError, Result};
use crate::util::now_millis;

/// A node of the category tree, stored flat with a parent reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id:        String,
    pub name:      String,
    pub parent_id: Option<String>,
    pub icon:      Option<String>,
    pub color:     Option<String>,
}

impl Category {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Fields supplied when creating a category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryDraft {
    pub name:      String,
    pub parent_id: Option<String>,
    pub icon:      Option<String>,
    pub color:     Option<String>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn under(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LibraryError::validation("Category name must not be empty"));
    }
    Ok(())
}

/// Every category, in insertion order
pub async fn list_categories(db: &Db) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, parent_id, icon, color FROM categories ORDER BY rowid",
    )
    .fetch_all(db.pool())
    .await?;

    Ok(categories)
}

pub async fn get_category(db: &Db, id: &str) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, parent_id, icon, color FROM categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db.pool())
    .await?;

    Ok(category)
}

pub async fn count_categories<'e, E>(executor: E) -> Result<i64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(executor)
        .await?;
    Ok(count)
}

/// Insert or replace a category by id
///
/// Replacing keeps the row's position, so listing order stays stable across
/// edits.
pub async fn put_category(db: &Db, category: &Category) -> Result<()> {
    put_category_with(db.pool(), category).await
}

pub(crate) async fn put_category_with<'e, E>(executor: E, category: &Category) -> Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO categories (id, name, parent_id, icon, color) VALUES (?, ?, ?, ?, ?)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            parent_id = excluded.parent_id,
            icon = excluded.icon,
            color = excluded.color",
    )
    .bind(&category.id)
    .bind(&category.name)
    .bind(&category.parent_id)
    .bind(&category.icon)
    .bind(&category.color)
    .execute(executor)
    .await?;

    debug!(id = %category.id, "category stored");
    Ok(())
}

/// Remove a category row only; absent ids are a no-op
///
/// Prompts still pointing at the id are left alone. Use
/// [`delete_category_cascade`] to uncategorize them as well.
pub async fn delete_category(db: &Db, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;
    Ok(())
}

/// Uncategorize every prompt in `id`, then remove the category
///
/// Both steps run in one transaction: either every affected prompt is
/// rewritten with a NULL category and the row is gone, or nothing changed.
/// Child categories are not touched and keep their (now dangling) parent id.
/// Returns the number of prompts that were uncategorized.
pub async fn delete_category_cascade(db: &Db, id: &str) -> Result<u64> {
    let now = now_millis();
    let mut tx = db.pool().begin().await?;

    let uncategorized = sqlx::query(
        "UPDATE prompts
            SET category_id = NULL,
                updated_at = MAX(?, created_at, updated_at)
          WHERE category_id = ?",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let removed = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    info!(id, uncategorized, removed, "category deleted");
    Ok(uncategorized)
}
