use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite};
use tracing::debug;

use super::Db;
use crate::errors::{LibraryError, Result};
use crate::util::normalize_tags;

/// A stored prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id:           String,
    pub title:        String,
    pub content:      String,
    pub category_id:  Option<String>,
    pub tags:         Vec<String>,
    pub is_favorite:  bool,
    pub usage_count:  u32,
    pub last_used_at: Option<i64>,
    pub created_at:   i64,
    pub updated_at:   i64,
}

impl Prompt {
    /// Reject prompts with a blank title or content
    pub fn validate(&self) -> Result<()> {
        validate_text(&self.title, &self.content)
    }
}

/// Caller-editable fields of a prompt
///
/// Used both for creation and for edits; identity, usage and timestamps are
/// owned by the library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptDraft {
    pub title:       String,
    pub content:     String,
    pub category_id: Option<String>,
    pub tags:        Vec<String>,
    pub is_favorite: bool,
}

impl PromptDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_text(&self.title, &self.content)
    }
}

fn validate_text(title: &str, content: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(LibraryError::validation("Prompt title must not be empty"));
    }
    if content.trim().is_empty() {
        return Err(LibraryError::validation("Prompt content must not be empty"));
    }
    Ok(())
}

/// Row shape of the `prompts` table; tags are a JSON array in a TEXT column
#[derive(Debug, FromRow)]
struct PromptRow {
    id:           String,
    title:        String,
    content:      String,
    category_id:  Option<String>,
    tags:         String,
    is_favorite:  bool,
    usage_count:  i64,
    last_used_at: Option<i64>,
    created_at:   i64,
    updated_at:   i64,
}

impl TryFrom<PromptRow> for Prompt {
    type Error = LibraryError;

    fn try_from(row: PromptRow) -> Result<Self> {
        let tags: Vec<String> = serde_json::from_str(&row.tags)?;
        let usage_count = u32::try_from(row.usage_count).map_err(|_| {
            LibraryError::Other(format!(
                "Prompt {} has an invalid usage count: {}",
                row.id, row.usage_count
            ))
        })?;

        Ok(Prompt {
            id: row.id,
            title: row.title,
            content: row.content,
            category_id: row.category_id,
            tags,
            is_favorite: row.is_favorite,
            usage_count,
            last_used_at: row.last_used_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_PROMPTS: &str = "SELECT id, title, content, category_id, tags, is_favorite, usage_count, \
     last_used_at, created_at, updated_at FROM prompts";

/// Every prompt, most recently touched first
pub async fn list_prompts(db: &Db) -> Result<Vec<Prompt>> {
    let rows = sqlx::query_as::<_, PromptRow>(&format!(
        "{} ORDER BY updated_at DESC, created_at DESC, id ASC",
        SELECT_PROMPTS
    ))
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(Prompt::try_from).collect()
}

pub async fn get_prompt(db: &Db, id: &str) -> Result<Option<Prompt>> {
    let row = sqlx::query_as::<_, PromptRow>(&format!("{} WHERE id = ?", SELECT_PROMPTS))
        .bind(id)
        .fetch_optional(db.pool())
        .await?;

    row.map(Prompt::try_from).transpose()
}

/// Insert or wholesale-replace a prompt by id
pub async fn put_prompt(db: &Db, prompt: &Prompt) -> Result<()> {
    put_prompt_with(db.pool(), prompt).await
}

pub(crate) async fn put_prompt_with<'e, E>(executor: E, prompt: &Prompt) -> Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let tags_json = serde_json::to_string(&prompt.tags)?;

    sqlx::query(
        "INSERT OR REPLACE INTO prompts
            (id, title, content, category_id, tags, is_favorite, usage_count, last_used_at, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&prompt.id)
    .bind(&prompt.title)
    .bind(&prompt.content)
    .bind(&prompt.category_id)
    .bind(tags_json)
    .bind(prompt.is_favorite)
    .bind(i64::from(prompt.usage_count))
    .bind(prompt.last_used_at)
    .bind(prompt.created_at)
    .bind(prompt.updated_at)
    .execute(executor)
    .await?;

    debug!(id = %prompt.id, "prompt stored");
    Ok(())
}

/// Remove a prompt; absent ids are a no-op
pub async fn delete_prompt(db: &Db, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM prompts WHERE id = ?")
        .bind(id)
        .execute(db.pool())
        .await?;

    debug!(id, removed = result.rows_affected(), "prompt delete");
    Ok(())
}
