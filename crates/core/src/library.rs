//! The prompt library repository
//!
//! [`PromptLibrary`] owns the database handle and an in-memory copy of both
//! collections. Reads are served from the copy; every mutation is validated,
//! written through to the store, and followed by a re-read so the copy keeps
//! the store's ordering.

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::db::{categories, prompts, seed, Category, CategoryDraft, Db, Prompt, PromptDraft};
use crate::errors::{LibraryError, Result};
use crate::query::{self, Scope};
use crate::refine::{refine_with, Refiner};
use crate::stats::{self, StatsSnapshot};
use crate::tree::CategoryTree;
use crate::util::{normalize_tags, now_millis};

const DEFAULT_CATEGORY_ICON: &str = "folder";
const DEFAULT_CATEGORY_COLOR: &str = "gray";

#[derive(Debug)]
pub struct PromptLibrary {
    db:         Db,
    config:     Config,
    prompts:    Vec<Prompt>,
    categories: Vec<Category>,
}

impl PromptLibrary {
    /// Open the store named by `config`, seed it on first run, load both
    /// collections
    pub async fn open(config: Config) -> Result<Self> {
        let db = Db::open(&config.db_path).await?;

        if config.seed_on_first_run {
            seed::seed_if_empty(&db).await?;
        }

        let mut library = Self {
            db,
            config,
            prompts: Vec::new(),
            categories: Vec::new(),
        };
        library.refresh().await?;
        Ok(library)
    }

    /// Re-read both collections from the store
    pub async fn refresh(&mut self) -> Result<()> {
        self.prompts = prompts::list_prompts(&self.db).await?;
        self.categories = categories::list_categories(&self.db).await?;
        debug!(
            prompts = self.prompts.len(),
            categories = self.categories.len(),
            "library refreshed"
        );
        Ok(())
    }

    async fn refresh_prompts(&mut self) -> Result<()> {
        self.prompts = prompts::list_prompts(&self.db).await?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Every prompt, most recently updated first
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn prompt(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn tree(&self) -> CategoryTree<'_> {
        CategoryTree::new(&self.categories)
    }

    // ------------------------------------------------------------------
    // Prompts
    // ------------------------------------------------------------------

    pub async fn create_prompt(&mut self, draft: PromptDraft) -> Result<Prompt> {
        draft.validate()?;
        self.check_category_ref(draft.category_id.as_deref())?;

        let now = now_millis();
        let prompt = Prompt {
            id:           Uuid::new_v4().to_string(),
            title:        draft.title,
            content:      draft.content,
            category_id:  draft.category_id,
            tags:         normalize_tags(&draft.tags),
            is_favorite:  draft.is_favorite,
            usage_count:  0,
            last_used_at: None,
            created_at:   now,
            updated_at:   now,
        };

        prompts::put_prompt(&self.db, &prompt).await?;
        self.refresh_prompts().await?;
        info!(id = %prompt.id, "prompt created");
        Ok(prompt)
    }

    /// Replace the editable fields of an existing prompt
    ///
    /// Usage, creation time and id are kept. Returns `None` when no prompt
    /// has `id`.
    pub async fn update_prompt(&mut self, id: &str, draft: PromptDraft) -> Result<Option<Prompt>> {
        draft.validate()?;
        let Some(current) = self.prompt(id).cloned() else {
            return Ok(None);
        };

        let merged = Prompt {
            title: draft.title,
            content: draft.content,
            category_id: draft.category_id,
            tags: normalize_tags(&draft.tags),
            is_favorite: draft.is_favorite,
            ..current
        };
        self.save_prompt(merged).await.map(Some)
    }

    /// Validate, stamp `updated_at`, and store a whole prompt record
    ///
    /// The category reference is only checked when it differs from the
    /// stored one, so prompts left in a deleted category stay editable.
    pub async fn save_prompt(&mut self, mut prompt: Prompt) -> Result<Prompt> {
        prompt.validate()?;
        let unchanged = self
            .prompt(&prompt.id)
            .is_some_and(|current| current.category_id == prompt.category_id);
        if !unchanged {
            self.check_category_ref(prompt.category_id.as_deref())?;
        }

        prompt.updated_at = now_millis().max(prompt.created_at).max(prompt.updated_at);

        prompts::put_prompt(&self.db, &prompt).await?;
        self.refresh_prompts().await?;
        Ok(prompt)
    }

    pub async fn toggle_favorite(&mut self, id: &str) -> Result<Option<Prompt>> {
        let Some(mut prompt) = self.prompt(id).cloned() else {
            return Ok(None);
        };
        prompt.is_favorite = !prompt.is_favorite;
        self.save_prompt(prompt).await.map(Some)
    }

    /// Count one copy of the prompt's content
    pub async fn record_usage(&mut self, id: &str) -> Result<Option<Prompt>> {
        let Some(mut prompt) = self.prompt(id).cloned() else {
            debug!(id, "usage recorded for unknown prompt");
            return Ok(None);
        };

        let now = now_millis();
        prompt.usage_count = prompt.usage_count.saturating_add(1);
        prompt.last_used_at = Some(prompt.last_used_at.map_or(now, |last| last.max(now)));

        let saved = self.save_prompt(prompt).await?;
        debug!(id, usage_count = saved.usage_count, "usage recorded");
        Ok(Some(saved))
    }

    /// Explicitly zero the usage counter
    pub async fn reset_usage(&mut self, id: &str) -> Result<Option<Prompt>> {
        let Some(mut prompt) = self.prompt(id).cloned() else {
            return Ok(None);
        };
        prompt.usage_count = 0;
        prompt.last_used_at = None;
        self.save_prompt(prompt).await.map(Some)
    }

    /// Remove a prompt; unknown ids are a no-op
    pub async fn delete_prompt(&mut self, id: &str) -> Result<()> {
        prompts::delete_prompt(&self.db, id).await?;
        self.refresh_prompts().await
    }

    fn check_category_ref(&self, category_id: Option<&str>) -> Result<()> {
        match category_id {
            Some(id) if self.category(id).is_none() => Err(LibraryError::validation(format!(
                "Unknown category: {}",
                id
            ))),
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn create_category(&mut self, draft: CategoryDraft) -> Result<Category> {
        draft.validate()?;
        if let Some(parent) = draft.parent_id.as_deref() {
            if self.category(parent).is_none() {
                return Err(LibraryError::validation(format!(
                    "Unknown parent category: {}",
                    parent
                )));
            }
        }

        let category = Category {
            id:        Uuid::new_v4().to_string(),
            name:      draft.name.trim().to_string(),
            parent_id: draft.parent_id,
            icon:      draft.icon.or_else(|| Some(DEFAULT_CATEGORY_ICON.to_string())),
            color:     draft.color.or_else(|| Some(DEFAULT_CATEGORY_COLOR.to_string())),
        };

        categories::put_category(&self.db, &category).await?;
        self.refresh().await?;
        info!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Reparent a category (`None` makes it a root)
    ///
    /// Rejects a parent that does not exist or that lies inside the
    /// category's own subtree. Returns `None` when no category has `id`.
    pub async fn move_category(
        &mut self,
        id: &str,
        new_parent: Option<&str>,
    ) -> Result<Option<Category>> {
        let Some(mut category) = self.category(id).cloned() else {
            return Ok(None);
        };

        if let Some(parent) = new_parent {
            let tree = self.tree();
            if !tree.contains(parent) {
                return Err(LibraryError::validation(format!(
                    "Unknown parent category: {}",
                    parent
                )));
            }
            if tree.would_cycle(id, parent) {
                return Err(LibraryError::validation(format!(
                    "Moving '{}' under '{}' would make it its own ancestor",
                    category.name, parent
                )));
            }
        }

        category.parent_id = new_parent.map(str::to_string);
        categories::put_category(&self.db, &category).await?;
        self.refresh().await?;
        Ok(Some(category))
    }

    /// Delete a category and uncategorize its prompts
    ///
    /// Subcategories are kept and become roots. Returns how many prompts lost
    /// their category; unknown ids are a no-op returning 0.
    pub async fn delete_category(&mut self, id: &str) -> Result<u64> {
        let uncategorized = categories::delete_category_cascade(&self.db, id).await?;
        self.refresh().await?;
        Ok(uncategorized)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn query(&self, scope: &Scope, search: Option<&str>) -> Vec<Prompt> {
        query::query(&self.prompts, &self.categories, scope, search)
    }

    /// Query with a collaborator's filter word (`"all"`, `"recent"`, an id, ...)
    pub fn query_filter(&self, filter: &str, search: Option<&str>) -> Vec<Prompt> {
        let scope = Scope::from_filter(filter, self.config.recent_limit);
        self.query(&scope, search)
    }

    pub fn stats(&self) -> StatsSnapshot {
        stats::summarize(&self.prompts, &self.categories)
    }

    /// Ask an external refiner to rewrite `text`, bounded by the configured
    /// timeout
    pub async fn refine_prompt<R: Refiner>(&self, refiner: &R, text: &str) -> Result<String> {
        refine_with(refiner, text, self.config.refine_timeout()).await
    }

    pub async fn close(self) {
        self.db.close().await;
    }
}
