//! Prompt query engine
//!
//! Pure filtering over a snapshot. Input prompts are expected in display
//! order (most recently updated first, as the store returns them) and that
//! order is never changed: every step only drops prompts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::db::{Category, Prompt};
use crate::tree::CategoryTree;

/// Which slice of the library a view shows before text search applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Scope {
    All,
    Favorites,
    /// The first `n` prompts of the ordered snapshot
    Recent(usize),
    /// A category and all of its descendants
    Category(String),
}

impl Scope {
    /// Parse a view filter as sent by collaborators
    ///
    /// `"all"`, `"favorites"` and `"recent"` are reserved words; anything
    /// else is a category id. `"recent"` shows `recent_limit` prompts.
    pub fn from_filter(filter: &str, recent_limit: usize) -> Self {
        match filter {
            "" | "all" => Scope::All,
            "favorites" => Scope::Favorites,
            "recent" => Scope::Recent(recent_limit),
            category_id => Scope::Category(category_id.to_string()),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all"),
            Scope::Favorites => write!(f, "favorites"),
            Scope::Recent(n) => write!(f, "recent({})", n),
            Scope::Category(id) => write!(f, "category({})", id),
        }
    }
}

/// Filter `prompts` by scope, then by case-insensitive search text
pub fn query(
    prompts: &[Prompt],
    categories: &[Category],
    scope: &Scope,
    search: Option<&str>,
) -> Vec<Prompt> {
    let scoped: Vec<&Prompt> = match scope {
        Scope::All => prompts.iter().collect(),
        Scope::Favorites => prompts.iter().filter(|p| p.is_favorite).collect(),
        Scope::Recent(n) => prompts.iter().take(*n).collect(),
        Scope::Category(id) => {
            let subtree = CategoryTree::new(categories).subtree_ids(id);
            prompts
                .iter()
                .filter(|p| {
                    p.category_id
                        .as_ref()
                        .is_some_and(|category_id| subtree.contains(category_id))
                })
                .collect()
        },
    };

    let needle = search
        .filter(|text| !text.trim().is_empty())
        .map(str::to_lowercase);

    scoped
        .into_iter()
        .filter(|p| needle.as_deref().map_or(true, |needle| matches_text(p, needle)))
        .cloned()
        .collect()
}

/// `needle` must already be lowercase
fn matches_text(prompt: &Prompt, needle: &str) -> bool {
    prompt.title.to_lowercase().contains(needle)
        || prompt.content.to_lowercase().contains(needle)
        || prompt
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
