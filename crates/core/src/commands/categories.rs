use serde_json::{json, Value};

use super::{optional_str, required_str};
use crate::db::CategoryDraft;
use crate::errors::{LibraryError, Result};
use crate::library::PromptLibrary;
use crate::runtime;

pub fn list(library: &mut PromptLibrary, _args: Value) -> Result<Value> {
    Ok(json!({ "categories": library.categories() }))
}

/// Depth-first rows for rendering a nested sidebar
pub fn tree(library: &mut PromptLibrary, _args: Value) -> Result<Value> {
    let tree = library.tree();
    let rows: Vec<Value> = tree
        .walk()
        .into_iter()
        .map(|row| {
            json!({
                "depth": row.depth,
                "category": row.category,
                "children": tree.children(&row.category.id).len(),
            })
        })
        .collect();

    Ok(json!({ "rows": rows }))
}

pub fn create(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let draft: CategoryDraft = serde_json::from_value(args)
        .map_err(|e| LibraryError::invalid_args("categories.create", e.to_string()))?;

    let category = runtime::block_on(library.create_category(draft))?;

    Ok(json!(category))
}

/// `{id, parentId: string | null}`
pub fn move_category(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let id = required_str("categories.move", &args, "id")?;
    let parent_id = optional_str("categories.move", &args, "parentId")?;

    let category = runtime::block_on(library.move_category(id, parent_id))?;

    Ok(json!({ "success": category.is_some(), "category": category }))
}

/// Prompts in the category become uncategorized; subcategories become roots
pub fn delete(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let id = required_str("categories.delete", &args, "id")?;

    let uncategorized = runtime::block_on(library.delete_category(id))?;

    Ok(json!({ "success": true, "uncategorized": uncategorized }))
}
