use serde_json::{json, Value};

use super::{optional_str, required_str};
use crate::db::{Prompt, PromptDraft};
use crate::errors::{LibraryError, Result};
use crate::library::PromptLibrary;
use crate::query::Scope;
use crate::runtime;
use crate::util::{normalize_tags, parse_tag_list};

/// `{filter?: "all"|"favorites"|"recent"|<categoryId>, scope?: Scope, search?: string}`
pub fn list(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let search = optional_str("prompts.list", &args, "search")?;

    let prompts = match args.get("scope") {
        Some(scope) if !scope.is_null() => {
            let scope: Scope = serde_json::from_value(scope.clone()).map_err(|e| {
                LibraryError::invalid_args("prompts.list", format!("bad scope: {}", e))
            })?;
            library.query(&scope, search)
        },
        _ => {
            let filter = optional_str("prompts.list", &args, "filter")?.unwrap_or("all");
            library.query_filter(filter, search)
        },
    };

    Ok(json!({ "prompts": prompts }))
}

pub fn get(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let id = required_str("prompts.get", &args, "id")?;
    Ok(json!({ "prompt": library.prompt(id) }))
}

pub fn create(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let draft = draft_from_args("prompts.create", &args, None)?;

    let prompt = runtime::block_on(library.create_prompt(draft))?;

    Ok(json!(prompt))
}

/// Fields left out of the arguments keep their current values
pub fn update(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let id = required_str("prompts.update", &args, "id")?;
    let Some(current) = library.prompt(id).cloned() else {
        return Ok(json!({ "success": false, "found": false }));
    };
    let draft = draft_from_args("prompts.update", &args, Some(&current))?;

    let prompt = runtime::block_on(library.update_prompt(id, draft))?;

    Ok(json!({ "success": prompt.is_some(), "prompt": prompt }))
}

pub fn delete(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let id = required_str("prompts.delete", &args, "id")?;

    runtime::block_on(library.delete_prompt(id))?;

    Ok(json!({ "success": true }))
}

pub fn toggle_favorite(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let id = required_str("prompts.toggle_favorite", &args, "id")?;

    let prompt = runtime::block_on(library.toggle_favorite(id))?;

    Ok(json!({ "success": prompt.is_some(), "prompt": prompt }))
}

/// The prompt's content was copied; count it
pub fn use_prompt(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let id = required_str("prompts.use", &args, "id")?;

    let prompt = runtime::block_on(library.record_usage(id))?;

    Ok(json!({
        "success": prompt.is_some(),
        "usageCount": prompt.as_ref().map(|p| p.usage_count),
        "content": prompt.map(|p| p.content),
    }))
}

pub fn reset_usage(library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let id = required_str("prompts.reset_usage", &args, "id")?;

    let prompt = runtime::block_on(library.reset_usage(id))?;

    Ok(json!({ "success": prompt.is_some(), "prompt": prompt }))
}

/// Build a draft from JSON arguments, defaulting absent fields to `base`
fn draft_from_args(command: &str, args: &Value, base: Option<&Prompt>) -> Result<PromptDraft> {
    let text = |key: &str, current: Option<&String>| -> Result<String> {
        match (optional_str(command, args, key)?, current) {
            (Some(value), _) => Ok(value.to_string()),
            (None, Some(current)) => Ok(current.clone()),
            (None, None) => Err(LibraryError::invalid_args(command, format!("Missing {}", key))),
        }
    };

    let title = text("title", base.map(|p| &p.title))?;
    let content = text("content", base.map(|p| &p.content))?;

    let category_id = match args.get("categoryId") {
        None => base.and_then(|p| p.category_id.clone()),
        Some(_) => optional_str(command, args, "categoryId")?.map(String::from),
    };

    let tags = match args.get("tags") {
        None | Some(Value::Null) => base.map(|p| p.tags.clone()).unwrap_or_default(),
        Some(Value::String(raw)) => parse_tag_list(raw),
        Some(Value::Array(items)) => normalize_tags(items.iter().filter_map(Value::as_str)),
        Some(_) => {
            return Err(LibraryError::invalid_args(
                command,
                "tags must be a list or a comma-separated string",
            ))
        },
    };

    let is_favorite = match args.get("isFavorite") {
        None | Some(Value::Null) => base.is_some_and(|p| p.is_favorite),
        Some(value) => value.as_bool().ok_or_else(|| {
            LibraryError::invalid_args(command, "isFavorite must be a boolean")
        })?,
    };

    Ok(PromptDraft {
        title,
        content,
        category_id,
        tags,
        is_favorite,
    })
}
