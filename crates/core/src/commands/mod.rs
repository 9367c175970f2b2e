//! Command registry and dispatch system
//!
//! This module provides a static registry of commands that collaborators
//! (UI shells, editor plugins) call with JSON arguments. Commands are
//! registered as "category.action" (e.g., "prompts.list", "categories.delete")
//! and dispatched to handler functions that operate on a [`PromptLibrary`].
//!
//! ## Adding a new command
//!
//! 1. Create handler function: `pub fn my_command(lib: &mut PromptLibrary, args: Value) -> Result<Value>`
//! 2. Register in `REGISTRY`: `("category.action", my_command as CommandHandler)`
//! 3. Add tests for the command

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{LibraryError, Result};
use crate::library::PromptLibrary;
use crate::runtime;

pub mod categories;
pub mod prompts;
pub mod stats;

/// Type alias for command handler functions
///
/// All command handlers take the library and a JSON Value (arguments) and
/// return a Result<Value>
pub type CommandHandler = fn(&mut PromptLibrary, Value) -> Result<Value>;

/// Static command registry
///
/// Maps command names to handler functions. Initialized lazily on first access.
static REGISTRY: Lazy<HashMap<&'static str, CommandHandler>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Health check
    map.insert("ping", ping as CommandHandler);
    map.insert("library.refresh", refresh as CommandHandler);

    // Prompts
    map.insert("prompts.list", prompts::list as CommandHandler);
    map.insert("prompts.get", prompts::get as CommandHandler);
    map.insert("prompts.create", prompts::create as CommandHandler);
    map.insert("prompts.update", prompts::update as CommandHandler);
    map.insert("prompts.delete", prompts::delete as CommandHandler);
    map.insert("prompts.toggle_favorite", prompts::toggle_favorite as CommandHandler);
    map.insert("prompts.use", prompts::use_prompt as CommandHandler);
    map.insert("prompts.reset_usage", prompts::reset_usage as CommandHandler);

    // Categories
    map.insert("categories.list", categories::list as CommandHandler);
    map.insert("categories.tree", categories::tree as CommandHandler);
    map.insert("categories.create", categories::create as CommandHandler);
    map.insert("categories.move", categories::move_category as CommandHandler);
    map.insert("categories.delete", categories::delete as CommandHandler);

    // Stats
    map.insert("stats.summary", stats::summary as CommandHandler);

    map
});

/// Dispatch a command by name
///
/// Looks up the command in the registry and executes it with the provided arguments.
///
/// # Arguments
/// * `library` - The open prompt library
/// * `command` - Command name (e.g., "ping", "prompts.list")
/// * `args` - Command arguments as JSON Value
///
/// # Returns
/// Command result as JSON Value, or error if command not found
pub fn dispatch(library: &mut PromptLibrary, command: &str, args: Value) -> Result<Value> {
    match REGISTRY.get(command) {
        Some(handler) => {
            debug!(command, "dispatching command");
            handler(library, args)
        },
        None => Err(LibraryError::CommandNotFound(command.to_string())),
    }
}

/// Dispatch and fold any error into a structured error object
///
/// Returns an object with fields:
/// - `error`: true (marker that this is an error response)
/// - `message`: user-friendly error message
/// - `category`: error category for logging/handling
pub fn call(library: &mut PromptLibrary, command: &str, args: Value) -> Value {
    match dispatch(library, command, args) {
        Ok(result) => result,
        Err(err) => {
            warn!(command, category = err.category(), "command failed: {}", err);
            error_object(&err)
        },
    }
}

pub fn error_object(err: &LibraryError) -> Value {
    json!({
        "error": true,
        "message": err.user_message(),
        "category": err.category(),
    })
}

/// List all available commands
///
/// Returns a sorted list of all registered command names.
pub fn list_commands() -> Vec<String> {
    let mut commands: Vec<String> = REGISTRY.keys().map(|&k| k.to_string()).collect();
    commands.sort();
    commands
}

// ============================================================================
// Argument helpers
// ============================================================================

/// Required, non-empty string argument
pub(crate) fn required_str<'a>(command: &str, args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| LibraryError::invalid_args(command, format!("Missing {}", key)))
}

/// Optional string argument; `null` and absence both give `None`
pub(crate) fn optional_str<'a>(command: &str, args: &'a Value, key: &str) -> Result<Option<&'a str>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(LibraryError::invalid_args(command, format!("{} must be a string", key))),
    }
}

// ============================================================================
// Library Commands
// ============================================================================

/// Ping command - simple test to verify command dispatch works
///
/// Returns the input arguments with an added "pong" field.
///
/// # Example
/// ```json
/// // Input:  {"message": "hello"}
/// // Output: {"message": "hello", "pong": true}
/// ```
fn ping(_library: &mut PromptLibrary, args: Value) -> Result<Value> {
    let mut result = match args {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    result.insert("pong".to_string(), Value::Bool(true));
    Ok(Value::Object(result))
}

/// Re-read both collections from storage
fn refresh(library: &mut PromptLibrary, _args: Value) -> Result<Value> {
    runtime::block_on(library.refresh())?;
    Ok(json!({
        "prompts": library.prompts().len(),
        "categories": library.categories().len(),
    }))
}
