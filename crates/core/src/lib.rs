//! prompt-library-core: storage and query engine for a personal prompt library
//!
//! This crate owns the prompt and category records of a prompt library and
//! answers the questions a UI asks of them:
//! - Prompts organized in a category tree (subtree views, favorites, recent)
//! - Case-insensitive search over title, content and tags
//! - Usage tracking and summary statistics
//!
//! ## Architecture
//!
//! - **db**: SQLite record store (sqlx), first-run seeding
//! - **tree / query / stats**: pure functions over an in-memory snapshot
//! - **library**: the repository that owns the store and the snapshot
//! - **commands**: JSON command registry for UI collaborators

// Module declarations
pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod library;
pub mod logging;
pub mod query;
pub mod refine;
pub mod runtime;
pub mod stats;
pub mod tree;
pub mod util;

pub use config::Config;
pub use db::{Category, CategoryDraft, Prompt, PromptDraft};
pub use errors::{LibraryError, Result};
pub use library::PromptLibrary;
pub use query::Scope;
pub use stats::StatsSnapshot;

/// Entry point for synchronous hosts
///
/// Builds the configuration from the environment and the given setup object
/// (see [`Config::from_setup`]), then opens the library on the shared runtime.
pub fn setup(setup: serde_json::Value) -> Result<PromptLibrary> {
    let config = Config::from_setup(setup)?;
    runtime::block_on(PromptLibrary::open(config))
}
