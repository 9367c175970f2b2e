//! Record store: durable persistence for the prompt and category collections
//!
//! Backed by a single SQLite file. Each collection is its own table, so ids
//! never alias across collections. Every write is a single statement (or one
//! transaction), which keeps records atomic for concurrent readers.

use std::path::Path;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use tracing::{debug, info, warn};

use crate::errors::Result;

pub mod categories;
pub mod prompts;
pub mod schema;
pub mod seed;
#[cfg(test)]
mod prompts_test;

pub use categories::{Category, CategoryDraft};
pub use prompts::{Prompt, PromptDraft};

/// Handle to an open library database
///
/// Cheap to clone; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (creating if needed) the database at `path` and apply the schema
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Create directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.inspect_err(|e| {
                warn!(dir = %parent.display(), "failed to create database directory: {}", e)
            })?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal),
            )
            .await?;

        // Run schema migration
        // Split by semicolon to run multiple statements
        for statement in schema::SCHEMA.split(';') {
            if statement.trim().is_empty() {
                continue;
            }
            sqlx::query(statement).execute(&pool).await?;
        }

        info!(path = %path.display(), "prompt library opened");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        debug!("closing prompt library");
        self.pool.close().await;
    }
}
