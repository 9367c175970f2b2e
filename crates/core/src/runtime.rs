//! Global Async Runtime
//!
//! Provides a shared Tokio runtime for the synchronous command boundary.
//! Storage calls are async; callers that are not themselves async drive them
//! through [`block_on`].

use once_cell::sync::Lazy;
use tokio::runtime::Runtime;

/// Global shared Tokio runtime
///
/// Initialized lazily on first use by the synchronous command boundary.
pub static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .thread_name("prompt-library")
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime")
});

/// Run a future to completion (blocking the current thread)
///
/// Must not be called from inside an async context.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    RUNTIME.block_on(future)
}
