//! Seam for the external text-refinement service
//!
//! The library never talks to a model provider itself. Hosts plug in a
//! [`Refiner`]; the library bounds each call with a timeout and falls back to
//! the original text when the service answers with nothing.

use std::{future::Future, time::Duration};

use tracing::warn;

use crate::errors::{LibraryError, Result};

/// An external, fallible text rewriter
pub trait Refiner {
    fn refine(&self, text: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Run `refiner` over `text` with an upper time bound
///
/// A blank answer returns `text` unchanged. Failures and timeouts are
/// reported as [`LibraryError::RefineError`]; nothing is retried.
pub async fn refine_with<R: Refiner>(
    refiner: &R,
    text: &str,
    timeout: Duration,
) -> Result<String> {
    if text.trim().is_empty() {
        return Err(LibraryError::validation("Nothing to refine"));
    }

    let refined = match tokio::time::timeout(timeout, refiner.refine(text)).await {
        Ok(Ok(refined)) => refined,
        Ok(Err(LibraryError::RefineError(reason))) => return Err(LibraryError::RefineError(reason)),
        Ok(Err(err)) => return Err(LibraryError::RefineError(err.to_string())),
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "refinement timed out");
            return Err(LibraryError::RefineError(format!(
                "no answer within {}s",
                timeout.as_secs()
            )));
        },
    };

    if refined.trim().is_empty() {
        Ok(text.to_string())
    } else {
        Ok(refined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Refiner for Upper {
        async fn refine(&self, text: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    struct Silent;

    impl Refiner for Silent {
        async fn refine(&self, _text: &str) -> Result<String> {
            Ok("   ".to_string())
        }
    }

    struct MissingKey;

    impl Refiner for MissingKey {
        async fn refine(&self, _text: &str) -> Result<String> {
            Err(LibraryError::ConfigError("API key not found".to_string()))
        }
    }

    struct Slow;

    impl Refiner for Slow {
        async fn refine(&self, text: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(text.to_string())
        }
    }

    #[tokio::test]
    async fn test_refine_returns_service_text() {
        let out = refine_with(&Upper, "write a poem", Duration::from_secs(1)).await.unwrap();
        assert_eq!(out, "WRITE A POEM");
    }

    #[tokio::test]
    async fn test_blank_answer_falls_back() {
        let out = refine_with(&Silent, "write a poem", Duration::from_secs(1)).await.unwrap();
        assert_eq!(out, "write a poem");
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let err = refine_with(&MissingKey, "write a poem", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "refine");
        assert!(err.to_string().contains("API key"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let err = refine_with(&Slow, "write a poem", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::RefineError(_)));
    }

    #[tokio::test]
    async fn test_blank_input_rejected() {
        let err = refine_with(&Upper, "  ", Duration::from_secs(1)).await.unwrap_err();
        assert_eq!(err.category(), "validation");
    }
}
