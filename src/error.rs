// src/error.rs
// =============================================================================
// Typed errors for everything that talks to GitHub or parses user input.
//
// main.rs still uses anyhow for the top-level glue, but every function below
// it returns one of these variants so callers can tell "that repo doesn't
// exist" apart from "your token ran out".
//
// Rust concepts:
// - thiserror: derives Display and Error from the #[error(...)] attributes
// - #[from]: lets the ? operator convert reqwest errors automatically
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScaleError>;

#[derive(Debug, Error)]
pub enum ScaleError {
    /// The input does not look like `https://host/owner/repo`
    #[error("invalid repository URL '{url}': {reason}")]
    InvalidRepoUrl { url: String, reason: String },

    #[error("repository '{0}' not found (is it public?)")]
    RepoNotFound(String),

    #[error("user '{0}' not found")]
    UserNotFound(String),

    /// Neither `main` nor `master` exists
    #[error("repository '{0}' has neither a 'main' nor a 'master' branch")]
    NoDefaultBranch(String),

    /// HTTP 403 / 429; `reset_at` is the epoch second from x-ratelimit-reset
    #[error("GitHub API rate limit exceeded{}", reset_hint(.reset_at))]
    RateLimited { reset_at: Option<u64> },

    #[error("GitHub rejected the token (HTTP 401)")]
    Unauthorized,

    #[error("no GitHub token configured (set GITHUB_TOKEN or TOKEN, or pass --token)")]
    MissingToken,

    /// Any other non-2xx response
    #[error("GET {url} failed: HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    /// The body parsed as JSON but not into the shape we expected
    #[error("unexpected response shape from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Readme (or other file) content we could not decode
    #[error("could not decode content: {0}")]
    InvalidContent(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

fn reset_hint(reset_at: &Option<u64>) -> String {
    match reset_at {
        Some(epoch) => format!(" (resets at unix time {})", epoch),
        None => String::new(),
    }
}

impl ScaleError {
    /// True for 404-style failures, whatever resource they refer to
    pub fn is_not_found(&self) -> bool {
        match self {
            ScaleError::RepoNotFound(_) | ScaleError::UserNotFound(_) => true,
            ScaleError::HttpStatus { status, .. } => *status == StatusCode::NOT_FOUND,
            _ => false,
        }
    }

    /// Re-labels a bare 404 as a resource-specific error
    ///
    /// The HTTP layer only knows it got a 404 for some URL; the caller knows
    /// whether that URL was a repo or a user.
    pub fn or_not_found(self, not_found: impl FnOnce() -> ScaleError) -> ScaleError {
        match self {
            ScaleError::HttpStatus { status, .. } if status == StatusCode::NOT_FOUND => not_found(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_not_found_relabels_404() {
        let err = ScaleError::HttpStatus {
            url: "https://api.github.com/repos/a/b".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        let err = err.or_not_found(|| ScaleError::RepoNotFound("a/b".to_string()));
        assert!(matches!(err, ScaleError::RepoNotFound(ref p) if p == "a/b"));
    }

    #[test]
    fn test_or_not_found_keeps_other_errors() {
        let err = ScaleError::RateLimited { reset_at: None };
        let err = err.or_not_found(|| ScaleError::UserNotFound("x".to_string()));
        assert!(matches!(err, ScaleError::RateLimited { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_rate_limit_message_includes_reset() {
        let err = ScaleError::RateLimited {
            reset_at: Some(1_700_000_000),
        };
        assert_eq!(
            err.to_string(),
            "GitHub API rate limit exceeded (resets at unix time 1700000000)"
        );
    }
}
