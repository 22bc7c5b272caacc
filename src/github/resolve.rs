// src/github/resolve.rs
// =============================================================================
// Turns a repository URL into an owner/name pair.
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo/
//   - https://github.com/owner/repo.git
//   - https://github.com/owner/repo?tab=readme#intro
//
// The owner and name are the *last two* non-empty path segments, so this also
// works for GitHub Enterprise hosts that put the repo under a prefix.
//
// check_repo_url is the stricter test: it only accepts github.com URLs with
// exactly two segments, and then makes sure the page really exists.
// =============================================================================

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use super::client::GitHubClient;
use crate::error::{Result, ScaleError};

/// An `owner/name` pair identifying one repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoPath {
    pub owner: String,
    pub name: String,
}

impl RepoPath {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// Resolves a repository URL to its owner and name
//
// Returns: RepoPath, or InvalidRepoUrl when the URL can't be parsed or has
// fewer than two non-empty path segments after the host.
//
// Example:
//   "https://github.com/rust-lang/rust/" -> RepoPath { owner: "rust-lang", name: "rust" }
pub fn resolve_path(repo_url: &str) -> Result<RepoPath> {
    let invalid = |reason: &str| ScaleError::InvalidRepoUrl {
        url: repo_url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(repo_url.trim()).map_err(|e| invalid(&e.to_string()))?;
    if parsed.host_str().is_none() {
        return Err(invalid("URL has no host"));
    }

    // path_segments() already drops the query string and fragment
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 2 {
        return Err(invalid("expected /owner/repo after the host"));
    }

    let owner = segments[segments.len() - 2];
    let name = segments[segments.len() - 1];
    let name = name.strip_suffix(".git").unwrap_or(name);

    if name.is_empty() {
        return Err(invalid("repository name is empty"));
    }

    Ok(RepoPath::new(owner, name))
}

fn repo_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://github\.com/[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+/?$")
            .expect("repository URL pattern is valid")
    })
}

/// Checks only the shape of the URL, without touching the network
pub fn looks_like_repo_url(repo_url: &str) -> bool {
    repo_url_pattern().is_match(repo_url.trim())
}

/// Strict shape check plus a request to make sure the page exists
///
/// A private or deleted repository answers 404 to anonymous requests,
/// so "reachable" here also means "public".
pub async fn check_repo_url(client: &GitHubClient, repo_url: &str) -> Result<RepoPath> {
    if !looks_like_repo_url(repo_url) {
        return Err(ScaleError::InvalidRepoUrl {
            url: repo_url.to_string(),
            reason: "expected https://github.com/<owner>/<repo>".to_string(),
        });
    }

    let path = resolve_path(repo_url)?;

    if !client.page_exists(repo_url.trim()).await? {
        return Err(ScaleError::RepoNotFound(path.to_string()));
    }

    Ok(path)
}
