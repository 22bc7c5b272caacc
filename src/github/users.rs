// src/github/users.rs
// =============================================================================
// User lookup, user search, and listing a user's repositories.
//
// Search strategy:
// - If the search term has login syntax and that user exists, use it directly
// - Otherwise run a user search and hand back the candidate logins
//   (first page only, at most 100 results)
//
// Repository listing pages through /users/{login}/repos 100 at a time.
// GitHub can return overlapping pages when repos are created or renamed
// mid-listing, so results are deduplicated by numeric id (see pages.rs).
// =============================================================================

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use super::client::GitHubClient;
use super::pages::collect_pages;
use super::schema::{RepoSummary, UserDto, UserSearchDto};
use crate::error::{Result, ScaleError};

// GitHub caps logins at 39 characters
const MAX_LOGIN_LEN: usize = 39;

/// Outcome of resolving a search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMatch {
    /// The term is an existing login
    Exact(String),
    /// The term was searched; these logins came back (possibly none)
    Candidates(Vec<String>),
}

/// Resolves a search term to one login, or to a list of candidates
pub async fn resolve_user(client: &GitHubClient, term: &str) -> Result<UserMatch> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(UserMatch::Candidates(Vec::new()));
    }

    // Anything that can't be a login (spaces, slashes, ...) would hit some
    // other endpoint under /users/, so it goes straight to search
    if !is_valid_login(term) {
        return Ok(UserMatch::Candidates(search_users(client, term).await?));
    }

    match fetch_user(client, term).await {
        Ok(user) => {
            debug!(login = %user.login, "search term is an existing login");
            Ok(UserMatch::Exact(user.login))
        }
        Err(ScaleError::UserNotFound(_)) => {
            Ok(UserMatch::Candidates(search_users(client, term).await?))
        }
        Err(e) => Err(e),
    }
}

fn login_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9]+(-[A-Za-z0-9]+)*$").expect("login pattern is valid")
    })
}

/// GitHub login syntax: letters, digits and single inner hyphens, max 39 chars
pub fn is_valid_login(term: &str) -> bool {
    term.len() <= MAX_LOGIN_LEN && login_pattern().is_match(term)
}

/// GET /users/{login}
pub async fn fetch_user(client: &GitHubClient, login: &str) -> Result<UserDto> {
    client
        .get_json(&format!("users/{}", login))
        .await
        .map_err(|e| e.or_not_found(|| ScaleError::UserNotFound(login.to_string())))
}

/// Logins matching `term`, first page only
pub async fn search_users(client: &GitHubClient, term: &str) -> Result<Vec<String>> {
    let per_page = client.config().per_page;
    let endpoint = format!("search/users?q={}&per_page={}", encode_query(term), per_page);
    let results: UserSearchDto = client.get_json(&endpoint).await?;

    info!(term, total = results.total_count, returned = results.items.len(), "user search");

    Ok(results.items.into_iter().map(|u| u.login).collect())
}

/// Every public repository owned by `login`
pub async fn list_user_repos(client: &GitHubClient, login: &str) -> Result<Vec<RepoSummary>> {
    let per_page = client.config().per_page;

    let repos = collect_pages(
        per_page,
        |repo: &RepoSummary| repo.id,
        |page| {
            let endpoint = format!("users/{}/repos?per_page={}&page={}", login, per_page, page);
            async move {
                client
                    .get_json::<Vec<RepoSummary>>(&endpoint)
                    .await
                    .map_err(|e| e.or_not_found(|| ScaleError::UserNotFound(login.to_string())))
            }
        },
        |_| false,
    )
    .await?;

    info!(login, count = repos.len(), "listed repositories");
    Ok(repos)
}

/// Just the names, in listing order
pub async fn list_user_repo_names(client: &GitHubClient, login: &str) -> Result<Vec<String>> {
    Ok(list_user_repos(client, login)
        .await?
        .into_iter()
        .map(|r| r.name)
        .collect())
}

// Percent-encodes a search term for the query string
fn encode_query(term: &str) -> String {
    url::form_urlencoded::byte_serialize(term.as_bytes()).collect()
}
