// src/github/tree.rs
// =============================================================================
// Fetches the complete file listing of a repository.
//
// How it works:
// 1. List the branches and pick `main`, falling back to `master`
// 2. Look up that branch to find the SHA of its root tree
// 3. Ask for that tree with ?recursive=1, which makes GitHub flatten every
//    subdirectory into one list for us (no manual directory walk)
//
// GitHub stops a recursive listing at 100,000 entries and sets
// `truncated: true`. That is reported as a warning; the partial list is still
// returned and used.
// =============================================================================

use std::future::Future;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::client::GitHubClient;
use super::pages::collect_pages;
use super::resolve::RepoPath;
use super::schema::{BranchDetail, BranchRef, EntryKind, TreeEntry, TreeResponse};
use crate::error::{Result, ScaleError};

/// Entry cap GitHub applies to recursive tree listings
pub const TREE_ENTRY_LIMIT: usize = 100_000;

const DEFAULT_BRANCHES: [&str; 2] = ["main", "master"];

/// Something went partly wrong, but we still have usable data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum FetchWarning {
    /// The listing hit GitHub's cap; only `received` entries came back
    TruncatedResult { limit: usize, received: usize },
}

impl std::fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchWarning::TruncatedResult { limit, received } => write!(
                f,
                "tree listing was truncated by GitHub (limit {}); results cover {} entries only",
                limit, received
            ),
        }
    }
}

/// The flattened tree of one branch
#[derive(Debug, Clone)]
pub struct TreeListing {
    pub branch: String,
    pub entries: Vec<TreeEntry>,
    pub truncated: bool,
}

impl TreeListing {
    pub fn from_response(branch: impl Into<String>, response: TreeResponse) -> Self {
        Self {
            branch: branch.into(),
            entries: response.tree,
            truncated: response.truncated,
        }
    }

    /// Files only
    pub fn blobs(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Blob)
    }

    /// Directories only
    pub fn trees(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Tree)
    }

    /// Files inside `dir` at any depth; an empty `dir` means the whole tree
    pub fn blobs_under<'a>(&'a self, dir: &'a str) -> impl Iterator<Item = &'a TreeEntry> + 'a {
        let dir = dir.trim_matches('/');
        self.blobs().filter(move |e| in_subtree(&e.path, dir))
    }

    pub fn has_directory(&self, dir: &str) -> bool {
        let dir = dir.trim_matches('/');
        self.trees().any(|e| e.path == dir)
    }

    pub fn warning(&self) -> Option<FetchWarning> {
        self.truncated.then(|| FetchWarning::TruncatedResult {
            limit: TREE_ENTRY_LIMIT,
            received: self.entries.len(),
        })
    }
}

// "src/lib.rs" is under "src", "srcx/lib.rs" is not
fn in_subtree(path: &str, dir: &str) -> bool {
    dir.is_empty()
        || path
            .strip_prefix(dir)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Picks `main` if present, otherwise `master`
pub fn pick_default_branch<'a, I>(names: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();
    DEFAULT_BRANCHES
        .into_iter()
        .find(|candidate| names.contains(candidate))
}

/// Fetches every entry in the repository's default branch
///
/// Errors:
///   RepoNotFound    - the branch listing 404s
///   NoDefaultBranch - neither main nor master exists
pub async fn fetch_tree(client: &GitHubClient, repo: &RepoPath) -> Result<TreeListing> {
    let branch = resolve_default_branch(client, repo).await?;
    let tree_sha = fetch_tree_sha(client, repo, branch).await?;

    let endpoint = format!("repos/{}/git/trees/{}?recursive=1", repo, tree_sha);
    let response: TreeResponse = client
        .get_json(&endpoint)
        .await
        .map_err(|e| e.or_not_found(|| ScaleError::RepoNotFound(repo.to_string())))?;

    debug!(sha = %response.sha, "received tree");
    let listing = TreeListing::from_response(branch, response);

    if let Some(warning) = listing.warning() {
        warn!(repo = %repo, "{}", warning);
    }

    info!(
        repo = %repo,
        branch = %listing.branch,
        entries = listing.entries.len(),
        "fetched repository tree"
    );

    Ok(listing)
}

async fn resolve_default_branch(client: &GitHubClient, repo: &RepoPath) -> Result<&'static str> {
    let per_page = client.config().per_page;

    let branch = choose_default_branch(per_page, |page| {
        let endpoint = format!("repos/{}/branches?per_page={}&page={}", repo, per_page, page);
        async move {
            client
                .get_json::<Vec<BranchRef>>(&endpoint)
                .await
                .map_err(|e| e.or_not_found(|| ScaleError::RepoNotFound(repo.to_string())))
        }
    })
    .await?;

    branch.ok_or_else(|| ScaleError::NoDefaultBranch(repo.to_string()))
}

// Walks the branch listing and picks main/master
//
// Paging stops as soon as `main` shows up; `master` alone keeps us looking,
// since `main` may still be on a later page.
pub(crate) async fn choose_default_branch<F, Fut>(
    per_page: usize,
    fetch_page: F,
) -> Result<Option<&'static str>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<BranchRef>>>,
{
    let has_main = |branches: &[BranchRef]| branches.iter().any(|b| b.name == "main");

    let branches = collect_pages(
        per_page,
        |branch: &BranchRef| branch.name.clone(),
        fetch_page,
        has_main,
    )
    .await?;

    Ok(pick_default_branch(branches.iter().map(|b| b.name.as_str())))
}

async fn fetch_tree_sha(client: &GitHubClient, repo: &RepoPath, branch: &str) -> Result<String> {
    let endpoint = format!("repos/{}/branches/{}", repo, branch);
    let detail: BranchDetail = client
        .get_json(&endpoint)
        .await
        .map_err(|e| e.or_not_found(|| ScaleError::NoDefaultBranch(repo.to_string())))?;

    debug!(
        branch = %detail.name,
        commit = %detail.commit.sha,
        tree = %detail.commit.commit.tree.sha,
        "resolved branch head"
    );

    Ok(detail.commit.commit.tree.sha)
}
