// src/github/mod.rs
// =============================================================================
// Everything that talks to the GitHub REST API.
//
// Submodules:
// - client:  authenticated GETs, status -> error mapping, response cache
// - pages:   shared pagination loop (dedupe, short-page stop)
// - schema:  serde shapes of the responses we read
// - resolve: repository URL -> owner/name
// - repo:    repository metadata
// - tree:    default branch -> recursive file listing
// - users:   user lookup/search and repository listing
// - readme:  README download and decoding
//
// Rust concepts:
// - Modules: Organizing related functionality
// - pub use: Re-export items so callers write github::fetch_tree
// =============================================================================

mod client;
mod pages;
mod readme;
mod repo;
mod resolve;
mod schema;
mod tree;
mod users;

// Upper bound on pages for any paginated listing
pub(crate) const MAX_PAGES: u32 = 100;

pub use client::GitHubClient;
pub use readme::fetch_readme;
pub use repo::fetch_repo;
pub use resolve::{check_repo_url, resolve_path, RepoPath};
pub use schema::{EntryKind, RepoMetadata, RepoSummary, TreeEntry};
pub use tree::{fetch_tree, FetchWarning, TreeListing};
pub use users::{list_user_repo_names, list_user_repos, resolve_user, UserMatch};
