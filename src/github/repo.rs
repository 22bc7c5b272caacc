// src/github/repo.rs
// Repository metadata (GET /repos/{owner}/{repo}).

use tracing::debug;

use super::client::GitHubClient;
use super::resolve::RepoPath;
use super::schema::RepoMetadata;
use crate::error::{Result, ScaleError};

pub async fn fetch_repo(client: &GitHubClient, repo: &RepoPath) -> Result<RepoMetadata> {
    let metadata: RepoMetadata = client
        .get_json(&format!("repos/{}", repo))
        .await
        .map_err(|e| e.or_not_found(|| ScaleError::RepoNotFound(repo.to_string())))?;

    debug!(
        repo = %metadata.full_name,
        private = metadata.private,
        size_kb = metadata.size,
        "fetched repository metadata"
    );

    Ok(metadata)
}
