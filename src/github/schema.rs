// src/github/schema.rs
// =============================================================================
// Response shapes for the GitHub REST endpoints we call.
//
// Each struct lists only the fields we actually read. serde ignores the rest,
// and a missing required field turns into ScaleError::MalformedResponse in
// client.rs rather than a panic somewhere downstream.
// =============================================================================

use serde::{Deserialize, Serialize};

/// GET /users/{login}
#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub login: String,
}

/// GET /search/users?q=...
#[derive(Debug, Clone, Deserialize)]
pub struct UserSearchDto {
    #[serde(default)]
    pub total_count: u64,
    pub items: Vec<UserDto>,
}

/// One element of GET /users/{login}/repos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    /// Size as reported by GitHub, in kilobytes
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub fork: bool,
}

/// GET /repos/{owner}/{repo}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    /// Kilobytes, as GitHub reports it
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub private: bool,
}

/// One element of GET /repos/{owner}/{repo}/branches
#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    pub name: String,
}

/// GET /repos/{owner}/{repo}/branches/{branch}
///
/// We only need commit.commit.tree.sha out of this.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchDetail {
    pub name: String,
    pub commit: BranchCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchCommit {
    pub sha: String,
    pub commit: CommitBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitBody {
    pub tree: ShaRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShaRef {
    pub sha: String,
}

/// GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1
#[derive(Debug, Clone, Deserialize)]
pub struct TreeResponse {
    pub sha: String,
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

/// What kind of object a tree entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file
    Blob,
    /// A directory
    Tree,
    /// A submodule (points at a commit in another repository)
    Commit,
    #[serde(other)]
    Unknown,
}

/// One row of a recursive tree listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Only blobs carry a size
    #[serde(default)]
    pub size: Option<u64>,
}

impl TreeEntry {
    pub fn blob(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Blob,
            size: Some(size),
        }
    }

    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }
}

/// GET /repos/{owner}/{repo}/readme
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeDto {
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tree_entry_kinds() {
        let entries: Vec<TreeEntry> = serde_json::from_value(json!([
            { "path": "src", "type": "tree", "sha": "1" },
            { "path": "src/main.rs", "type": "blob", "size": 42, "sha": "2" },
            { "path": "vendor/lib", "type": "commit", "sha": "3" },
            { "path": "weird", "type": "symlink", "sha": "4" }
        ]))
        .unwrap();

        assert_eq!(entries[0].kind, EntryKind::Tree);
        assert_eq!(entries[0].size, None);
        assert_eq!(entries[1].kind, EntryKind::Blob);
        assert_eq!(entries[1].size, Some(42));
        assert_eq!(entries[2].kind, EntryKind::Commit);
        assert_eq!(entries[3].kind, EntryKind::Unknown);
    }

    #[test]
    fn test_branch_detail_tree_sha() {
        let detail: BranchDetail = serde_json::from_value(json!({
            "name": "main",
            "commit": {
                "sha": "c0ffee",
                "commit": { "tree": { "sha": "7ree", "url": "..." }, "message": "init" }
            },
            "protected": false
        }))
        .unwrap();

        assert_eq!(detail.commit.commit.tree.sha, "7ree");
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result: Result<RepoSummary, _> = serde_json::from_value(json!({ "name": "x" }));
        assert!(result.is_err());
    }
}
