// src/github/readme.rs
// =============================================================================
// Fetches a repository's README through the API.
//
// GitHub sends file contents base64-encoded, wrapped at 60 columns, so the
// newlines have to be stripped before decoding.
//
// Every `#` is doubled on the way out. That pushes each heading one level
// down so the README sits under our own "Repository Readme" heading.
// =============================================================================

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::debug;

use super::client::GitHubClient;
use super::resolve::RepoPath;
use super::schema::ReadmeDto;
use crate::error::{Result, ScaleError};

/// README text with headings shifted, or None if the repo has no README
pub async fn fetch_readme(client: &GitHubClient, repo: &RepoPath) -> Result<Option<String>> {
    let endpoint = format!("repos/{}/readme", repo);

    let readme: ReadmeDto = match client.get_json(&endpoint).await {
        Ok(readme) => readme,
        Err(e) if e.is_not_found() => {
            debug!(repo = %repo, "no README");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let text = decode_content(&readme)?;
    Ok(Some(shift_headings(&text)))
}

/// Decodes the `content` field of a contents-API response
pub fn decode_content(readme: &ReadmeDto) -> Result<String> {
    match readme.encoding.as_deref() {
        None | Some("base64") => {}
        Some(other) => {
            return Err(ScaleError::InvalidContent(format!(
                "unsupported encoding '{}'",
                other
            )))
        }
    }

    let cleaned: String = readme
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = BASE64
        .decode(cleaned.as_bytes())
        .map_err(|e| ScaleError::InvalidContent(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| ScaleError::InvalidContent(e.to_string()))
}

/// Replaces every `#` with `##`
pub fn shift_headings(text: &str) -> String {
    text.replace('#', "##")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(content: &str, encoding: Option<&str>) -> ReadmeDto {
        ReadmeDto {
            content: content.to_string(),
            encoding: encoding.map(str::to_string),
        }
    }

    #[test]
    fn test_decode_wrapped_base64() {
        // "# Title\nBody\n" split across lines the way GitHub wraps it
        let readme = dto("IyBUaXRsZQpC\nb2R5Cg==\n", Some("base64"));
        assert_eq!(decode_content(&readme).unwrap(), "# Title\nBody\n");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let readme = dto("not base64!!", Some("base64"));
        assert!(matches!(decode_content(&readme), Err(ScaleError::InvalidContent(_))));
    }

    #[test]
    fn test_decode_rejects_unknown_encoding() {
        let readme = dto("hello", Some("utf-16"));
        assert!(matches!(decode_content(&readme), Err(ScaleError::InvalidContent(_))));
    }

    #[test]
    fn test_shift_headings() {
        assert_eq!(shift_headings("# Title\n## Sub"), "## Title\n#### Sub");
        assert_eq!(shift_headings("issue #12"), "issue ##12");
        assert_eq!(shift_headings("plain"), "plain");
    }
}
