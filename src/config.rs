// src/config.rs
// =============================================================================
// Runtime configuration for the GitHub client.
//
// Everything the client needs is collected into one struct up front and
// passed in at construction, so nothing deeper in the program reads
// environment variables on its own.
//
// Sources, highest priority first:
//   1. CLI flags (--token, --api-url, --timeout), see cli.rs
//   2. GITHUB_TOKEN / TOKEN from the environment or a local .env file
//   3. The defaults below
// =============================================================================

use std::time::Duration;

use crate::error::{Result, ScaleError};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// GitHub never returns more than 100 items per page
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token sent with every API request
    pub token: String,
    pub api_base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub per_page: usize,
}

impl Config {
    /// Creates a config with default settings and the given token
    ///
    /// Blank tokens are rejected here so we fail before the first request
    /// instead of getting a confusing 401 later.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ScaleError::MissingToken);
        }

        Ok(Self {
            token,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("git-scale/{}", env!("CARGO_PKG_VERSION")),
            per_page: MAX_PER_PAGE,
        })
    }

    /// Reads the token from GITHUB_TOKEN, then TOKEN
    ///
    /// A .env file in the working directory is loaded first if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let token = ["GITHUB_TOKEN", "TOKEN"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.trim().is_empty())
            .ok_or(ScaleError::MissingToken)?;

        Self::new(token)
    }

    /// Treats an empty or whitespace-only token (e.g. `GITHUB_TOKEN=`) as unset
    pub fn non_blank(token: Option<&str>) -> Option<&str> {
        token.filter(|t| !t.trim().is_empty())
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins an endpoint like "users/octocat" onto the API base URL
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
