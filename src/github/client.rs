// src/github/client.rs
// =============================================================================
// Thin wrapper around reqwest for the GitHub REST API.
//
// What it does:
// - Adds the bearer token and GitHub's JSON media type to every request
// - Turns non-2xx responses into typed errors *before* we try to parse JSON
//   (an error body parsed as a tree listing is a confusing failure)
// - Decodes the body into the DTO the caller asked for
// - Remembers successful responses by URL, so asking for the same endpoint
//   twice in one run costs one request
//
// Requests are made one at a time; nothing here spawns tasks.
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;

use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Result, ScaleError};

const GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    http: Client,
    config: Config,
    // URL -> decoded JSON body of a 2xx response
    cache: Mutex<HashMap<String, Value>>,
}

impl GitHubClient {
    /// Builds the underlying HTTP client from our config
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        debug!(base_url = %config.api_base_url, "created GitHub client");

        Ok(Self {
            http,
            config,
            cache: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GETs an API endpoint and decodes the JSON body into `T`
    ///
    /// Parameters:
    ///   endpoint: path relative to the API base, e.g. "repos/rust-lang/rust"
    ///
    /// 404s come back as ScaleError::HttpStatus; callers relabel them with
    /// `or_not_found` because only they know what was missing.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.config.endpoint_url(endpoint);

        let body = match self.cached(&url) {
            Some(body) => {
                trace!(%url, "cache hit");
                body
            }
            None => {
                let body = self.fetch(&url).await?;
                self.remember(&url, &body);
                body
            }
        };

        decode(endpoint, body)
    }

    /// Unauthenticated GET against any URL; true only for 200 OK
    ///
    /// Used to check that a repository page actually exists on the website.
    pub async fn page_exists(&self, url: &str) -> Result<bool> {
        let response = self.http.get(url).send().await?;
        debug!(%url, status = %response.status(), "checked page");
        Ok(response.status() == StatusCode::OK)
    }

    async fn fetch(&self, url: &str) -> Result<Value> {
        debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.token)
            .header(ACCEPT, GITHUB_JSON)
            .header(API_VERSION_HEADER, API_VERSION)
            .send()
            .await?;

        if let Some(err) = classify_status(url, response.status(), response.headers()) {
            return Err(err);
        }

        Ok(response.json::<Value>().await?)
    }

    fn cached(&self, url: &str) -> Option<Value> {
        match self.cache.lock() {
            Ok(cache) => cache.get(url).cloned(),
            Err(_) => None,
        }
    }

    fn remember(&self, url: &str, body: &Value) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(url.to_string(), body.clone());
        }
    }
}

/// Maps an HTTP status to our error type, or None for 2xx
///
/// GitHub answers an exhausted rate limit with 403 (and sometimes 429);
/// the reset time rides along in x-ratelimit-reset.
pub(crate) fn classify_status(
    url: &str,
    status: StatusCode,
    headers: &HeaderMap,
) -> Option<ScaleError> {
    if status.is_success() {
        return None;
    }

    let err = match status {
        StatusCode::UNAUTHORIZED => ScaleError::Unauthorized,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => ScaleError::RateLimited {
            reset_at: headers
                .get("x-ratelimit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok()),
        },
        _ => ScaleError::HttpStatus {
            url: url.to_string(),
            status,
        },
    };

    Some(err)
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|source| ScaleError::MalformedResponse {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::schema::UserDto;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    #[test]
    fn test_success_is_not_an_error() {
        let headers = HeaderMap::new();
        assert!(classify_status("u", StatusCode::OK, &headers).is_none());
        assert!(classify_status("u", StatusCode::NO_CONTENT, &headers).is_none());
    }

    #[test]
    fn test_auth_and_rate_limit_statuses() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));

        assert!(matches!(
            classify_status("u", StatusCode::UNAUTHORIZED, &headers),
            Some(ScaleError::Unauthorized)
        ));
        assert!(matches!(
            classify_status("u", StatusCode::FORBIDDEN, &headers),
            Some(ScaleError::RateLimited {
                reset_at: Some(1_700_000_000)
            })
        ));
        assert!(matches!(
            classify_status("u", StatusCode::TOO_MANY_REQUESTS, &HeaderMap::new()),
            Some(ScaleError::RateLimited { reset_at: None })
        ));
    }

    #[test]
    fn test_not_found_keeps_url() {
        let err = classify_status(
            "https://x/users/ghost",
            StatusCode::NOT_FOUND,
            &HeaderMap::new(),
        )
        .unwrap();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("https://x/users/ghost"));
    }

    #[test]
    fn test_decode_shape_mismatch() {
        let result: Result<UserDto> = decode("users/x", json!({ "message": "Not Found" }));
        match result {
            Err(ScaleError::MalformedResponse { endpoint, .. }) => assert_eq!(endpoint, "users/x"),
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_cache_round_trip() {
        let client = GitHubClient::new(Config::new("t").unwrap()).unwrap();
        assert!(client.cached("https://api.github.com/users/a").is_none());

        client.remember("https://api.github.com/users/a", &json!({ "login": "a" }));
        let hit = client.cached("https://api.github.com/users/a").unwrap();
        assert_eq!(hit["login"], "a");
    }
}
