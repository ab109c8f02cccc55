//! HTTP access to the API: list pages and per-resource detail fetches.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::types::ResourceList;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Thin wrapper around a shared [`reqwest::Client`]
///
/// Cloning is cheap; every fetch task holds its own handle to the same
/// connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the configured API
    ///
    /// A base URL without a trailing slash is treated as a directory, so
    /// `https://pokeapi.co/api/v2` and `https://pokeapi.co/api/v2/` list the
    /// same endpoints.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::config(
                "api.base_url",
                format!("invalid base URL '{}': {}", config.base_url, e),
            )
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {}", e),
                key: None,
            })?;

        Ok(Self { http, base_url })
    }

    /// URL of the first page of `endpoint` with `limit` results
    pub fn list_url(&self, limit: usize, endpoint: &str) -> Result<Url> {
        let mut url = self.base_url.join(endpoint).map_err(|e| {
            Error::config(
                "api.base_url",
                format!("cannot join endpoint '{}' onto {}: {}", endpoint, self.base_url, e),
            )
        })?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// Fetch the first page of `endpoint`.
    ///
    /// The returned `count` is the total the API reports, which may be larger
    /// than the number of locators on the page when `limit` is too small.
    pub async fn list(&self, limit: usize, endpoint: &str) -> Result<ResourceList> {
        let url = self.list_url(limit, endpoint)?;
        let list: ResourceList = self.fetch(url.as_str()).await?;
        debug!(
            endpoint,
            count = list.count,
            returned = list.results.len(),
            "Listed resources"
        );
        Ok(list)
    }

    /// GET `url` once and decode the body as JSON
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| Error::Network {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig {
            base_url: format!("{}/api/v2/", server.uri()),
            ..Default::default()
        };
        ApiClient::new(&config).expect("client")
    }

    #[test]
    fn list_url_appends_endpoint_and_limit() {
        let client = ApiClient::new(&ApiConfig::default()).expect("client");
        let url = client.list_url(25, "pokemon").expect("url");
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon?limit=25");
    }

    #[test]
    fn list_url_keeps_base_path_without_trailing_slash() {
        let config = ApiConfig {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&config).expect("client");
        let url = client.list_url(10, "pokemon").expect("url");
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon?limit=10");
    }

    #[tokio::test]
    async fn list_without_trailing_slash_hits_versioned_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "results": [{"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ApiConfig {
            base_url: format!("{}/api/v2", server.uri()),
            ..Default::default()
        };
        let list = ApiClient::new(&config)
            .expect("client")
            .list(10, "pokemon")
            .await
            .expect("list");
        assert_eq!(list.count, 1);
    }

    #[test]
    fn new_rejects_invalid_base_url() {
        let config = ApiConfig {
            base_url: "::nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn list_decodes_count_and_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/move"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 937,
                "next": null,
                "previous": null,
                "results": [
                    {"name": "pound", "url": "https://pokeapi.co/api/v2/move/1/"},
                    {"name": "karate-chop", "url": "https://pokeapi.co/api/v2/move/2/"}
                ]
            })))
            .mount(&server)
            .await;

        let list = client_for(&server).list(2, "move").await.expect("list");
        assert_eq!(list.count, 937);
        assert_eq!(list.results.len(), 2);
        assert_eq!(list.results[0].url, "https://pokeapi.co/api/v2/move/1/");
    }

    #[tokio::test]
    async fn list_reports_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/ability"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        match client_for(&server).list(10, "ability").await {
            Err(Error::HttpStatus { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected HttpStatus error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_reports_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list(10, "pokemon")
            .await
            .expect_err("decode should fail");
        assert_eq!(err.error_code(), "decode_error");
    }

    #[tokio::test]
    async fn fetch_reports_connection_failure() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1/".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&config).expect("client");
        let err = client
            .fetch::<serde_json::Value>("http://127.0.0.1:1/pokemon/1/")
            .await
            .expect_err("nothing listens on port 1");
        assert!(err.is_network());
    }
}
