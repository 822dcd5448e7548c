use anyhow::Context;
use log::{debug, error};
use reqwest::{Client, header};
use serde::de::DeserializeOwned;

use crate::{StdResult, UPSTREAM_ERROR_FALLBACK_MESSAGE, UpstreamError};

/// The REST production endpoint for GitHub.
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

/// A JSON client for the upstream GitHub REST API.
///
/// Holds the base URL and the default headers, issues one GET per call and
/// maps every failure into an [UpstreamError]:
/// - non-2xx response: [UpstreamError::RequestFailed] with the status code
///   and the `message` field of the error body when it has one, else a
///   fixed fallback message,
/// - transport failure: [UpstreamError::RequestFailed] without a status,
/// - undecodable 2xx body: [UpstreamError::MalformedResponse].
pub struct GitHubApiClient {
    client: Client,
    endpoint: String,
}

impl GitHubApiClient {
    /// Creates a new `GitHubApiClient` for the given endpoint.
    pub fn try_new(endpoint: &str) -> StdResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let client = Client::builder()
            .user_agent("github-branches")
            .default_headers(headers)
            .build()
            .with_context(|| "Failed to build the HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Issues a GET request for the given path and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.endpoint, path);
        debug!("GET {url}");
        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Transport error for {url}: {e}");
            UpstreamError::RequestFailed {
                status: None,
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::MalformedResponse {
                message: e.to_string(),
            })?;
        if !status.is_success() {
            let message = extract_error_message(&body);
            error!("Upstream request failed: GET {url} returned {status}: {message}");
            return Err(UpstreamError::RequestFailed {
                status: Some(status.as_u16()),
                message,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            error!("Failed to decode upstream response from {url}: {e}");
            UpstreamError::MalformedResponse {
                message: e.to_string(),
            }
        })
    }
}

/// Extracts the `message` field from an upstream error body, falling back to
/// a fixed message when the body is not JSON or has no such field.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UPSTREAM_ERROR_FALLBACK_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn get_json_decodes_successful_response() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/items");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!(["item-1", "item-2"]));
        });
        let client = GitHubApiClient::try_new(&server.base_url()).unwrap();

        let items: Vec<String> = client.get_json("/items").await.unwrap();

        mock.assert();
        assert_eq!(vec!["item-1".to_string(), "item-2".to_string()], items);
    }

    #[tokio::test]
    async fn get_json_extracts_message_from_error_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/items");
            then.status(404)
                .header("Content-Type", "application/json")
                .json_body(json!({"message": "Not Found"}));
        });
        let client = GitHubApiClient::try_new(&server.base_url()).unwrap();

        let error = client.get_json::<Vec<String>>("/items").await.unwrap_err();

        mock.assert();
        assert_eq!(
            UpstreamError::RequestFailed {
                status: Some(404),
                message: "Not Found".to_string(),
            },
            error
        );
    }

    #[tokio::test]
    async fn get_json_falls_back_when_error_body_has_no_message_field() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/items");
            then.status(500)
                .header("Content-Type", "application/json")
                .json_body(json!({"error": "boom"}));
        });
        let client = GitHubApiClient::try_new(&server.base_url()).unwrap();

        let error = client.get_json::<Vec<String>>("/items").await.unwrap_err();

        mock.assert();
        assert_eq!(
            UpstreamError::RequestFailed {
                status: Some(500),
                message: UPSTREAM_ERROR_FALLBACK_MESSAGE.to_string(),
            },
            error
        );
    }

    #[tokio::test]
    async fn get_json_falls_back_when_error_body_is_not_json() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/items");
            then.status(502).body("bad gateway");
        });
        let client = GitHubApiClient::try_new(&server.base_url()).unwrap();

        let error = client.get_json::<Vec<String>>("/items").await.unwrap_err();

        mock.assert();
        assert_eq!(
            UpstreamError::RequestFailed {
                status: Some(502),
                message: UPSTREAM_ERROR_FALLBACK_MESSAGE.to_string(),
            },
            error
        );
    }

    #[tokio::test]
    async fn get_json_fails_with_malformed_response_on_undecodable_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/items");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("not json");
        });
        let client = GitHubApiClient::try_new(&server.base_url()).unwrap();

        let error = client.get_json::<Vec<String>>("/items").await.unwrap_err();

        mock.assert();
        assert!(matches!(error, UpstreamError::MalformedResponse { .. }));
        assert_eq!(None, error.status());
    }

    #[tokio::test]
    async fn get_json_fails_without_status_on_transport_error() {
        let client = GitHubApiClient::try_new("http://127.0.0.1:9").unwrap();

        let error = client.get_json::<Vec<String>>("/items").await.unwrap_err();

        assert!(matches!(
            error,
            UpstreamError::RequestFailed { status: None, .. }
        ));
    }
}
