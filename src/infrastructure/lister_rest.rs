use std::sync::Arc;

use log::{debug, info};

use crate::{GitHubApiClient, Repository, RepositoryLister, StdResult};

/// Lists a user's repositories through the GitHub REST API, excluding forks.
pub struct RestRepositoryLister {
    client: Arc<GitHubApiClient>,
}

impl RestRepositoryLister {
    /// Creates a new `RestRepositoryLister` instance with the given API client.
    pub fn new(client: Arc<GitHubApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl RepositoryLister for RestRepositoryLister {
    async fn list(&self, username: &str) -> StdResult<Vec<Repository>> {
        info!("Fetching repositories for user: {username}");
        let repositories: Vec<Repository> = self
            .client
            .get_json(&format!("/users/{username}/repos"))
            .await?;
        let repositories = repositories
            .into_iter()
            .filter(|repository| !repository.is_fork())
            .collect::<Vec<_>>();
        for repository in &repositories {
            debug!("Received {repository}");
        }

        Ok(repositories)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::UpstreamError;

    use super::*;

    fn repositories_json_value() -> serde_json::Value {
        json!([
            {
                "name": "Hello-World",
                "fork": false,
                "owner": {
                    "login": "octocat"
                }
            },
            {
                "name": "forked-repo",
                "fork": true,
                "owner": {
                    "login": "octocat"
                }
            },
            {
                "name": "Spoon-Knife",
                "fork": false,
                "owner": {
                    "login": "octocat"
                }
            }
        ])
    }

    #[tokio::test]
    async fn list_filters_out_forks_and_preserves_order() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/users/octocat/repos");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(repositories_json_value());
        });
        let lister =
            RestRepositoryLister::new(Arc::new(GitHubApiClient::try_new(&server.base_url()).unwrap()));

        let repositories = lister.list("octocat").await.unwrap();

        mock.assert();
        assert_eq!(
            vec![
                Repository::new("Hello-World", "octocat", false),
                Repository::new("Spoon-Knife", "octocat", false),
            ],
            repositories
        );
    }

    #[tokio::test]
    async fn list_yields_empty_for_user_without_repositories() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/users/some-user/repos");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([]));
        });
        let lister =
            RestRepositoryLister::new(Arc::new(GitHubApiClient::try_new(&server.base_url()).unwrap()));

        let repositories = lister.list("some-user").await.unwrap();

        mock.assert();
        assert!(repositories.is_empty());
    }

    #[tokio::test]
    async fn list_fails_with_upstream_status_and_message_for_unknown_user() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/users/nonexistentuser/repos");
            then.status(404)
                .header("Content-Type", "application/json")
                .json_body(json!({"message": "Not Found"}));
        });
        let lister =
            RestRepositoryLister::new(Arc::new(GitHubApiClient::try_new(&server.base_url()).unwrap()));

        let error = lister.list("nonexistentuser").await.unwrap_err();

        mock.assert();
        let upstream_error = error.downcast_ref::<UpstreamError>().unwrap();
        assert_eq!(Some(404), upstream_error.status());
        assert_eq!("Not Found", upstream_error.message());
    }

    #[tokio::test]
    async fn list_fails_on_malformed_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/users/octocat/repos");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"unexpected": "shape"}));
        });
        let lister =
            RestRepositoryLister::new(Arc::new(GitHubApiClient::try_new(&server.base_url()).unwrap()));

        let error = lister.list("octocat").await.unwrap_err();

        mock.assert();
        assert!(matches!(
            error.downcast_ref::<UpstreamError>().unwrap(),
            UpstreamError::MalformedResponse { .. }
        ));
    }
}
