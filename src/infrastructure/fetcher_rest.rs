use std::sync::Arc;

use anyhow::Context;
use log::{debug, info};

use crate::{Branch, BranchFetcher, GitHubApiClient, StdResult};

/// Fetches the branches of a repository through the GitHub REST API.
pub struct RestBranchFetcher {
    client: Arc<GitHubApiClient>,
}

impl RestBranchFetcher {
    /// Creates a new `RestBranchFetcher` instance with the given API client.
    pub fn new(client: Arc<GitHubApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl BranchFetcher for RestBranchFetcher {
    async fn fetch(&self, owner: &str, repository: &str) -> StdResult<Vec<Branch>> {
        info!("Fetching branches for repository: {owner}/{repository}");
        let branches: Vec<Branch> = self
            .client
            .get_json(&format!("/repos/{owner}/{repository}/branches"))
            .await
            .with_context(|| {
                format!("Failed to fetch branches for repository: {owner}/{repository}")
            })?;
        for branch in &branches {
            debug!("Received branch: {branch} in repository: {owner}/{repository}");
        }

        Ok(branches)
    }
}
