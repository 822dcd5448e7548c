use crate::{Branch, StdResult};

/// A trait for fetching the branches of a repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BranchFetcher: Sync + Send {
    /// Fetches the full branch snapshot of the given repository, in upstream
    /// response order. An empty branch list is a success, not an error.
    async fn fetch(&self, owner: &str, repository: &str) -> StdResult<Vec<Branch>>;
}
