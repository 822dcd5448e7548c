use crate::{AggregatedRepository, StdResult};

/// A trait for aggregating a user's repositories with their branches.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryAggregator: Sync + Send {
    /// Aggregates the user's non-fork repositories with their full branch
    /// lists. A user with zero repositories yields an empty list.
    async fn aggregate(&self, username: &str) -> StdResult<Vec<AggregatedRepository>>;
}
