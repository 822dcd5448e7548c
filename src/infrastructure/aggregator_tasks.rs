use std::sync::Arc;

use log::{debug, info, warn};
use tokio::{sync::Semaphore, task::JoinSet};

use crate::{
    AggregatedRepository, BranchFetcher, RepositoryAggregator, RepositoryLister, StdResult,
};

/// Aggregates a user's repositories with their branches, one concurrent
/// fetch task per repository.
///
/// The repository listing always completes before any branch fetch starts;
/// a listing failure never triggers a fetch. Branch fetches run with no
/// ordering guarantee between them, but each task carries the index of its
/// repository in the listing so results are paired back to the repository
/// they belong to and the output preserves the listing order. The first
/// failed fetch fails the whole aggregation. Dropping the returned future
/// aborts all in-flight fetch tasks.
pub struct TaskAggregator {
    lister: Arc<dyn RepositoryLister>,
    fetcher: Arc<dyn BranchFetcher>,

    /// The maximum number of branch fetches in flight at once, unbounded
    /// when not set.
    max_concurrent_fetches: Option<usize>,

    /// Whether sibling in-flight fetches are aborted after a failure. When
    /// disabled they finish in the background and their results are
    /// discarded.
    abort_on_error: bool,
}

impl TaskAggregator {
    /// Creates a new `TaskAggregator` instance with unbounded fan-out that
    /// aborts sibling fetches on the first failure.
    pub fn new(lister: Arc<dyn RepositoryLister>, fetcher: Arc<dyn BranchFetcher>) -> Self {
        Self {
            lister,
            fetcher,
            max_concurrent_fetches: None,
            abort_on_error: true,
        }
    }

    /// Bounds the number of branch fetches in flight at once. A zero bound
    /// means unbounded.
    pub fn with_max_concurrent_fetches(mut self, max_concurrent_fetches: usize) -> Self {
        self.max_concurrent_fetches = (max_concurrent_fetches > 0).then_some(max_concurrent_fetches);
        self
    }

    /// Sets whether sibling in-flight fetches are aborted after a failure.
    pub fn with_abort_on_error(mut self, abort_on_error: bool) -> Self {
        self.abort_on_error = abort_on_error;
        self
    }
}

#[async_trait::async_trait]
impl RepositoryAggregator for TaskAggregator {
    async fn aggregate(&self, username: &str) -> StdResult<Vec<AggregatedRepository>> {
        info!("Aggregating repositories with branches for user: {username}");
        let repositories = self.lister.list(username).await?;
        if repositories.is_empty() {
            info!("No repositories found for user: {username}");
            return Ok(vec![]);
        }

        let semaphore = self
            .max_concurrent_fetches
            .map(|max_concurrent_fetches| Arc::new(Semaphore::new(max_concurrent_fetches)));
        let total_repositories = repositories.len();
        let mut fetch_tasks = JoinSet::new();
        for (index, repository) in repositories.into_iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let semaphore = semaphore.clone();
            fetch_tasks.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => Some(semaphore.acquire_owned().await?),
                    None => None,
                };
                let branches = fetcher
                    .fetch(repository.owner().login(), repository.name())
                    .await?;
                debug!("Fetched {} branches for {repository}", branches.len());
                let aggregated_repository = AggregatedRepository::new(
                    repository.name(),
                    repository.owner().login(),
                    branches,
                );

                Ok::<_, anyhow::Error>((index, aggregated_repository))
            });
        }

        let mut aggregated_repositories: Vec<Option<AggregatedRepository>> =
            (0..total_repositories).map(|_| None).collect();
        while let Some(joined) = fetch_tasks.join_next().await {
            match joined? {
                Ok((index, aggregated_repository)) => {
                    aggregated_repositories[index] = Some(aggregated_repository);
                }
                Err(e) => {
                    if self.abort_on_error {
                        fetch_tasks.abort_all();
                    } else {
                        warn!("Discarding results of in-flight branch fetches after failure");
                        fetch_tasks.detach_all();
                    }
                    return Err(e);
                }
            }
        }
        info!("Completed aggregation of {total_repositories} repositories for user: {username}");

        Ok(aggregated_repositories.into_iter().flatten().collect())
    }
}
