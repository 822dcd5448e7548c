use crate::{Repository, StdResult};

/// A trait for listing the repositories owned by a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryLister: Sync + Send {
    /// Lists the non-fork repositories owned by the given user, in upstream
    /// response order. The username is forwarded to the upstream API verbatim.
    async fn list(&self, username: &str) -> StdResult<Vec<Repository>>;
}
