use std::{fmt::Display, ops::Deref};

use serde::{Deserialize, Serialize};

/// The name of a repository.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(pub String);

impl Deref for RepositoryName {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The login of a repository owner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OwnerLogin(pub String);

impl Deref for OwnerLogin {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for OwnerLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The name of a branch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BranchName(pub String);

impl Deref for BranchName {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The content hash of a commit, opaque to this system.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CommitSha(pub String);

impl Deref for CommitSha {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for CommitSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The owner of a repository.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// The unique login of the owner.
    login: OwnerLogin,
}

impl Owner {
    /// Creates a new `Owner` instance.
    pub fn new(login: &str) -> Self {
        Self {
            login: OwnerLogin(login.to_string()),
        }
    }

    /// Retrieves the owner login.
    pub fn login(&self) -> &OwnerLogin {
        &self.login
    }
}

/// The commit a branch points to, immutable once observed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The commit hash.
    sha: CommitSha,
}

impl Commit {
    /// Creates a new `Commit` instance.
    pub fn new(sha: &str) -> Self {
        Self {
            sha: CommitSha(sha.to_string()),
        }
    }

    /// Retrieves the commit hash.
    pub fn sha(&self) -> &CommitSha {
        &self.sha
    }
}

/// A branch of a repository and the commit it points to, as reported by the
/// upstream API at fetch time. A branch list is a point-in-time snapshot,
/// not a live view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// The name of the branch, unique within a repository.
    name: BranchName,

    /// The commit the branch currently points to.
    commit: Commit,
}

impl Branch {
    /// Creates a new `Branch` instance.
    pub fn new(name: &str, commit_sha: &str) -> Self {
        Self {
            name: BranchName(name.to_string()),
            commit: Commit::new(commit_sha),
        }
    }

    /// Retrieves the branch name.
    pub fn name(&self) -> &BranchName {
        &self.name
    }

    /// Retrieves the commit the branch points to.
    pub fn commit(&self) -> &Commit {
        &self.commit
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.commit.sha)
    }
}

/// Metadata of a GitHub repository, as reported by the repository listing.
///
/// Branches are not part of the listing representation; they are paired with
/// the repository by the aggregator after a separate fetch.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// The name of the repository, unique within its owner's namespace.
    name: RepositoryName,

    /// The owner of the repository.
    owner: Owner,

    /// Whether the repository is a fork of another repository.
    fork: bool,
}

impl Repository {
    /// Creates a new `Repository` instance.
    pub fn new(name: &str, owner_login: &str, fork: bool) -> Self {
        Self {
            name: RepositoryName(name.to_string()),
            owner: Owner::new(owner_login),
            fork,
        }
    }

    /// Retrieves the repository name.
    pub fn name(&self) -> &RepositoryName {
        &self.name
    }

    /// Retrieves the repository owner.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Whether the repository is a fork.
    pub fn is_fork(&self) -> bool {
        self.fork
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Repository: {}/{}", self.owner.login, self.name)
    }
}

/// The aggregated output record pairing one non-fork repository with its
/// full branch snapshot. The branch list may be empty but is never null.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRepository {
    /// The name of the repository.
    repository_name: RepositoryName,

    /// The login of the repository owner.
    owner_login: OwnerLogin,

    /// The branches of the repository, in upstream response order.
    branches: Vec<Branch>,
}

impl AggregatedRepository {
    /// Creates a new `AggregatedRepository` instance.
    pub fn new(repository_name: &str, owner_login: &str, branches: Vec<Branch>) -> Self {
        Self {
            repository_name: RepositoryName(repository_name.to_string()),
            owner_login: OwnerLogin(owner_login.to_string()),
            branches,
        }
    }

    /// Retrieves the repository name.
    pub fn repository_name(&self) -> &RepositoryName {
        &self.repository_name
    }

    /// Retrieves the owner login.
    pub fn owner_login(&self) -> &OwnerLogin {
        &self.owner_login
    }

    /// Retrieves the branches.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }
}

impl Display for AggregatedRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AggregatedRepository: {}/{}, branches: {}",
            self.owner_login,
            self.repository_name,
            self.branches.len()
        )
    }
}
