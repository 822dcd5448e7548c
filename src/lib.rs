//! An aggregator for GitHub repositories and their branches.
//!
//! Given a user login, the library lists the user's non-fork repositories
//! from the GitHub REST API, fetches the branches of every repository
//! concurrently, and pairs each repository with its full branch snapshot.

mod infrastructure;
mod interface;
mod model;

pub use infrastructure::*;
pub use interface::*;
pub use model::*;
