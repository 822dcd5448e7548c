mod aggregator_tasks;
mod api_client;
mod fetcher_rest;
mod lister_rest;

pub use aggregator_tasks::*;
pub use api_client::*;
pub use fetcher_rest::*;
pub use lister_rest::*;
