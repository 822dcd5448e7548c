mod aggregator;
mod fetcher;
mod lister;

pub use aggregator::*;
pub use fetcher::*;
pub use lister::*;
