use std::sync::Arc;

use clap::Parser;
use log::{debug, info};

use github_branches::{
    GITHUB_API_ENDPOINT, GitHubApiClient, RepositoryAggregator, RestBranchFetcher,
    RestRepositoryLister, StdResult, TaskAggregator,
};

/// Command line arguments for the GitHub repository/branch aggregator
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// GitHub login of the user whose repositories are aggregated
    username: String,

    /// Base URL of the GitHub REST API
    #[arg(short, long, env = "GITHUB_API_ENDPOINT", default_value = GITHUB_API_ENDPOINT)]
    endpoint: String,

    /// Maximum number of branch fetches in flight at once (0 or unset means unbounded)
    #[arg(short, long)]
    max_concurrent_fetches: Option<usize>,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    let args = Args::parse();
    info!("Starting aggregation for user: {}", args.username);
    debug!("Arguments: {args:?}");

    let aggregator = build_aggregator(&args)?;
    let aggregated_repositories = aggregator.aggregate(&args.username).await?;
    println!("{}", serde_json::to_string_pretty(&aggregated_repositories)?);
    info!("Aggregation completed for user: {}", args.username);

    Ok(())
}

fn build_aggregator(args: &Args) -> StdResult<Arc<dyn RepositoryAggregator>> {
    let client = Arc::new(GitHubApiClient::try_new(&args.endpoint)?);
    let lister = Arc::new(RestRepositoryLister::new(Arc::clone(&client)));
    let fetcher = Arc::new(RestBranchFetcher::new(client));
    let aggregator = match args.max_concurrent_fetches {
        Some(max_concurrent_fetches) => TaskAggregator::new(lister, fetcher)
            .with_max_concurrent_fetches(max_concurrent_fetches),
        None => TaskAggregator::new(lister, fetcher),
    };

    Ok(Arc::new(aggregator))
}
