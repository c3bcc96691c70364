mod cli;

use clap::Parser;
use cli::{Cli, Commands, RunArgs};
use postcache::config::Config;
use postcache::fetcher::HttpFetcher;
use postcache::observability;
use postcache::pipeline::{self, RunSettings};
use postcache::posts::Post;
use postcache::processor::PostsProcessor;
use postcache::store::{MemoryStore, RedisStore, StoreError};
use tracing::{error, info};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args).await?,
    }

    Ok(())
}

async fn run(args: RunArgs) -> Result<(), AnyError> {
    let telemetry = observability::init_tracing();

    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path.clone())?,
        None => Config::load()?,
    };
    args.apply(&mut config);
    config.validate()?;

    telemetry.apply_filter(&config.telemetry.log_filter);

    let fetcher = HttpFetcher::from_source(&config.source)?;
    info!(url = fetcher.url(), "Posts source");
    let settings = RunSettings {
        cache_key: config.store.key.clone(),
        search_user_id: config.report.search_user_id,
    };
    let report_config = config.report.clone();
    let make_reports = |posts: Vec<Post>| PostsProcessor::new(posts, &report_config);

    let result = if args.memory_store {
        info!("Using in-memory store");
        pipeline::run(
            &fetcher,
            || async { Ok::<_, StoreError>(MemoryStore::new()) },
            make_reports,
            &settings,
        )
        .await
    } else {
        let redis_url = config.store.redis_url();
        pipeline::run(
            &fetcher,
            || RedisStore::connect_url(&redis_url),
            make_reports,
            &settings,
        )
        .await
    };

    match result {
        Ok(summary) => {
            info!(
                posts = summary.post_count,
                users = summary.user_count,
                "Run finished"
            );
            Ok(())
        }
        Err(e) if e.is_store_connection() => {
            error!(error = %e, "Store liveness check failed");
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            Err(e.into())
        }
    }
}
