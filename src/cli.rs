use clap::{Parser, Subcommand};
use postcache::config::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postcache")]
#[command(about = "Fetch posts, cache them in Redis and report on them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, cache, re-read and print the post reports
    Run(RunArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    /// Configuration file (defaults to $POSTCACHE_CONFIG or config/postcache.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Posts endpoint URL
    #[arg(long)]
    pub url: Option<String>,

    /// User id to search posts for
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Chart output path
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Keep the cache in process memory instead of Redis
    #[arg(long)]
    pub memory_store: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.source.url = url.clone();
        }
        if let Some(user_id) = self.user_id {
            config.report.search_user_id = user_id;
        }
        if let Some(chart) = &self.chart {
            config.report.chart_path = chart.clone();
        }
    }
}
