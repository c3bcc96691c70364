//! Fetch, cache, re-read and report
//!
//! Steps run strictly in sequence:
//! 1. fetch the posts document
//! 2. connect to the store (liveness-checked)
//! 3. `put` the document under the cache key
//! 4. `get` it back and decode into posts
//! 5. run the reports: chart, per-user counts, search
//!
//! Collaborators are passed in so tests can substitute fakes. The store is
//! connected only after a successful fetch; a failed connection stops the run
//! before any `put`/`get`.

use crate::fetcher::{FetchError, PostFetcher};
use crate::posts::{Post, decode_posts};
use crate::processor::{PostReports, ReportError};
use crate::store::{JsonStore, StoreError};
use std::future::Future;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    StoreConnection(StoreError),

    #[error("Store operation failed: {0}")]
    Store(StoreError),

    #[error("Cached value is not a list of posts: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Cache key '{0}' missing right after write")]
    CacheMiss(String),

    #[error("Report failed: {0}")]
    Report(#[from] ReportError),
}

impl PipelineError {
    /// Liveness check failed; the caller exits with status 1
    pub fn is_store_connection(&self) -> bool {
        matches!(self, PipelineError::StoreConnection(_))
    }
}

/// Per-run parameters
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub cache_key: String,
    pub search_user_id: i64,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub post_count: usize,
    pub user_count: usize,
}

pub async fn run<S, C, Fut, R, M>(
    fetcher: &dyn PostFetcher,
    connect: C,
    make_reports: M,
    settings: &RunSettings,
) -> Result<RunSummary, PipelineError>
where
    S: JsonStore,
    C: FnOnce() -> Fut,
    Fut: Future<Output = Result<S, StoreError>>,
    R: PostReports,
    M: FnOnce(Vec<Post>) -> R,
{
    info!("Fetching posts");
    let document = fetcher.fetch().await?;

    let store = connect().await.map_err(PipelineError::StoreConnection)?;

    let key = settings.cache_key.as_str();
    store.put(key, &document).await.map_err(PipelineError::Store)?;
    info!(key, "Posts cached");

    let cached = store
        .get(key)
        .await
        .map_err(PipelineError::Store)?
        .ok_or_else(|| PipelineError::CacheMiss(key.to_string()))?;

    let posts = decode_posts(cached)?;
    let summary = RunSummary {
        post_count: posts.len(),
        user_count: count_users(&posts),
    };
    debug!(posts = summary.post_count, users = summary.user_count, "Posts decoded");

    let reports = make_reports(posts);
    reports.plot_lengths()?;
    reports.count_by_user()?;
    reports.search_by_user(settings.search_user_id)?;

    info!(posts = summary.post_count, "Reports complete");
    Ok(summary)
}

fn count_users(posts: &[Post]) -> usize {
    let mut seen: Vec<i64> = posts.iter().map(|post| post.user_id).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_users() {
        let posts: Vec<Post> = [3, 1, 3, 2, 1]
            .iter()
            .enumerate()
            .map(|(id, &user_id)| Post {
                user_id,
                id: id as i64,
                title: String::new(),
                body: String::new(),
            })
            .collect();

        assert_eq!(count_users(&posts), 3);
        assert_eq!(count_users(&[]), 0);
    }

    #[test]
    fn test_store_connection_classification() {
        let err = PipelineError::StoreConnection(StoreError::Connection("refused".to_string()));
        assert!(err.is_store_connection());

        let err = PipelineError::CacheMiss("k".to_string());
        assert!(!err.is_store_connection());
    }
}
