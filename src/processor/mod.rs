//! Read-only reports over a fetched post collection
//!
//! - [`PostReports::plot_lengths`] - SVG bar chart of body lengths
//! - [`PostReports::count_by_user`] - per-user counts in first-seen order
//! - [`PostReports::search_by_user`] - titles of one user's posts
//!
//! Each report only reads the held collection, so reruns produce the same output.

pub mod chart;

use crate::config::ReportConfig;
use crate::posts::Post;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Reports run by the pipeline, in this order
pub trait PostReports {
    fn plot_lengths(&self) -> Result<()>;
    fn count_by_user(&self) -> Result<()>;
    fn search_by_user(&self, user_id: i64) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct PostsProcessor {
    posts: Vec<Post>,
    chart_path: PathBuf,
}

impl PostsProcessor {
    pub fn new(posts: Vec<Post>, config: &ReportConfig) -> Self {
        Self {
            posts,
            chart_path: config.chart_path.clone(),
        }
    }

    /// Body length of every post, in collection order
    pub fn body_lengths(&self) -> Vec<usize> {
        self.posts.iter().map(Post::body_len).collect()
    }

    /// `(user_id, count)` pairs in order of each user's first post
    pub fn user_counts(&self) -> Vec<(i64, usize)> {
        let mut counts: Vec<(i64, usize)> = Vec::new();
        let mut index: HashMap<i64, usize> = HashMap::new();

        for post in &self.posts {
            match index.get(&post.user_id) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(post.user_id, counts.len());
                    counts.push((post.user_id, 1));
                }
            }
        }

        counts
    }

    pub fn posts_by_user(&self, user_id: i64) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|post| post.user_id == user_id)
            .collect()
    }

    pub fn write_user_counts<W: Write>(&self, out: &mut W) -> Result<()> {
        for (user_id, count) in self.user_counts() {
            writeln!(out, "User {} has {} posts", user_id, count)?;
        }
        Ok(())
    }

    pub fn write_search<W: Write>(&self, user_id: i64, out: &mut W) -> Result<()> {
        let matched = self.posts_by_user(user_id);

        writeln!(out, "Found {} posts by user '{}':", matched.len(), user_id)?;
        for post in matched {
            writeln!(out, " - {}", post.title)?;
        }
        Ok(())
    }
}

impl PostReports for PostsProcessor {
    fn plot_lengths(&self) -> Result<()> {
        chart::render_bar_chart(&self.chart_path, &self.body_lengths())
    }

    fn count_by_user(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_user_counts(&mut out)?;
        out.flush()?;
        Ok(())
    }

    fn search_by_user(&self, user_id: i64) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_search(user_id, &mut out)?;
        out.flush()?;
        Ok(())
    }
}
