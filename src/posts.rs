//! Post records as returned by the posts endpoint.
//!
//! ```json
//! {
//!   "userId": 1,
//!   "id": 1,
//!   "title": "sunt aut facere",
//!   "body": "quia et suscipit"
//! }
//! ```
//!
//! All four fields are required. Extra fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Post {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Body length in characters
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }
}

/// Decode a JSON value into an ordered post collection
pub fn decode_posts(value: Value) -> Result<Vec<Post>, serde_json::Error> {
    serde_json::from_value(value)
}
