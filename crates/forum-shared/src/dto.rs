//! Data Transfer Objects - request types for the posts API.

use serde::{Deserialize, Serialize};

/// Request to create a post. Any other fields in the body are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Query string of the post listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub sort_key: Option<String>,
    // Older clients send the misspelled name.
    #[serde(default = "default_ascending", alias = "isAssending")]
    pub is_ascending: bool,
    #[serde(default)]
    pub search_key: Option<String>,
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

fn default_ascending() -> bool {
    true
}
