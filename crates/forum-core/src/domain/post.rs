use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a single forum submission.
///
/// `id`, `created_at` and `upvotes` are owned by the store: they are assigned
/// when the post is first persisted, and a replace only writes `title` and
/// `content`. Clients may omit the store-owned fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub upvotes: i32,
}

/// Input for creating a post. Only these fields are ever taken from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Materialize the post once the store has assigned its identity.
    pub fn into_post(self, id: i32, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            created_at,
            upvotes: 0,
        }
    }
}
