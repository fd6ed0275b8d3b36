use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;
use crate::query::PostQuery;

/// Result of overwriting a stored post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverwriteOutcome {
    /// The record was replaced; carries the stored state.
    Updated(Post),
    /// The store knows no record with that id.
    NotFound,
    /// The write did not apply: the record changed or vanished after it was read.
    Conflict,
}

/// Post store - abstraction over the persistence backend.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Filtered, ordered page of posts.
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Persist a new post. The store assigns id, creation time and upvotes.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Unconditionally overwrite the title and content of the post with `post.id`.
    async fn overwrite(&self, post: Post) -> Result<OverwriteOutcome, RepoError>;

    /// Delete a post. Returns `false` if there was nothing to delete.
    async fn delete(&self, id: i32) -> Result<bool, RepoError>;

    /// Whether a post with this id currently exists.
    async fn exists(&self, id: i32) -> Result<bool, RepoError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
