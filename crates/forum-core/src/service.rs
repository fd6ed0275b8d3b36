//! Post query service - listing, lookup and mutation of posts over a store.

use std::sync::Arc;

use crate::domain::{NewPost, Post};
use crate::error::DomainError;
use crate::ports::{OverwriteOutcome, PostRepository};
use crate::query::{PageRequest, PostQuery, SortDirection, SortKey};

const ENTITY: &str = "Post";

/// Translates request parameters into store operations.
///
/// Holds no per-request state; every call goes straight to the store.
#[derive(Clone)]
pub struct PostQueryService {
    repo: Arc<dyn PostRepository>,
}

impl PostQueryService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// List one page of posts.
    ///
    /// `sort_key` is matched case-insensitively against `id`, `createdat` and
    /// `positivity`; anything else orders by id. A blank `search_key` disables
    /// filtering.
    pub async fn list_posts(
        &self,
        page_number: i64,
        page_size: i64,
        sort_key: Option<&str>,
        ascending: bool,
        search_key: Option<String>,
    ) -> Result<Vec<Post>, DomainError> {
        let page = PageRequest::new(page_number, page_size)?;
        let query = PostQuery::new(page)
            .sorted_by(
                SortKey::resolve(sort_key),
                SortDirection::from_ascending(ascending),
            )
            .matching(search_key);

        tracing::debug!(
            page = page.number(),
            size = page.size(),
            sort = query.sort.as_str(),
            ascending,
            search = query.search.as_deref(),
            "Listing posts"
        );

        Ok(self.repo.list(&query).await?)
    }

    pub async fn get_post(&self, id: i32) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            })
    }

    /// Create a post from the client-writable fields only.
    pub async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let post = self.repo.insert(input).await?;
        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Replace the title and content of the post identified by `id`.
    ///
    /// A write that loses a race is re-checked against the store: if the post
    /// is gone the caller gets `NotFound`, otherwise the conflict is returned
    /// as-is and nothing is retried.
    pub async fn replace_post(&self, id: i32, post: Post) -> Result<(), DomainError> {
        if id != post.id {
            return Err(DomainError::IdMismatch {
                path_id: id,
                body_id: post.id,
            });
        }

        match self.repo.overwrite(post).await? {
            OverwriteOutcome::Updated(_) => {
                tracing::info!(post_id = id, "Post replaced");
                Ok(())
            }
            OverwriteOutcome::NotFound => Err(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            }),
            OverwriteOutcome::Conflict => {
                if !self.post_exists(id).await? {
                    tracing::debug!(post_id = id, "Post deleted during replace");
                    return Err(DomainError::NotFound {
                        entity_type: ENTITY,
                        id,
                    });
                }
                tracing::error!(post_id = id, "Unresolvable concurrent update of post");
                Err(DomainError::ConcurrencyConflict {
                    entity_type: ENTITY,
                    id,
                })
            }
        }
    }

    pub async fn delete_post(&self, id: i32) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            });
        }
        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    pub async fn post_exists(&self, id: i32) -> Result<bool, DomainError> {
        Ok(self.repo.exists(id).await?)
    }
}
