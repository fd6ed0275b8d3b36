//! In-memory post store - used when no database is configured, and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use forum_core::domain::{NewPost, Post};
use forum_core::error::RepoError;
use forum_core::ports::{OverwriteOutcome, PostRepository};
use forum_core::query::PostQuery;

struct Store {
    last_id: i32,
    posts: BTreeMap<i32, Post>,
}

/// In-memory post store.
///
/// Writers are serialized behind an async `RwLock`, so an overwrite that runs
/// after a delete sees the post as missing.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                last_id: 0,
                posts: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut matching: Vec<&Post> = store.posts.values().filter(|p| query.matches(p)).collect();
        matching.sort_by(|a, b| query.ordering(a, b));

        let skip = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(query.page.size()).unwrap_or(usize::MAX);

        Ok(matching.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepoError::Constraint("post id space exhausted".to_string()))?;
        store.last_id = id;

        let post = new_post.into_post(id, Utc::now());
        store.posts.insert(id, post.clone());

        Ok(post)
    }

    async fn overwrite(&self, replacement: Post) -> Result<OverwriteOutcome, RepoError> {
        let mut store = self.store.write().await;

        let Some(stored) = store.posts.get_mut(&replacement.id) else {
            return Ok(OverwriteOutcome::NotFound);
        };
        stored.title = replacement.title;
        stored.content = replacement.content;

        Ok(OverwriteOutcome::Updated(stored.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        Ok(self.store.write().await.posts.remove(&id).is_some())
    }
}
