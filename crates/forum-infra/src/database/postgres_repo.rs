//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::sea_query::{LikeExpr, Order};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use forum_core::domain::{NewPost, Post};
use forum_core::error::RepoError;
use forum_core::ports::{OverwriteOutcome, PostRepository};
use forum_core::query::{PostQuery, SortKey};

use super::entity::post::{self, Entity as PostEntity};

/// `LIKE` escape character used for search terms.
const LIKE_ESCAPE: char = '\\';

/// PostgreSQL post repository backed by a SeaORM connection pool.
///
/// Each statement checks a connection out of the pool and returns it when the
/// statement completes, so no handle outlives a single call.
pub struct PostgresPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

fn sort_column(key: SortKey) -> post::Column {
    match key {
        SortKey::Id => post::Column::Id,
        SortKey::CreatedAt => post::Column::CreatedAt,
        SortKey::Positivity => post::Column::Upvotes,
    }
}

/// `%term%` with the pattern metacharacters of `term` escaped.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Build the listing statement: search filter, ordering, then the page window.
pub(crate) fn list_select(query: &PostQuery) -> Select<PostEntity> {
    let mut select = PostEntity::find();

    if let Some(term) = &query.search {
        let pattern = like_pattern(term);
        select = select.filter(
            Condition::any()
                .add(post::Column::Title.like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)))
                .add(post::Column::Content.like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))),
        );
    }

    let order = if query.direction.is_ascending() {
        Order::Asc
    } else {
        Order::Desc
    };
    select = select.order_by(sort_column(query.sort), order);
    if query.sort != SortKey::Id {
        select = select.order_by_asc(post::Column::Id);
    }

    select
        .offset(query.page.offset())
        .limit(query.page.size())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let rows = list_select(query)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = rows.len(), "Fetched post page");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = new_post.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn overwrite(&self, replacement: Post) -> Result<OverwriteOutcome, RepoError> {
        let id = replacement.id;
        let active_model: post::ActiveModel = replacement.into();

        // UPDATE .. RETURNING yields no row when the post was deleted after it was read.
        match active_model.update(&self.db).await {
            Ok(model) => Ok(OverwriteOutcome::Updated(model.into())),
            Err(DbErr::RecordNotUpdated) => {
                tracing::debug!(post_id = id, "Overwrite matched no row");
                Ok(OverwriteOutcome::Conflict)
            }
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }
}
