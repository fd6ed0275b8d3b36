//! Post entity for SeaORM.
//!
//! Expects a `posts` table shaped as:
//!
//! ```sql
//! CREATE TABLE posts (
//!     id          SERIAL PRIMARY KEY,
//!     title       TEXT NOT NULL,
//!     content     TEXT NOT NULL,
//!     created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     upvotes     INTEGER NOT NULL DEFAULT 0
//! );
//! ```

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set, Unchanged};

use forum_core::domain::{NewPost, Post};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub upvotes: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            created_at: model.created_at.into(),
            upvotes: model.upvotes,
        }
    }
}

/// Insert form of a new post. The database assigns the id.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        Self {
            id: NotSet,
            title: Set(post.title),
            content: Set(post.content),
            created_at: Set(chrono::Utc::now().into()),
            upvotes: Set(0),
        }
    }
}

/// Update form of an existing post. `id` selects the row; `created_at` and
/// `upvotes` are never written.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Unchanged(post.id),
            title: Set(post.title),
            content: Set(post.content),
            created_at: NotSet,
            upvotes: NotSet,
        }
    }
}
