//! # Forum Infrastructure
//!
//! Concrete implementations of the store port defined in `forum-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL store via SeaORM

pub mod database;

pub use database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
