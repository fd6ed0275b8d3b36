//! Application state - shared across all handlers.

use std::sync::Arc;

use forum_core::PostQueryService;
use forum_core::ports::PostRepository;
use forum_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use forum_infra::{PostgresPostRepository, database::connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostQueryService,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let repo: Arc<dyn PostRepository> = match db_config {
            Some(config) => match connect(config).await {
                Ok(conn) => Arc::new(PostgresPostRepository::new(conn)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(InMemoryPostRepository::new())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repo: Arc<dyn PostRepository> = {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory store");
            Arc::new(InMemoryPostRepository::new())
        };

        tracing::info!("Application state initialized");

        Self::with_repository(repo)
    }

    pub fn with_repository(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            posts: PostQueryService::new(repo),
        }
    }
}
