//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::pagination::PaginationConfig;
use folio_core::ports::PostRepository;
use folio_core::services::PostService;
use folio_infra::InMemoryPostRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let repo = Self::post_repository(config).await;
        tracing::info!("Application state initialized");

        Self::with_repository(repo, config.pagination)
    }

    /// State over an explicit repository.
    pub fn with_repository(repo: Arc<dyn PostRepository>, pagination: PaginationConfig) -> Self {
        Self {
            posts: PostService::new(repo),
            pagination,
        }
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(config: &AppConfig) -> Arc<dyn PostRepository> {
        use folio_infra::PostgresPostRepository;
        use folio_infra::database::connect;

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryPostRepository::new());
        };

        match connect(db_config).await {
            Ok(conn) => Arc::new(PostgresPostRepository::new(conn)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryPostRepository::new())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(_config: &AppConfig) -> Arc<dyn PostRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryPostRepository::new())
    }
}
