pub mod entity;
pub mod ids;
pub mod models;
use tokio::sync::OnceCell;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::revalidate::{NoopRevalidator, Revalidator};
use crate::service::threads::ThreadsService;

pub mod service;

pub mod error;

pub mod config;

pub mod revalidate;

static THREADS_CORE: OnceCell<Arc<ThreadsCore>> = OnceCell::const_new();

/// Process-wide handle. Safe to call at the start of every operation; the
/// underlying connection is established once and reused.
pub async fn core() -> Arc<ThreadsCore> {
    THREADS_CORE
        .get_or_init(|| async move {
            Arc::new(ThreadsCore::start().await.expect("failed to init"))
        })
        .await
        .clone()
}

/// Main runtime handle for the threads data layer.
pub struct ThreadsCore {
    pub config: config::ThreadsConfig,

    /// Shared database connection, opened at start and closed at shutdown.
    pub db: DatabaseConnection,

    /// Data operations for posts and comments.
    pub threads: ThreadsService,
}

impl ThreadsCore {
    pub async fn start() -> Result<Self, CoreError> {
        Self::start_with_revalidator(Arc::new(NoopRevalidator)).await
    }

    /// Start with the presentation-cache hook of the embedding framework.
    pub async fn start_with_revalidator(
        revalidator: Arc<dyn Revalidator>,
    ) -> Result<Self, CoreError> {
        let config = config::get_or_init().await?;
        debug!(?config, "loaded config");

        // DB + migrations
        let db = models::open_or_create_db(&config).await?;
        models::migrate_up(&db).await?;

        let threads = ThreadsService::new(db.clone(), revalidator);

        info!("threads core online");

        Ok(Self {
            config,
            db,
            threads,
        })
    }

    pub async fn shutdown(self) -> Result<(), CoreError> {
        self.db.close().await?;
        Ok(())
    }
}

pub mod prelude {
    pub use super::entity;
    pub use super::ids;
    pub use super::models;

    pub use super::service;

    pub use super::revalidate;

    pub use super::error;

    pub use super::config;
}
