//! # LessonHub DB
//!
//! Persistence for the LessonHub API.
//!
//! - [`repository`]: the [`UserRepository`] and [`LessonRepository`] ports
//! - [`postgres`]: PostgreSQL implementations over a shared [`PgPool`]
//! - [`error`]: [`StoreError`] and its mapping onto `AppError`
//! - `memory`: in-memory implementations (feature `test-utils`)
//!
//! # Example
//!
//! ```ignore
//! use lessonhub_config::DatabaseConfig;
//! use lessonhub_db::{Database, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let db = Database::postgres(pool);
//! ```

use std::sync::Arc;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

use lessonhub_config::DatabaseConfig;

pub mod error;
#[cfg(feature = "test-utils")]
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::StoreError;
pub use postgres::{PgLessonRepository, PgUserRepository};
pub use repository::{LessonRepository, UserRepository};
pub use sqlx::PgPool;

/// Migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects a PostgreSQL pool sized from `config`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Repository handles shared by every request.
#[derive(Clone)]
pub struct Database {
    pub users: Arc<dyn UserRepository>,
    pub lessons: Arc<dyn LessonRepository>,
}

impl Database {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            lessons: Arc::new(PgLessonRepository::new(pool)),
        }
    }

    #[cfg(feature = "test-utils")]
    pub fn in_memory() -> Self {
        let store = memory::InMemoryStore::new();
        Self {
            users: store.clone(),
            lessons: store,
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}
