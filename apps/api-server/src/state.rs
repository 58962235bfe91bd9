//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::BlogService;
use blog_core::ports::{
    Clock, CommentRepository, PasswordService, PostRepository, SystemClock, TokenService,
    UserRepository,
};
use blog_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub registration_open: bool,
    /// Name of the active store, reported by the health check.
    pub storage: &'static str,
}

struct Repositories {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    storage: &'static str,
}

impl Repositories {
    fn in_memory(store: &InMemoryStore) -> Self {
        Self {
            users: Arc::new(store.users()),
            posts: Arc::new(store.posts()),
            comments: Arc::new(store.comments()),
            storage: "memory",
        }
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let repos = Self::repositories(config).await?;
        let state = Self::assemble(
            repos,
            Arc::new(JwtTokenService::from_env()),
            Arc::new(SystemClock),
            config.registration_open,
        );

        tracing::info!(storage = state.storage, "Application state initialized");
        Ok(state)
    }

    /// State over a private in-memory store.
    #[cfg(test)]
    pub fn in_memory(
        store: &InMemoryStore,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
        registration_open: bool,
    ) -> Self {
        Self::assemble(Repositories::in_memory(store), tokens, clock, registration_open)
    }

    fn assemble(
        repos: Repositories,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
        registration_open: bool,
    ) -> Self {
        let blog = BlogService::new(repos.posts, repos.comments, repos.users.clone(), clock);

        Self {
            blog,
            users: repos.users,
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            registration_open,
            storage: repos.storage,
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> std::io::Result<Repositories> {
        use blog_infra::database::{
            PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository, connect,
        };
        use migration::MigratorTrait;

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Repositories::in_memory(&InMemoryStore::new()));
        };

        let conn = match connect(db_config).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Ok(Repositories::in_memory(&InMemoryStore::new()));
            }
        };

        if config.run_migrations {
            migration::Migrator::up(&conn, None).await.map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                std::io::Error::other(e.to_string())
            })?;
            tracing::info!("Migrations applied");
        }

        Ok(Repositories {
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(conn)),
            storage: "postgres",
        })
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(_config: &AppConfig) -> std::io::Result<Repositories> {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Ok(Repositories::in_memory(&InMemoryStore::new()))
    }
}
