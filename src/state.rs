use std::sync::Arc;

use lessonhub_auth::TokenService;
use lessonhub_config::{CorsConfig, JwtConfig};
use lessonhub_db::Database;

/// Shared, read-only application state. Cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: Arc<TokenService>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: Database, jwt_config: &JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            tokens: Arc::new(TokenService::new(jwt_config)),
            cors_config,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}
