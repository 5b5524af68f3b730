//! # LessonHub Config
//!
//! Configuration structures loaded from environment variables. Each type
//! exposes `from_env()` and falls back to a development default when a
//! variable is missing.
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: listen address
//!
//! # Example
//!
//! ```ignore
//! use lessonhub_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let database_config = DatabaseConfig::from_env()?;
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::{DatabaseConfig, MissingVar};
pub use jwt::JwtConfig;
pub use server::ServerConfig;
