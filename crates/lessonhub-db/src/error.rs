use anyhow::anyhow;
use lessonhub_core::AppError;

/// Failure reported by a repository.
///
/// Constraint violations are surfaced as their own variants so services can
/// turn them into domain errors; everything else is opaque.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("referenced row does not exist")]
    ForeignKeyViolation,
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation;
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation;
            }
        }
        StoreError::Database(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation => AppError::conflict(anyhow!("Resource already exists")),
            StoreError::ForeignKeyViolation => {
                AppError::not_found(anyhow!("Referenced resource not found"))
            }
            StoreError::Database(e) => AppError::database(anyhow::Error::from(e)),
        }
    }
}
