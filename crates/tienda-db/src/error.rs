//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  PostgreSQL Error (sqlx::Error)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Single translation point, inspects the        │
//! │       │                   vendor conflict code (23505)                  │
//! │       ▼                                                                 │
//! │  ApiError (in apps/api) ← Serialized for HTTP clients                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Client sees a 400 with the store detail for conflicts,                │
//! │  a 404 for missing products, and a generic 500 otherwise               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// PostgreSQL error code for a unique constraint violation.
///
/// The only vendor code the translation point inspects: conflicts become
/// client errors that carry the store's detail message, everything else
/// stays opaque.
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL error code for a foreign key constraint violation.
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and client feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - Lookup by UUID finds no row
    /// - Term matches neither a title nor a slug
    #[error("{entity} with term \"{term}\" not found")]
    NotFound {
        entity: String,
        term: String,
    },

    /// Unique constraint violation (title or slug already taken).
    ///
    /// The detail string comes from the store and is safe to surface to the
    /// client, mirroring the conflict-translation policy.
    #[error("Duplicate value: {detail}")]
    UniqueViolation {
        detail: String,
    },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation {
        message: String,
    },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and search term.
    pub fn not_found(entity: impl Into<String>, term: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            term: term.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(detail: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            detail: detail.into(),
        }
    }

    /// Whether this error should surface as a client error (4xx) rather
    /// than an opaque server error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DbError::NotFound { .. } | DbError::UniqueViolation { .. }
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound            → DbError::NotFound
/// sqlx::Error::Database code 23505    → DbError::UniqueViolation (+ detail)
/// sqlx::Error::Database code 23503    → DbError::ForeignKeyViolation
/// sqlx::Error::Database (other)       → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut           → DbError::PoolExhausted
/// Other                               → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                term: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => {
                    // Postgres puts the offending key into the error detail,
                    // e.g. `Key (slug)=(basic_tee) already exists.`
                    let detail = db_err
                        .try_downcast_ref::<sqlx::postgres::PgDatabaseError>()
                        .and_then(|pg| pg.detail())
                        .unwrap_or_else(|| db_err.message())
                        .to_string();
                    DbError::UniqueViolation { detail }
                }
                Some(PG_FOREIGN_KEY_VIOLATION) => DbError::ForeignKeyViolation {
                    message: db_err.message().to_string(),
                },
                _ => DbError::QueryFailed(db_err.message().to_string()),
            },

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_translation() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_pool_timeout_translation() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::PoolExhausted));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_duplicate_carries_detail() {
        let err = DbError::duplicate("Key (slug)=(basic_tee) already exists.");
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Duplicate value: Key (slug)=(basic_tee) already exists."
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Product", "red-shirt");
        assert_eq!(err.to_string(), "Product with term \"red-shirt\" not found");
    }
}
