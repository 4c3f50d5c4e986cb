use crate::database::DatabaseError;
use rust_decimal::Decimal;
use sqlx::Error as SqlxError;
use thiserror::Error;
use uuid::Uuid;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Amount is zero or negative; rejected before any I/O
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    /// Transaction type does not match the requested balance direction
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Debit larger than the current balance
    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance {
        available: Decimal,
        required: Decimal,
    },

    /// Wallet row missing for the user
    #[error("Wallet not found for user {0}")]
    WalletNotFound(Uuid),

    /// No authenticated user identity on the request
    #[error("Authentication required")]
    Unauthenticated,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Ledger store errors not covered by a more specific variant
    #[error("Store error: {0}")]
    Store(SqlxError),

    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Check if error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::WalletNotFound(_))
    }

    /// Get HTTP status code for the error
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::InvalidAmount(_) | AppError::InvalidTransaction(_) => 400,
            AppError::Unauthenticated => 401,
            AppError::WalletNotFound(_) => 404,
            AppError::InsufficientBalance { .. } => 409,
            AppError::Config(_)
            | AppError::Database(_)
            | AppError::Store(_)
            | AppError::Message(_) => 500,
        }
    }
}

/// Store-specific error types
#[derive(Error, Debug)]
pub enum StoreError {
    /// Wallet row missing where one is required
    #[error("Wallet not found for user {0}")]
    WalletNotFound(Uuid),

    /// Conditional balance update failed; the wallet cannot cover the debit
    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance {
        available: Decimal,
        required: Decimal,
    },

    /// Duplicate record
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database query error
    #[error("Query error: {0}")]
    Query(SqlxError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::WalletNotFound(user_id) => AppError::WalletNotFound(user_id),
            StoreError::InsufficientBalance {
                available,
                required,
            } => AppError::InsufficientBalance {
                available,
                required,
            },
            StoreError::Duplicate(msg) | StoreError::ConstraintViolation(msg) => {
                AppError::InvalidTransaction(msg)
            }
            StoreError::Query(e) => AppError::Store(e),
        }
    }
}

impl From<SqlxError> for StoreError {
    fn from(err: SqlxError) -> Self {
        match &err {
            SqlxError::Database(db_err) => {
                // Classify common PostgreSQL error codes
                let code = db_err.code().map(|c| c.to_string());
                match code.as_deref() {
                    // Unique violation
                    Some("23505") => StoreError::Duplicate(db_err.message().to_string()),
                    // Foreign key / check constraint violation
                    Some("23503") | Some("23514") => {
                        StoreError::ConstraintViolation(db_err.message().to_string())
                    }
                    _ => StoreError::Query(err),
                }
            }
            _ => StoreError::Query(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidAmount(Decimal::ZERO).status_code(), 400);
        assert_eq!(AppError::Unauthenticated.status_code(), 401);
        assert_eq!(AppError::WalletNotFound(Uuid::nil()).status_code(), 404);
        assert_eq!(
            AppError::InsufficientBalance {
                available: Decimal::new(10, 0),
                required: Decimal::new(50, 0),
            }
            .status_code(),
            409
        );
    }

    #[test]
    fn test_store_error_maps_to_app_error() {
        let user_id = Uuid::new_v4();
        let err: AppError = StoreError::WalletNotFound(user_id).into();
        assert!(matches!(err, AppError::WalletNotFound(id) if id == user_id));
    }
}
