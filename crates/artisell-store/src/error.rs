//! # Store Error Type
//!
//! Unified error type for storefront service calls.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Artisell                               │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  checkout submit                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service Function                                                │  │
//! │  │  Result<T, StoreError>                                           │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Form invalid? ──── Validation([field errors]) ────────────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Transaction failed? ── DbError ── logged ── OrderNotProcessed ►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Validation errors carry the offending field names so the form can     │
//! │  re-render inline messages; persistence failures stay generic.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use artisell_core::{CoreError, ValidationError};
use artisell_db::DbError;

// =============================================================================
// Error Codes
// =============================================================================

/// Machine-readable error codes for programmatic handling.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await placeOrder(form);
/// } catch (e) {
///   switch (e.code) {
///     case 'VALIDATION_ERROR':
///       showInlineErrors(e.fields);
///       break;
///     case 'AUTH_REQUIRED':
///       redirectToLogin();
///       break;
///     default:
///       showError('An error occurred');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// No authenticated user for an operation that requires one
    AuthRequired,

    /// Login failed (wrong email or password, deliberately indistinct)
    InvalidCredentials,

    /// Cart operation failed
    CartError,

    /// Order placement failed (transaction rolled back)
    OrderError,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

// =============================================================================
// Store Error
// =============================================================================

/// Errors returned from storefront service calls.
#[derive(Debug, Error)]
pub enum StoreError {
    /// One or more checkout/registration fields failed validation.
    /// Carries every violation so the form re-renders in one pass.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// Referenced entity does not exist. Recoverable: the UI shows a
    /// 404-equivalent or removes the stale reference.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Operation requires an authenticated user. The frontend redirects
    /// to login, preserving the intended destination.
    #[error("authentication required")]
    AuthRequired,

    /// Login rejected. Deliberately the same for an unknown email and a
    /// wrong password, so the response does not leak which emails exist.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The artwork cannot currently be purchased.
    #[error("artwork is not available for sale: {0}")]
    OutOfStock(String),

    /// Cart domain error (size caps, empty-cart checkout, etc.).
    #[error("cart error: {0}")]
    Cart(CoreError),

    /// Submitted totals do not match the cart items they came with.
    /// Indicates a caller bug; the order is rejected before persistence.
    #[error("order totals do not match cart contents")]
    TotalsMismatch,

    /// The order transaction failed and was rolled back. Generic on
    /// purpose: internals are logged, not surfaced.
    #[error("order could not be processed")]
    OrderNotProcessed,

    /// Database operation failed outside the order transaction.
    #[error("database error: {0}")]
    Database(DbError),

    /// Internal error (hashing failure etc.).
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(entity: &str, id: &str) -> Self {
        StoreError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// The machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Validation(_) => ErrorCode::ValidationError,
            StoreError::NotFound { .. } => ErrorCode::NotFound,
            StoreError::AuthRequired => ErrorCode::AuthRequired,
            StoreError::InvalidCredentials => ErrorCode::InvalidCredentials,
            StoreError::OutOfStock(_) | StoreError::Cart(_) => ErrorCode::CartError,
            StoreError::TotalsMismatch | StoreError::OrderNotProcessed => ErrorCode::OrderError,
            StoreError::Database(_) => ErrorCode::DatabaseError,
            StoreError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// The per-field validation errors, if this is a validation failure.
    pub fn fields(&self) -> &[ValidationError] {
        match self {
            StoreError::Validation(fields) => fields,
            _ => &[],
        }
    }
}

/// Converts core errors to store errors.
impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => StoreError::not_found("Product", &id),
            CoreError::Validation(e) => StoreError::Validation(vec![e]),
            other => StoreError::Cart(other),
        }
    }
}

/// Converts database errors to store errors.
///
/// Internals are logged here; what the caller sees stays generic.
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => StoreError::NotFound { entity, id },
            DbError::UniqueViolation { field, value } => {
                // Constraint names arrive as "table.column"; the column is
                // the field the form knows about
                let field = field.rsplit('.').next().unwrap_or(&field).to_string();
                StoreError::Validation(vec![ValidationError::Duplicate { field, value }])
            }
            DbError::ConnectionFailed(ref msg) | DbError::MigrationFailed(ref msg) => {
                // Connectivity loss is operator-facing, not user-facing
                tracing::error!("Database unavailable: {}", msg);
                StoreError::Database(err)
            }
            other => {
                tracing::error!("Database operation failed: {}", other);
                StoreError::Database(other)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(StoreError::AuthRequired.code(), ErrorCode::AuthRequired);
        assert_eq!(
            StoreError::OrderNotProcessed.code(),
            ErrorCode::OrderError
        );
        assert_eq!(
            StoreError::Validation(vec![]).code(),
            ErrorCode::ValidationError
        );
    }

    #[test]
    fn test_unique_violation_becomes_field_error() {
        let err: StoreError = DbError::duplicate("users.email", "juan@example.com").into();
        let fields = err.fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field(), "email");
    }

    #[test]
    fn test_core_not_found_maps() {
        let err: StoreError = CoreError::ProductNotFound("p-1".to_string()).into();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
