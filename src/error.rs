//! Error types for the copydesk CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for copydesk operations.
///
/// Each variant maps to a specific exit code. Validation errors are
/// field-scoped and produced by the form engine; API errors carry the
/// message surfaced from the remote endpoint.
#[derive(Error, Debug)]
pub enum CopydeskError {
    /// User provided invalid arguments or the workspace is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// Form validation failed before generation.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// The generation or scoring endpoint rejected the request.
    #[error("API request failed: {0}")]
    ApiError(String),

    /// A request lock could not be acquired.
    #[error("Lock acquisition failed: {0}")]
    LockError(String),
}

impl CopydeskError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CopydeskError::UserError(_) => exit_codes::USER_ERROR,
            CopydeskError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            CopydeskError::ApiError(_) => exit_codes::API_FAILURE,
            CopydeskError::LockError(_) => exit_codes::LOCK_FAILURE,
        }
    }
}

/// Result type alias for copydesk operations.
pub type Result<T> = std::result::Result<T, CopydeskError>;
