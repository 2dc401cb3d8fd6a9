//! Exit code constants for the copydesk CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state)
//! - 2: Validation failure (form fields)
//! - 3: API failure (generation/scoring endpoints)
//! - 4: Lock acquisition failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing workspace, or unknown entity.
pub const USER_ERROR: i32 = 1;

/// Validation failure: required/length/companion field checks failed.
pub const VALIDATION_FAILURE: i32 = 2;

/// API failure: the generation or scoring endpoint returned an error.
pub const API_FAILURE: i32 = 3;

/// Lock acquisition failure: another request is already in flight.
pub const LOCK_FAILURE: i32 = 4;
