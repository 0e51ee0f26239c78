//! Error types for the chainkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when table construction parameters are invalid
//!   (a zero bucket count).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (debug-only `check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use chainkit::error::ConfigError;
//! use chainkit::table::{ChainedTable, DuplicatePolicy};
//!
//! // Fallible constructor for user-configurable parameters
//! let table: Result<ChainedTable, ConfigError> =
//!     ChainedTable::try_new(100, DuplicatePolicy::Count);
//! assert!(table.is_ok());
//!
//! // A zero bucket count is caught without panicking
//! let bad = ChainedTable::try_new(0, DuplicatePolicy::Count);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when table construction parameters are invalid.
///
/// Produced by [`ChainedTable::try_new`](crate::table::ChainedTable::try_new)
/// when the bucket count is zero. Carries a human-readable description of
/// which parameter failed validation.
///
/// # Example
///
/// ```
/// use chainkit::table::{ChainedTable, DuplicatePolicy};
///
/// let err = ChainedTable::try_new(0, DuplicatePolicy::Reject).unwrap_err();
/// assert!(err.to_string().contains("bucket count"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal table invariants are violated.
///
/// Produced by the debug-only
/// [`ChainedTable::check_invariants`](crate::table::ChainedTable::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
