//! Use Case Result Type
//!
//! A two-variant outcome type for use case execution. Every use case and
//! every pipeline run terminates in exactly one of the two variants; there
//! is no partial success.

use super::error::DomainError;

/// Result type for use case execution.
///
/// This is similar to `Result<T, E>` but fixes the error type to
/// [`DomainError`] and fails loudly when the wrong variant is accessed:
/// `unwrap()` on a failure and `unwrap_err()` on a success are programming
/// errors and panic rather than silently returning a default.
///
/// # Usage
///
/// ```ignore
/// // Return failure for validation/business rule violations
/// if !is_valid {
///     return UseCaseResult::fail(DomainError::validation("Invalid input"));
/// }
///
/// UseCaseResult::ok(output)
/// ```
pub enum UseCaseResult<T> {
    /// Successful result containing the use case output.
    Success(T),
    /// Failed result containing the error.
    Failure(DomainError),
}

impl<T> UseCaseResult<T> {
    /// Create a success result.
    pub fn ok(value: T) -> Self {
        UseCaseResult::Success(value)
    }

    /// Create a failure result.
    pub fn fail(error: DomainError) -> Self {
        UseCaseResult::Failure(error)
    }

    /// Check if this is a success result.
    pub fn is_success(&self) -> bool {
        matches!(self, UseCaseResult::Success(_))
    }

    /// Check if this is a failure result.
    pub fn is_failure(&self) -> bool {
        matches!(self, UseCaseResult::Failure(_))
    }

    /// Get the success value, consuming self.
    ///
    /// Panics if this is a failure.
    pub fn unwrap(self) -> T {
        match self {
            UseCaseResult::Success(v) => v,
            UseCaseResult::Failure(e) => panic!("Called unwrap on a Failure: {}", e),
        }
    }

    /// Get the error, consuming self.
    ///
    /// Panics if this is a success.
    pub fn unwrap_err(self) -> DomainError {
        match self {
            UseCaseResult::Success(_) => panic!("Called unwrap_err on a Success"),
            UseCaseResult::Failure(e) => e,
        }
    }

    /// Get a reference to the success value, if any.
    pub fn as_success(&self) -> Option<&T> {
        match self {
            UseCaseResult::Success(v) => Some(v),
            UseCaseResult::Failure(_) => None,
        }
    }

    /// Get a reference to the error, if any.
    pub fn as_failure(&self) -> Option<&DomainError> {
        match self {
            UseCaseResult::Success(_) => None,
            UseCaseResult::Failure(e) => Some(e),
        }
    }

    /// Map the success value.
    pub fn map<U, F>(self, f: F) -> UseCaseResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            UseCaseResult::Success(v) => UseCaseResult::Success(f(v)),
            UseCaseResult::Failure(e) => UseCaseResult::Failure(e),
        }
    }

    /// Map the error.
    pub fn map_err<F>(self, f: F) -> UseCaseResult<T>
    where
        F: FnOnce(DomainError) -> DomainError,
    {
        match self {
            UseCaseResult::Success(v) => UseCaseResult::Success(v),
            UseCaseResult::Failure(e) => UseCaseResult::Failure(f(e)),
        }
    }

    /// Convert to a standard Result.
    pub fn into_result(self) -> Result<T, DomainError> {
        match self {
            UseCaseResult::Success(v) => Ok(v),
            UseCaseResult::Failure(e) => Err(e),
        }
    }
}

impl<T> From<Result<T, DomainError>> for UseCaseResult<T> {
    fn from(result: Result<T, DomainError>) -> Self {
        match result {
            Ok(v) => UseCaseResult::Success(v),
            Err(e) => UseCaseResult::Failure(e),
        }
    }
}

impl<T> From<UseCaseResult<T>> for Result<T, DomainError> {
    fn from(result: UseCaseResult<T>) -> Self {
        result.into_result()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for UseCaseResult<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UseCaseResult::Success(v) => f.debug_tuple("Success").field(v).finish(),
            UseCaseResult::Failure(e) => f.debug_tuple("Failure").field(e).finish(),
        }
    }
}
