//! Result type alias for billsync
//!
//! This module provides a convenient Result type alias that uses
//! BillsyncError as the error type.

use super::errors::BillsyncError;

/// Result type alias for billsync operations
///
/// This is a convenience type alias that uses `BillsyncError` as the error
/// type. Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use billsync::domain::result::Result;
/// use billsync::domain::errors::BillsyncError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(BillsyncError::Reconciliation("missing outcome".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BillsyncError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::BillsyncError;

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(BillsyncError::Other("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
