//! Result type alias for service operations.

use super::status_error::StatusError;

/// Type alias for Results using [`StatusError`].
pub type ServiceResult<T> = Result<T, StatusError>;
