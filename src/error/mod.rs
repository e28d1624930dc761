//! Error handling for the status service.
//!
//! Errors are recovered as close to their source as possible:
//!
//! | Failure | Handling |
//! |---------|----------|
//! | Listing fetch | logged, poll continues with no folders |
//! | Single thumbnail check | folded into an offline result |
//! | Whole poll | `StatusError`, surfaced as HTTP 500 |
//! | Configuration | `StatusError::Config`, startup aborts |

mod result;
mod status_error;

pub use result::ServiceResult;
pub use status_error::StatusError;
