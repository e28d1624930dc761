//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP client operations (GET, HEAD)

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
