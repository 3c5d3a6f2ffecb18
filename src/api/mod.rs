//! HTTP access to the contents API.
//!
//! - [`ApiClient`] issues single-attempt, timeout-bounded GET requests
//! - [`IdentifierSource`] and [`DetailSource`] are the seams the feed
//!   aggregator depends on, so it can run against fakes in tests
//! - [`ApiError`] classifies failures into network-class and parse-class

mod client;
mod error;
mod source;

pub use client::{build_http_client, ApiClient};
pub use error::ApiError;
pub use source::{DetailSource, IdentifierSource};
