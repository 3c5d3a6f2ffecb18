//! Utility functions for common operations.
//!
//! - **URL validation**: the API base origin must be HTTPS (loopback excepted)
//! - **Text processing**: Unicode-aware width truncation for terminal output

mod text;
mod url_validator;

pub use text::{display_width, single_line, truncate_to_width};
pub use url_validator::{validate_base_url, UrlValidationError};
