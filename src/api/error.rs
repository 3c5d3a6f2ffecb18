use thiserror::Error;

/// Errors that can occur while talking to the contents API.
///
/// Every variant belongs to one of two classes: network-class failures
/// (transport, non-2xx status, timeout, oversized body) and parse-class
/// failures (a body arrived but could not be understood). Use
/// [`ApiError::is_network`] and [`ApiError::is_parse`] to branch on the class.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the per-request timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the size ceiling
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Body present but matched no accepted shape or schema
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// True for transport failures, non-2xx statuses, timeouts and oversized bodies.
    pub fn is_network(&self) -> bool {
        !self.is_parse()
    }

    /// True when a response body was received but could not be decoded.
    pub fn is_parse(&self) -> bool {
        matches!(self, ApiError::Parse(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus(status) => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(ApiError::HttpStatus(404).is_network());
        assert!(ApiError::Timeout.is_network());
        assert!(ApiError::ResponseTooLarge(10).is_network());
        assert!(ApiError::Parse("bad".into()).is_parse());
        assert!(!ApiError::Parse("bad".into()).is_network());
    }

    #[test]
    fn test_status_extraction() {
        assert_eq!(ApiError::HttpStatus(503).status(), Some(503));
        assert_eq!(ApiError::Timeout.status(), None);
    }

    #[test]
    fn test_from_serde_json_is_parse() {
        let err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let api: ApiError = err.into();
        assert!(api.is_parse());
        assert!(api.to_string().starts_with("Parse error"));
    }
}
