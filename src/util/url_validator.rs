use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Errors that can occur while validating the API base URL.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// Plain HTTP to a non-loopback host.
    #[error("Insecure base URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,
    /// Base URLs must be a bare origin plus optional path prefix.
    #[error("Base URL must not carry a query string or fragment")]
    UnexpectedComponents,
}

/// Validates the origin the contents API is served from.
///
/// HTTPS is required. Plain HTTP is accepted only for loopback hosts
/// (`localhost`, `127.0.0.1`, `::1`), which is what mock servers bind to.
/// The returned URL always ends in `/` so that relative joins append to
/// any path prefix instead of replacing its last segment.
///
/// # Examples
///
/// ```
/// use newbie_feed::util::validate_base_url;
///
/// let url = validate_base_url("https://newsservice.shop").unwrap();
/// assert_eq!(url.as_str(), "https://newsservice.shop/");
///
/// assert!(validate_base_url("http://newsservice.shop").is_err());
/// assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
/// ```
pub fn validate_base_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let mut url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "https" => {}
        "http" => {
            if !is_loopback_host(&url) {
                tracing::error!(base_url = %url, "Rejecting non-HTTPS base URL (HTTPS required except for localhost)");
                return Err(UrlValidationError::InsecureBaseUrl);
            }
            tracing::warn!(base_url = %url, "Using non-HTTPS API base URL (localhost only)");
        }
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(UrlValidationError::UnexpectedComponents);
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn is_loopback_host(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => {
            // Strip brackets from IPv6 addresses for parsing
            let host = host
                .strip_prefix('[')
                .and_then(|h| h.strip_suffix(']'))
                .unwrap_or(host);
            host.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
        }
        None => false,
    }
}
