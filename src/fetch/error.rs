//! Transport error type for a single fetch attempt.

use std::fmt;

/// Error from one GET: a curl-level failure or a non-2xx final status.
/// Carried into the run's aggregated error list; never retried.
#[derive(Debug)]
pub enum TransportError {
    /// Curl reported an error (resolve, connect, timeout, TLS, ...).
    Curl(curl::Error),
    /// The final response had a non-2xx status.
    Http(u32),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Curl(e) => write!(f, "{}", e),
            TransportError::Http(code) => write!(f, "HTTP {}", code),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Curl(e) => Some(e),
            TransportError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        TransportError::Curl(e)
    }
}
