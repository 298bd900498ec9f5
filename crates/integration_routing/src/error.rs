//! Routing integration error types

use thiserror::Error;

/// Errors raised by the place search, road routing and transit clients
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with an unexpected status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the service response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// A coordinate or query the service cannot handle
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl RoutingError {
    /// Map a transport error, distinguishing timeouts
    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }

    /// Map a non-success HTTP status
    pub(crate) fn from_status(response: &reqwest::Response) -> Self {
        let status = response.status();
        match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            },
            reqwest::StatusCode::SERVICE_UNAVAILABLE | reqwest::StatusCode::BAD_GATEWAY => {
                Self::ServiceUnavailable(format!("HTTP {status}"))
            },
            _ => Self::RequestFailed(format!("HTTP {status}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RoutingError::RateLimitExceeded {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));

        let err = RoutingError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));

        let err = RoutingError::InvalidLocation("91,0".to_string());
        assert_eq!(err.to_string(), "Invalid location: 91,0");
    }
}
