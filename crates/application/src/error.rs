//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures the map screen shows to the user
///
/// Recorded in the orchestrator's error state; never propagated further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The place search request itself failed
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// The search succeeded but matched nothing
    #[error("No results found")]
    NoResultsFound,

    /// The directions request failed
    #[error("Route failed: {0}")]
    RouteFailed(String),

    /// The directions service answered without any route
    #[error("No route found")]
    NoRouteFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_messages() {
        assert_eq!(
            ApplicationError::ExternalService("offline".to_string()).to_string(),
            "External service error: offline"
        );
        assert_eq!(
            ApplicationError::Configuration("transit.base_url is not set".to_string()).to_string(),
            "Configuration error: transit.base_url is not set"
        );
    }

    #[test]
    fn domain_error_is_transparent() {
        let err = ApplicationError::from(DomainError::EmptyGeometry("route polyline".to_string()));
        assert_eq!(err.to_string(), "Empty geometry: route polyline");
    }

    #[test]
    fn navigation_messages() {
        assert_eq!(NavigationError::NoResultsFound.to_string(), "No results found");
        assert_eq!(
            NavigationError::SearchFailed("offline".to_string()).to_string(),
            "Search failed: offline"
        );
        assert_eq!(
            NavigationError::RouteFailed("HTTP 500".to_string()).to_string(),
            "Route failed: HTTP 500"
        );
        assert_eq!(NavigationError::NoRouteFound.to_string(), "No route found");
    }
}
