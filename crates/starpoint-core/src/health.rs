//! Health reporting for Starpoint hosts and embedding providers.
//!
//! Starpoint hosts answer `GET /` with a fixed greeting. Anything else means
//! the host is reachable but may be unable to serve requests.

use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Body a healthy Starpoint host returns from its root path.
pub const HEALTH_CHECK_MESSAGE: &str = "hello.";

/// Represents the operational status of a service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    /// Service is operating normally
    #[default]
    Healthy,
    /// Service answered, but not with the expected greeting
    Degraded,
    /// Service is not operational
    Unhealthy,
}

/// Health information for a service.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Current service status
    pub status: ServiceStatus,
    /// Response time for the health check
    pub response: Option<Duration>,
    /// Optional message describing the current state
    pub message: Option<String>,
    /// Timestamp when the health check was performed
    pub checked_at: Timestamp,
}

impl ServiceHealth {
    /// Creates a new healthy service health report.
    pub fn healthy() -> Self {
        Self {
            status: ServiceStatus::Healthy,
            checked_at: Timestamp::now(),
            ..Default::default()
        }
    }

    /// Creates a new degraded service health report.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            status: ServiceStatus::Degraded,
            message: Some(message.into()),
            checked_at: Timestamp::now(),
            ..Default::default()
        }
    }

    /// Creates a new unhealthy service health report.
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: ServiceStatus::Unhealthy,
            message: Some(message.into()),
            checked_at: Timestamp::now(),
            ..Default::default()
        }
    }

    /// Classifies the body returned by a host's root path.
    pub fn from_greeting(body: &str) -> Self {
        if body == HEALTH_CHECK_MESSAGE {
            Self::healthy()
        } else {
            Self::degraded(format!(
                "host returned {body:?} instead of {HEALTH_CHECK_MESSAGE:?}"
            ))
        }
    }

    /// Sets the response time for this health check.
    pub fn with_response_time(mut self, response_time: Duration) -> Self {
        self.response = Some(response_time);
        self
    }

    /// Returns `true` unless the service is unhealthy.
    pub fn is_available(&self) -> bool {
        self.status != ServiceStatus::Unhealthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_greeting() {
        assert_eq!(
            ServiceHealth::from_greeting("hello.").status,
            ServiceStatus::Healthy
        );

        let degraded = ServiceHealth::from_greeting("unhealthy message");
        assert_eq!(degraded.status, ServiceStatus::Degraded);
        assert!(degraded.message.unwrap().contains("unhealthy message"));
        assert!(ServiceHealth::from_greeting("x").is_available());
    }

    #[test]
    fn test_unhealthy() {
        let health = ServiceHealth::unhealthy("down").with_response_time(Duration::from_millis(5));
        assert!(!health.is_available());
        assert_eq!(health.response, Some(Duration::from_millis(5)));
    }
}
