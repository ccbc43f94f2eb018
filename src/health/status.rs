// src/health/status.rs
pub const HEALTHY: &str = "healthy";
pub const UNHEALTHY: &str = "unhealthy";

/// Outcome of a single probe. Lives only for the request that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub healthy: bool,
    pub message: String,
}

impl ProbeResult {
    /// Downstream answered 200.
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            message: HEALTHY.to_string(),
        }
    }

    /// Downstream answered with anything other than 200.
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            message: UNHEALTHY.to_string(),
        }
    }

    /// The request never completed: transport error or deadline.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            message: error.into(),
        }
    }
}
