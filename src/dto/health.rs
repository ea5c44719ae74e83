use serde::Serialize;
use utoipa::ToSchema;

/// Storage reachability as seen by the last ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every store answered.
    Ok,
    /// At least one store did not answer.
    Degraded,
}

/// Body returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall storage state.
    pub status: HealthStatus,
}

impl HealthResponse {
    /// Every store answered its ping.
    pub fn ok() -> Self {
        Self {
            status: HealthStatus::Ok,
        }
    }

    /// At least one store failed its ping.
    pub fn degraded() -> Self {
        Self {
            status: HealthStatus::Degraded,
        }
    }
}
