use crate::models::HealthStatus;

/// Liveness check. Reports that the process is serving requests, nothing
/// about the store.
pub struct CheckHealth;

impl CheckHealth {
    pub fn execute(&self) -> HealthStatus {
        HealthStatus { status: "ok" }
    }
}
