use crate::wire::HealthRes;
use daytracker_core::BackendKind;

/// Health check shared by every API surface.
///
/// Besides liveness, the response names the storage backend so operators can tell when the
/// service is running on the non-durable in-memory fallback.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Builds the health response for a service running on `backend`.
    pub fn check_health(backend: BackendKind) -> HealthRes {
        let message = if backend.is_durable() {
            "DayTracker is alive".to_string()
        } else {
            "DayTracker is alive; entries are held in memory and will not survive a restart"
                .to_string()
        };

        HealthRes {
            ok: true,
            message,
            backend: backend.to_string(),
            durable: backend.is_durable(),
        }
    }
}
