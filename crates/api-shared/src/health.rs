use crate::dto::HealthRes;

/// Simple health service shared by the REST API and the main binary
///
/// This service provides a standardised way to check that the MedForm service is up.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "MedForm is alive".into(),
        }
    }
}
