// libs/report-cell/src/services/report.rs
use tracing::{debug, error};

use appointment_cell::models::AppointmentScope;
use appointment_cell::AppointmentQueryService;
use shared_config::AppConfig;

use crate::models::{ReportError, ReportRow};

/// Collects report rows for a scope, newest appointment first.
pub struct ReportService {
    appointments: AppointmentQueryService,
}

impl ReportService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            appointments: AppointmentQueryService::new(config),
        }
    }

    pub async fn collect_rows(&self, scope: AppointmentScope) -> Result<Vec<ReportRow>, ReportError> {
        debug!("Collecting report rows for {:?}", scope);

        let records = self.appointments
            .list_detailed(scope)
            .await
            .map_err(|e| {
                error!("Error fetching appointments for report: {}", e);
                ReportError::DatabaseError(e.to_string())
            })?;

        Ok(records.into_iter().map(ReportRow::from).collect())
    }
}
