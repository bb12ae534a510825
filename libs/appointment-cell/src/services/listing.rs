// libs/appointment-cell/src/services/listing.rs
use reqwest::Method;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::{AppointmentError, AppointmentRecord, AppointmentScope};

const NEWEST_FIRST: &str = "order=appointment_date.desc,appointment_time.desc";

/// Read and delete operations over stored appointments.
pub struct AppointmentQueryService {
    supabase: SupabaseClient,
}

impl AppointmentQueryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    async fn fetch(&self, path: &str) -> Result<Vec<AppointmentRecord>, AppointmentError> {
        self.supabase
            .request(Method::GET, path, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    /// A patient's own appointments, newest first.
    pub async fn list_for_patient(&self, patient_id: i64) -> Result<Vec<AppointmentRecord>, AppointmentError> {
        debug!("Fetching appointments for patient {}", patient_id);

        let path = format!(
            "/rest/v1/appointments?select=*,doctor:doctors(name,specialization)&patient_id=eq.{}&{}",
            patient_id, NEWEST_FIRST
        );
        self.fetch(&path).await
    }

    /// Every appointment in booking order, for the admin dashboard.
    pub async fn list_for_admin_dashboard(&self) -> Result<Vec<AppointmentRecord>, AppointmentError> {
        let path = "/rest/v1/appointments?select=*,patient:patients(name,email),doctor:doctors(name)&order=id.asc";
        self.fetch(path).await
    }

    /// Appointments with full doctor and patient details, newest first.
    pub async fn list_detailed(&self, scope: AppointmentScope) -> Result<Vec<AppointmentRecord>, AppointmentError> {
        let filter = match scope {
            AppointmentScope::All => String::new(),
            AppointmentScope::Patient(patient_id) => format!("&patient_id=eq.{}", patient_id),
        };

        let path = format!(
            "/rest/v1/appointments?select=*,doctor:doctors(name,specialization),patient:patients(name,email,phone){}&{}",
            filter, NEWEST_FIRST
        );
        self.fetch(&path).await
    }

    /// Deleting an id that does not exist is not an error.
    pub async fn delete(&self, appointment_id: i64) -> Result<(), AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        self.supabase
            .execute(Method::DELETE, &path, None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        info!("Appointment {} deleted", appointment_id);
        Ok(())
    }
}
