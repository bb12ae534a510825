use reqwest::Method;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::{DbError, SupabaseClient};

use crate::models::{BookableDoctor, Doctor, DoctorError, NewDoctor};

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Doctors offered on the booking form, alphabetically.
    pub async fn list_bookable_doctors(&self) -> Result<Vec<BookableDoctor>, DoctorError> {
        debug!("Fetching bookable doctors");

        let path = "/rest/v1/doctors?select=id,name,specialization,available_from,available_to,available_days&order=name.asc";
        self.supabase
            .request(Method::GET, path, None)
            .await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))
    }

    pub async fn create_doctor(&self, doctor: NewDoctor) -> Result<Doctor, DoctorError> {
        debug!("Creating doctor: {}", doctor.email);

        let row = serde_json::to_value(&doctor)
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        let created: Doctor = self.supabase
            .insert_returning("doctors", row)
            .await
            .map_err(|e| match e {
                DbError::UniqueViolation(_) => {
                    warn!("Doctor with email {} already exists", doctor.email);
                    DoctorError::AlreadyExists
                }
                other => DoctorError::DatabaseError(other.to_string()),
            })?;

        info!("Doctor {} added ({})", created.id, created.specialization);
        Ok(created)
    }
}
