use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method,
};
use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::SupabaseClient;
use shared_utils::form::{non_empty, validate_phone};

use crate::models::{Patient, PatientError};

const PATIENT_COLUMNS: &str = "id,name,email,phone,created_at";

pub struct PatientService {
    supabase: SupabaseClient,
}

impl PatientService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn get_patient(&self, patient_id: i64) -> Result<Patient, PatientError> {
        debug!("Fetching patient profile: {}", patient_id);

        let path = format!("/rest/v1/patients?select={}&id=eq.{}", PATIENT_COLUMNS, patient_id);
        let mut result: Vec<Patient> = self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        result.pop().ok_or(PatientError::NotFound)
    }

    /// Replace the patient's phone number. A blank value clears it.
    pub async fn update_phone(&self, patient_id: i64, phone: Option<&str>) -> Result<Patient, PatientError> {
        let phone = non_empty(phone);
        if let Some(number) = phone {
            if !validate_phone(number) {
                return Err(PatientError::ValidationError("Invalid phone number".to_string()));
            }
        }

        debug!("Updating phone for patient: {}", patient_id);

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let path = format!("/rest/v1/patients?select={}&id=eq.{}", PATIENT_COLUMNS, patient_id);
        let mut result: Vec<Patient> = self.supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(json!({ "phone": phone })),
                Some(headers),
            )
            .await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        let updated = result.pop().ok_or(PatientError::NotFound)?;
        info!("Phone updated for patient {}", patient_id);
        Ok(updated)
    }
}
