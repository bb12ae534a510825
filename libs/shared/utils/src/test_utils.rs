use std::sync::Arc;
use serde_json::json;

use shared_config::AppConfig;
use shared_models::auth::{AuthContext, PatientIdentity};

pub struct TestConfig {
    pub session_secret: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub admin_email: String,
    pub admin_password_hash: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            session_secret: "test-session-secret-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test-service-key".to_string(),
            admin_email: "admin@clinic.com".to_string(),
            admin_password_hash: None,
        }
    }
}

impl TestConfig {
    /// Point the store at a mock server.
    pub fn with_supabase_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            session_secret: self.session_secret.clone(),
            session_ttl_hours: 1,
            session_cookie_secure: false,
            admin_email: self.admin_email.clone(),
            admin_password_hash: self.admin_password_hash.clone(),
            port: 3006,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestPatient {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl Default for TestPatient {
    fn default() -> Self {
        Self {
            id: 1,
            name: "Test Patient".to_string(),
            email: "patient@example.com".to_string(),
        }
    }
}

impl TestPatient {
    pub fn new(id: i64, name: &str, email: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    pub fn identity(&self) -> PatientIdentity {
        PatientIdentity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn auth_context(&self) -> AuthContext {
        AuthContext::for_patient(self.identity())
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn patient_response(id: i64, email: &str, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "phone": null,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn doctor_response(id: i64, email: &str, name: &str, specialization: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "specialization": specialization,
            "email": email,
            "available_from": "09:00:00",
            "available_to": "17:00:00",
            "available_days": "Monday, Wednesday, Friday"
        })
    }

    pub fn appointment_response(id: i64, patient_id: i64, doctor_id: i64, date: &str, time: &str) -> serde_json::Value {
        json!({
            "id": id,
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "appointment_date": date,
            "appointment_time": time,
            "status": "Pending",
            "reason": null
        })
    }

    pub fn unique_violation(constraint: &str) -> serde_json::Value {
        json!({
            "code": "23505",
            "details": null,
            "hint": null,
            "message": format!("duplicate key value violates unique constraint \"{}\"", constraint)
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "code": code,
            "message": message
        })
    }
}
