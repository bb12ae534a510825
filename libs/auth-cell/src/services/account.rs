use reqwest::Method;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::{DbError, SupabaseClient};
use shared_models::auth::PatientIdentity;
use shared_utils::form::{non_empty, validate_email};

use crate::models::{AuthError, LoginForm, NewPatientRow, PatientCredentialRow, RegisterForm};
use crate::services::credentials::{Argon2Credentials, CredentialVerifier};

pub struct AccountService {
    supabase: SupabaseClient,
    verifier: Box<dyn CredentialVerifier>,
}

impl AccountService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_verifier(config, Box::new(Argon2Credentials))
    }

    pub fn with_verifier(config: &AppConfig, verifier: Box<dyn CredentialVerifier>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            verifier,
        }
    }

    /// Create a patient account. The store's unique index on `email` is what
    /// rejects a second registration.
    pub async fn register(&self, form: RegisterForm) -> Result<PatientIdentity, AuthError> {
        let name = non_empty(form.name.as_deref()).ok_or(AuthError::MissingField("name"))?;
        let email = non_empty(form.email.as_deref()).ok_or(AuthError::MissingField("email"))?;
        let password = form.password.as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::MissingField("password"))?;

        if !validate_email(email) {
            return Err(AuthError::InvalidEmail);
        }

        debug!("Registering patient account for: {}", email);

        let row = NewPatientRow {
            name: name.to_string(),
            email: email.to_lowercase(),
            password_hash: self.verifier.hash_password(password)?,
        };
        let row = serde_json::to_value(&row).map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let created: PatientCredentialRow = self.supabase
            .insert_returning("patients", row)
            .await
            .map_err(|e| match e {
                DbError::UniqueViolation(_) => {
                    warn!("Registration rejected, email already registered: {}", email);
                    AuthError::EmailAlreadyRegistered
                }
                other => AuthError::DatabaseError(other.to_string()),
            })?;

        info!("Patient {} registered", created.id);
        Ok(created.into())
    }

    pub async fn authenticate(&self, form: LoginForm) -> Result<PatientIdentity, AuthError> {
        let email = non_empty(form.email.as_deref()).ok_or(AuthError::MissingField("email and password"))?;
        let password = form.password.as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::MissingField("email and password"))?;

        let path = format!(
            "/rest/v1/patients?select=id,name,email,password_hash&email=eq.{}",
            urlencoding::encode(&email.to_lowercase())
        );
        let mut rows: Vec<PatientCredentialRow> = self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let Some(row) = rows.pop() else {
            warn!("Login failed, unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verifier.verify_password(password, &row.password_hash)? {
            warn!("Login failed for patient {}", row.id);
            return Err(AuthError::InvalidCredentials);
        }

        info!("Patient {} logged in", row.id);
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_patient_row_never_carries_plaintext() {
        let row = NewPatientRow {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password_hash: Argon2Credentials.hash_password("pw").unwrap(),
        };
        let value = json!(row);
        assert!(value.get("password").is_none());
        assert!(value["password_hash"].as_str().unwrap().starts_with("$argon2"));
    }
}
