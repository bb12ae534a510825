use tracing::{info, warn};

use shared_config::AppConfig;

use crate::models::AuthError;
use crate::services::credentials::{Argon2Credentials, CredentialVerifier};

/// Checks the single configured administrator account.
pub struct AdminAuthenticator {
    email: String,
    password_hash: Option<String>,
    verifier: Box<dyn CredentialVerifier>,
}

impl AdminAuthenticator {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_verifier(config, Box::new(Argon2Credentials))
    }

    pub fn with_verifier(config: &AppConfig, verifier: Box<dyn CredentialVerifier>) -> Self {
        Self {
            email: config.admin_email.clone(),
            password_hash: config.admin_password_hash.clone(),
            verifier,
        }
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let Some(hash) = self.password_hash.as_deref() else {
            warn!("Admin login attempted while admin login is disabled");
            return Err(AuthError::InvalidCredentials);
        };

        // Verify even on an email mismatch so both failures cost the same.
        let password_ok = self.verifier.verify_password(password, hash)?;
        let email_ok = email.trim().eq_ignore_ascii_case(&self.email);

        if password_ok && email_ok {
            info!("Admin logged in");
            Ok(())
        } else {
            warn!("Rejected admin login attempt");
            Err(AuthError::InvalidCredentials)
        }
    }
}
