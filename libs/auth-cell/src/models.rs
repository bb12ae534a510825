use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::auth::PatientIdentity;
use shared_models::error::AppError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRegisterQuery {
    pub registered: Option<String>,
}

impl LoginRegisterQuery {
    pub fn show_registered_message(&self) -> bool {
        matches!(self.registered.as_deref(), Some("1") | Some("true"))
    }
}

/// Row shape used only for credential checks; never leaves this cell.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientCredentialRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl From<PatientCredentialRow> for PatientIdentity {
    fn from(row: PatientCredentialRow) -> Self {
        PatientIdentity { id: row.id, name: row.name, email: row.email }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatientRow {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please provide {0}")]
    MissingField(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Session could not be issued: {0}")]
    Session(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingField(_) | AuthError::InvalidEmail => AppError::ValidationError(err.to_string()),
            AuthError::InvalidCredentials => AppError::Auth(err.to_string()),
            AuthError::EmailAlreadyRegistered => AppError::Conflict(err.to_string()),
            AuthError::Session(_) | AuthError::PasswordHash(_) => AppError::Internal(err.to_string()),
            AuthError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}
