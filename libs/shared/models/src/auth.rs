use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const PATIENT_LOGIN_PATH: &str = "/login-register";
pub const ADMIN_LOGIN_PATH: &str = "/admin-login";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionHeader {
    pub alg: String,
    pub typ: String,
}

/// The authenticated patient carried by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientIdentity {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Who is making the current request. Built per request from the session
/// cookie and handed to every handler as an extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub patient: Option<PatientIdentity>,
    #[serde(default)]
    pub admin: bool,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_patient(patient: PatientIdentity) -> Self {
        Self { patient: Some(patient), admin: false }
    }

    pub fn for_admin() -> Self {
        Self { patient: None, admin: true }
    }

    pub fn is_anonymous(&self) -> bool {
        self.patient.is_none() && !self.admin
    }

    pub fn require_patient(&self) -> Result<&PatientIdentity, AppError> {
        self.patient
            .as_ref()
            .ok_or_else(|| AppError::LoginRequired(PATIENT_LOGIN_PATH.to_string()))
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.admin {
            Ok(())
        } else {
            Err(AppError::LoginRequired(ADMIN_LOGIN_PATH.to_string()))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub context: AuthContext,
    pub iat: i64,
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn patient() -> PatientIdentity {
        PatientIdentity { id: 3, name: "Ana".to_string(), email: "ana@example.com".to_string() }
    }

    #[test]
    fn test_anonymous_is_redirected_to_patient_login() {
        let auth = AuthContext::anonymous();
        assert!(auth.is_anonymous());
        assert_matches!(auth.require_patient(), Err(AppError::LoginRequired(path)) if path == "/login-register");
    }

    #[test]
    fn test_admin_is_not_a_patient() {
        let auth = AuthContext::for_admin();
        assert!(auth.require_admin().is_ok());
        assert!(auth.require_patient().is_err());
    }

    #[test]
    fn test_patient_is_redirected_to_admin_login() {
        let auth = AuthContext::for_patient(patient());
        assert_eq!(auth.require_patient().unwrap().id, 3);
        assert_matches!(auth.require_admin(), Err(AppError::LoginRequired(path)) if path == "/admin-login");
    }

    #[test]
    fn test_claims_flatten_context() {
        let claims = SessionClaims { context: AuthContext::for_patient(patient()), iat: 1, exp: 2 };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["patient"]["id"], 3);
        assert_eq!(value["admin"], false);
        assert_eq!(value["exp"], 2);
    }
}
