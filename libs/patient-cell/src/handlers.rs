use std::sync::Arc;
use axum::{
    extract::{Extension, State},
    Form, Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::AuthContext;
use shared_models::error::AppError;

use crate::models::UpdatePhoneForm;
use crate::services::PatientService;

pub async fn dashboard(
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    let patient = auth.require_patient()?;

    Ok(Json(json!({
        "view": "dashboard",
        "name": patient.name,
    })))
}

pub async fn profile(
    State(config): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    let patient_id = auth.require_patient()?.id;

    let patient = PatientService::new(&config)
        .get_patient(patient_id)
        .await?;

    Ok(Json(json!({
        "view": "profile",
        "patient": patient,
    })))
}

pub async fn update_phone_page(
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    auth.require_patient()?;
    Ok(Json(json!({ "view": "update-phone" })))
}

pub async fn update_phone(
    State(config): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthContext>,
    Form(form): Form<UpdatePhoneForm>,
) -> Result<Json<Value>, AppError> {
    let patient_id = auth.require_patient()?.id;

    let patient = PatientService::new(&config)
        .update_phone(patient_id, form.phone.as_deref())
        .await?;

    Ok(Json(json!({
        "view": "success",
        "title": "Phone Updated",
        "message": "Phone number updated successfully!",
        "redirect": "/dashboard",
        "phone": patient.phone,
    })))
}
