use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::extract::Form;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::AuthContext;
use shared_models::error::AppError;

use crate::models::AddDoctorForm;
use crate::services::DoctorService;

pub async fn add_doctor_page(
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    auth.require_admin()?;
    Ok(Json(json!({ "view": "add-doctor" })))
}

pub async fn add_doctor(
    State(config): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthContext>,
    Form(form): Form<AddDoctorForm>,
) -> Result<Json<Value>, AppError> {
    auth.require_admin()?;

    let new_doctor = form.validate()?;
    let doctor = DoctorService::new(&config)
        .create_doctor(new_doctor)
        .await?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor,
        "message": "Doctor added successfully!",
        "redirect": "/add-doctor",
    })))
}
