// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    response::Redirect,
    Form, Json,
};
use serde_json::{json, Value};

use doctor_cell::DoctorService;
use shared_config::AppConfig;
use shared_models::auth::AuthContext;
use shared_models::error::AppError;

use crate::models::{AppointmentScope, AppointmentView, BookAppointmentForm};
use crate::services::{AppointmentQueryService, BookingService};

// ==============================================================================
// PATIENT HANDLERS
// ==============================================================================

pub async fn book_appointment_page(
    State(state): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    auth.require_patient()?;

    let doctors = DoctorService::new(&state).list_bookable_doctors().await?;

    Ok(Json(json!({
        "view": "book-appointment",
        "doctors": doctors,
    })))
}

pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthContext>,
    Form(form): Form<BookAppointmentForm>,
) -> Result<Json<Value>, AppError> {
    let patient = auth.require_patient()?;

    let appointment = BookingService::from_config(&state)
        .book(patient, &form)
        .await?;

    Ok(Json(json!({
        "view": "success",
        "success": true,
        "title": "Appointment Booked",
        "message": "Your appointment request was submitted. Admin will confirm it soon.",
        "redirect": "/my-appointments",
        "appointment": appointment,
    })))
}

pub async fn my_appointments(
    State(state): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    let patient_id = auth.require_patient()?.id;

    let appointments: Vec<AppointmentView> = AppointmentQueryService::new(&state)
        .list_for_patient(patient_id)
        .await?
        .into_iter()
        .map(AppointmentView::from)
        .collect();

    Ok(Json(json!({
        "view": "my-appointments",
        "appointments": appointments,
    })))
}

// ==============================================================================
// ADMIN HANDLERS
// ==============================================================================

pub async fn admin_dashboard(
    State(state): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    auth.require_admin()?;

    let appointments: Vec<AppointmentView> = AppointmentQueryService::new(&state)
        .list_for_admin_dashboard()
        .await?
        .into_iter()
        .map(AppointmentView::from)
        .collect();

    Ok(Json(json!({
        "view": "admin-dashboard",
        "appointments": appointments,
    })))
}

pub async fn delete_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthContext>,
    Path(appointment_id): Path<i64>,
) -> Result<Redirect, AppError> {
    auth.require_admin()?;

    AppointmentQueryService::new(&state)
        .delete(appointment_id)
        .await?;

    Ok(Redirect::to("/admin-dashboard"))
}

pub async fn view_appointments(
    State(state): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    auth.require_admin()?;

    let appointments: Vec<AppointmentView> = AppointmentQueryService::new(&state)
        .list_detailed(AppointmentScope::All)
        .await?
        .into_iter()
        .map(AppointmentView::from)
        .collect();

    Ok(Json(json!({
        "view": "view-appointments",
        "appointments": appointments,
    })))
}
