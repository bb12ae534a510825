// libs/report-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tracing::info;

use appointment_cell::models::AppointmentScope;
use shared_config::AppConfig;
use shared_models::auth::{AuthContext, PATIENT_LOGIN_PATH};
use shared_models::error::AppError;

use crate::services::{render_appointments_pdf, ReportService};

/// Streams the appointments report as a PDF attachment.
///
/// A patient gets their own appointments and an admin gets all of them. When
/// there is nothing to print the caller is sent back to their dashboard.
pub async fn export_appointments(
    State(state): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, AppError> {
    let (scope, dashboard) = match (&auth.patient, auth.admin) {
        (Some(patient), _) => (AppointmentScope::Patient(patient.id), "/dashboard"),
        (None, true) => (AppointmentScope::All, "/admin-dashboard"),
        (None, false) => return Err(AppError::LoginRequired(PATIENT_LOGIN_PATH.to_string())),
    };

    let rows = ReportService::new(&state).collect_rows(scope).await?;
    if rows.is_empty() {
        info!("No appointments to export for {:?}", scope);
        return Ok(Redirect::to(dashboard).into_response());
    }

    let pdf = render_appointments_pdf(&rows, Utc::now())?;
    info!("Exported {} appointments ({} bytes)", rows.len(), pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=appointments.pdf"),
        ],
        pdf,
    )
        .into_response())
}
