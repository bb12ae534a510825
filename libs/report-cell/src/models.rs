use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use appointment_cell::models::AppointmentRecord;
use shared_models::error::AppError;

/// One appointment as printed in the exported report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub patient_name: String,
    pub patient_email: String,
    pub doctor_name: String,
    pub specialization: Option<String>,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
}

impl ReportRow {
    /// The five text lines printed for this row, numbered from 1.
    pub fn lines(&self, position: usize) -> [String; 5] {
        [
            format!("{}. Patient: {} ({})", position, self.patient_name, self.patient_email),
            format!("   Doctor: {}", self.doctor_name),
            format!("   Specialization: {}", self.specialization.as_deref().unwrap_or("N/A")),
            format!("   Date: {}", self.appointment_date.format("%a %b %d %Y")),
            format!("   Time: {}", self.appointment_time.format("%H:%M:%S")),
        ]
    }
}

impl From<AppointmentRecord> for ReportRow {
    fn from(record: AppointmentRecord) -> Self {
        let (patient_name, patient_email) = record
            .patient
            .map(|p| (p.name, p.email))
            .unwrap_or_default();
        let (doctor_name, specialization) = record
            .doctor
            .map(|d| (d.name, d.specialization))
            .unwrap_or_default();

        Self {
            patient_name,
            patient_email,
            doctor_name,
            specialization: specialization.filter(|s| !s.trim().is_empty()),
            appointment_date: record.appointment.appointment_date,
            appointment_time: record.appointment.appointment_time,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Render(msg) => AppError::Internal(msg),
            ReportError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}
