// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

use shared_models::error::AppError;
use shared_utils::form::{non_empty, parse_calendar_date, parse_time_of_day};

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
}

impl Appointment {
    pub fn slot(&self) -> Slot {
        Slot {
            doctor_id: self.doctor_id,
            date: self.appointment_date,
            time: self.appointment_time,
        }
    }
}

/// Stored as the Postgres enum `appointment_status`. Only `Pending` is ever
/// written by this service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "Pending"),
            AppointmentStatus::Confirmed => write!(f, "Confirmed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// One bookable opportunity. At most one appointment may exist per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doctor {} on {} at {}", self.doctor_id, self.date, self.time.format("%H:%M"))
    }
}

/// 12-hour clock rendering used by the listing views, e.g. `9:05 AM`.
pub fn display_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

// ==============================================================================
// BOOKING REQUEST MODELS
// ==============================================================================

/// Raw booking form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookAppointmentForm {
    pub doctor_id: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub reason: Option<String>,
}

/// A validated booking request for an authenticated patient.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub patient_id: i64,
    pub slot: Slot,
    pub reason: Option<String>,
}

impl BookAppointmentForm {
    pub fn validate(&self, patient_id: i64) -> Result<BookingRequest, AppointmentError> {
        let (Some(doctor_id), Some(date), Some(time)) = (
            non_empty(self.doctor_id.as_deref()),
            non_empty(self.appointment_date.as_deref()),
            non_empty(self.appointment_time.as_deref()),
        ) else {
            return Err(AppointmentError::ValidationError(
                "Please select doctor, date and time.".to_string(),
            ));
        };

        let doctor_id = doctor_id
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppointmentError::ValidationError("Invalid doctor selected".to_string()))?;
        let date = parse_calendar_date(date)
            .ok_or_else(|| AppointmentError::ValidationError("Invalid appointment date".to_string()))?;
        let time = parse_time_of_day(time)
            .ok_or_else(|| AppointmentError::ValidationError("Invalid appointment time".to_string()))?;

        Ok(BookingRequest {
            patient_id,
            slot: Slot { doctor_id, date, time },
            reason: non_empty(self.reason.as_deref()).map(str::to_string),
        })
    }
}

// ==============================================================================
// LISTING MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorRef {
    pub name: String,
    #[serde(default)]
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientRef {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// An appointment row with its embedded doctor and patient, as returned by
/// PostgREST resource embedding.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRecord {
    #[serde(flatten)]
    pub appointment: Appointment,
    #[serde(default)]
    pub doctor: Option<DoctorRef>,
    #[serde(default)]
    pub patient: Option<PatientRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    pub id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub time_display: String,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub doctor_name: Option<String>,
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_phone: Option<String>,
}

impl From<AppointmentRecord> for AppointmentView {
    fn from(record: AppointmentRecord) -> Self {
        let AppointmentRecord { appointment, doctor, patient } = record;
        let (doctor_name, specialization) = match doctor {
            Some(d) => (Some(d.name), d.specialization),
            None => (None, None),
        };
        let (patient_name, patient_email, patient_phone) = match patient {
            Some(p) => (Some(p.name), Some(p.email), p.phone),
            None => (None, None, None),
        };

        Self {
            id: appointment.id,
            appointment_date: appointment.appointment_date,
            appointment_time: appointment.appointment_time,
            time_display: display_time(appointment.appointment_time),
            status: appointment.status,
            reason: appointment.reason,
            doctor_name,
            specialization,
            patient_name,
            patient_email,
            patient_phone,
        }
    }
}

/// Whose appointments a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentScope {
    All,
    Patient(i64),
}

// ==============================================================================
// ERROR MODELS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Selected slot is already booked. Please choose another time.")]
    SlotTaken,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::SlotTaken => AppError::Conflict(err.to_string()),
            AppointmentError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(doctor: &str, date: &str, time: &str) -> BookAppointmentForm {
        BookAppointmentForm {
            doctor_id: Some(doctor.to_string()),
            appointment_date: Some(date.to_string()),
            appointment_time: Some(time.to_string()),
            reason: None,
        }
    }

    #[test]
    fn test_valid_form_builds_slot() {
        let request = form("1", "2024-06-01", "10:00").validate(9).unwrap();
        assert_eq!(request.patient_id, 9);
        assert_eq!(request.slot.doctor_id, 1);
        assert_eq!(request.slot.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(request.slot.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(request.reason, None);
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let mut missing_date = form("1", "2024-06-01", "10:00");
        missing_date.appointment_date = None;
        assert!(matches!(missing_date.validate(1), Err(AppointmentError::ValidationError(_))));

        let blank_doctor = form(" ", "2024-06-01", "10:00");
        assert!(matches!(blank_doctor.validate(1), Err(AppointmentError::ValidationError(_))));
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        assert!(form("abc", "2024-06-01", "10:00").validate(1).is_err());
        assert!(form("-4", "2024-06-01", "10:00").validate(1).is_err());
        assert!(form("1", "2024-13-01", "10:00").validate(1).is_err());
        assert!(form("1", "2024-06-01", "noon").validate(1).is_err());
    }

    #[test]
    fn test_blank_reason_is_dropped() {
        let mut with_reason = form("1", "2024-06-01", "10:00");
        with_reason.reason = Some("   ".to_string());
        assert_eq!(with_reason.validate(1).unwrap().reason, None);

        with_reason.reason = Some(" Annual check-up ".to_string());
        assert_eq!(with_reason.validate(1).unwrap().reason.as_deref(), Some("Annual check-up"));
    }

    #[test]
    fn test_slot_and_status_render_for_logs() {
        let request = form("4", "2024-06-01", "09:05").validate(1).unwrap();
        let appointment = Appointment {
            id: 9,
            patient_id: 1,
            doctor_id: 4,
            appointment_date: request.slot.date,
            appointment_time: request.slot.time,
            status: AppointmentStatus::default(),
            reason: None,
        };

        assert_eq!(appointment.slot(), request.slot);
        assert_eq!(appointment.slot().to_string(), "doctor 4 on 2024-06-01 at 09:05");
        assert_eq!(appointment.status.to_string(), "Pending");
        assert_eq!(AppointmentStatus::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn test_display_time() {
        assert_eq!(display_time(NaiveTime::from_hms_opt(9, 5, 0).unwrap()), "9:05 AM");
        assert_eq!(display_time(NaiveTime::from_hms_opt(0, 30, 0).unwrap()), "12:30 AM");
        assert_eq!(display_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()), "12:00 PM");
        assert_eq!(display_time(NaiveTime::from_hms_opt(17, 45, 0).unwrap()), "5:45 PM");
    }

    #[test]
    fn test_record_embeds_into_view() {
        let record: AppointmentRecord = serde_json::from_value(serde_json::json!({
            "id": 4,
            "patient_id": 2,
            "doctor_id": 1,
            "appointment_date": "2024-06-01",
            "appointment_time": "14:15:00",
            "status": "Pending",
            "reason": null,
            "doctor": { "name": "Dr. Adams", "specialization": "Dermatology" }
        })).unwrap();

        let view = AppointmentView::from(record);
        assert_eq!(view.doctor_name.as_deref(), Some("Dr. Adams"));
        assert_eq!(view.time_display, "2:15 PM");

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("patient_name").is_none());
        assert_eq!(json["status"], "Pending");
    }
}
