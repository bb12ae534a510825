use serde::{Deserialize, Serialize};
use chrono::NaiveTime;

use shared_models::error::AppError;
use shared_utils::form::{non_empty, parse_time_of_day, validate_email};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub available_from: NaiveTime,
    pub available_to: NaiveTime,
    pub available_days: Option<String>,
}

/// What a patient sees when choosing a doctor to book with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookableDoctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub available_from: NaiveTime,
    pub available_to: NaiveTime,
    pub available_days: Option<String>,
}

/// Raw add-doctor form. `available_days` arrives as one field per checked box.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddDoctorForm {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub available_from: Option<String>,
    pub available_to: Option<String>,
    #[serde(default)]
    pub available_days: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub available_days: String,
    pub available_from: NaiveTime,
    pub available_to: NaiveTime,
}

impl AddDoctorForm {
    pub fn validate(&self) -> Result<NewDoctor, DoctorError> {
        let required = |value: &Option<String>, field: &str| {
            non_empty(value.as_deref())
                .map(str::to_string)
                .ok_or_else(|| DoctorError::ValidationError(format!("Please provide {}", field)))
        };

        let name = required(&self.name, "name")?;
        let specialization = required(&self.specialization, "specialization")?;
        let email = required(&self.email, "email")?;
        if !validate_email(&email) {
            return Err(DoctorError::ValidationError("Invalid email address".to_string()));
        }

        let time = |value: &Option<String>, field: &str| {
            required(value, field).and_then(|raw| {
                parse_time_of_day(&raw)
                    .ok_or_else(|| DoctorError::ValidationError(format!("Invalid time for {}", field)))
            })
        };
        let available_from = time(&self.available_from, "available from")?;
        let available_to = time(&self.available_to, "available to")?;

        if available_from >= available_to {
            return Err(DoctorError::ValidationError(
                "'Available From' must be earlier than 'Available To'".to_string(),
            ));
        }

        let available_days = self.available_days
            .iter()
            .filter_map(|day| non_empty(Some(day.as_str())))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(NewDoctor {
            name,
            specialization,
            email: email.to_lowercase(),
            available_days,
            available_from,
            available_to,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Doctor already exists")]
    AlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::ValidationError(msg) => AppError::ValidationError(msg),
            DoctorError::AlreadyExists => AppError::Conflict(err.to_string()),
            DoctorError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}
