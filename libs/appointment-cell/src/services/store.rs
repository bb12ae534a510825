// libs/appointment-cell/src/services/store.rs
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{DbError, SupabaseClient};

use crate::models::{Appointment, AppointmentStatus, BookingRequest, Slot};

/// Storage operations the booking path depends on.
///
/// `insert_pending` must fail with [`DbError::UniqueViolation`] when the slot
/// is already occupied; that constraint, not `count_slot_bookings`, is what
/// keeps a slot from being booked twice.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn count_slot_bookings(&self, slot: &Slot) -> Result<usize, DbError>;

    async fn insert_pending(&self, request: &BookingRequest) -> Result<Appointment, DbError>;
}

pub struct SupabaseAppointmentStore {
    supabase: SupabaseClient,
}

impl SupabaseAppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

fn slot_filter(slot: &Slot) -> String {
    format!(
        "doctor_id=eq.{}&appointment_date=eq.{}&appointment_time=eq.{}",
        slot.doctor_id,
        slot.date.format("%Y-%m-%d"),
        slot.time.format("%H:%M:%S"),
    )
}

#[async_trait]
impl AppointmentStore for SupabaseAppointmentStore {
    async fn count_slot_bookings(&self, slot: &Slot) -> Result<usize, DbError> {
        let path = format!("/rest/v1/appointments?select=id&{}", slot_filter(slot));
        debug!("Checking availability of {}", slot);

        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.len())
    }

    async fn insert_pending(&self, request: &BookingRequest) -> Result<Appointment, DbError> {
        let row = json!({
            "patient_id": request.patient_id,
            "doctor_id": request.slot.doctor_id,
            "appointment_date": request.slot.date.format("%Y-%m-%d").to_string(),
            "appointment_time": request.slot.time.format("%H:%M:%S").to_string(),
            "status": AppointmentStatus::Pending,
            "reason": request.reason,
        });

        self.supabase.insert_returning("appointments", row).await
    }
}
