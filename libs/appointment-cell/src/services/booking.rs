// libs/appointment-cell/src/services/booking.rs
use tracing::{info, warn, error};

use shared_config::AppConfig;
use shared_database::DbError;
use shared_models::auth::PatientIdentity;

use crate::models::{Appointment, AppointmentError, BookAppointmentForm};
use crate::services::store::{AppointmentStore, SupabaseAppointmentStore};

/// Books appointments with an optimistic availability check followed by an
/// insert that the store's `(doctor_id, appointment_date, appointment_time)`
/// unique constraint arbitrates.
pub struct BookingService<S = SupabaseAppointmentStore> {
    store: S,
}

impl BookingService<SupabaseAppointmentStore> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(SupabaseAppointmentStore::new(config))
    }
}

impl<S: AppointmentStore> BookingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn book(
        &self,
        patient: &PatientIdentity,
        form: &BookAppointmentForm,
    ) -> Result<Appointment, AppointmentError> {
        let request = form.validate(patient.id)?;
        let slot = request.slot;

        // **Step 1: Pre-check** - rejects the common case with a friendly message
        let existing = self.store
            .count_slot_bookings(&slot)
            .await
            .map_err(|e| {
                error!("Error checking availability of {}: {}", slot, e);
                AppointmentError::DatabaseError(e.to_string())
            })?;

        if existing > 0 {
            warn!("Patient {} requested booked slot: {}", patient.id, slot);
            return Err(AppointmentError::SlotTaken);
        }

        // **Step 2: Insert** - the unique constraint has the final word
        match self.store.insert_pending(&request).await {
            Ok(appointment) => {
                info!(
                    "Appointment {} booked for patient {}: {} ({})",
                    appointment.id, patient.id, appointment.slot(), appointment.status
                );
                Ok(appointment)
            }
            Err(DbError::UniqueViolation(_)) => {
                warn!("Slot was taken concurrently: {}", slot);
                Err(AppointmentError::SlotTaken)
            }
            Err(e) => {
                error!("Error inserting appointment for {}: {}", slot, e);
                Err(AppointmentError::DatabaseError(e.to_string()))
            }
        }
    }
}
