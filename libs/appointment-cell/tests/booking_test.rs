use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::Barrier;

use appointment_cell::models::BookAppointmentForm;
use appointment_cell::{Appointment, AppointmentError, AppointmentStatus, AppointmentStore, BookingRequest, BookingService, Slot};
use shared_database::DbError;
use shared_utils::test_utils::TestPatient;

/// In-memory appointments table with the slot unique constraint enforced on
/// insert. An optional barrier holds every caller between the count and the
/// insert so concurrent bookings all pass the pre-check.
#[derive(Default)]
struct MemoryStore {
    rows: Mutex<Vec<Appointment>>,
    next_id: AtomicI64,
    gate: Option<Arc<Barrier>>,
}

impl MemoryStore {
    fn gated(parties: usize) -> Self {
        Self {
            gate: Some(Arc::new(Barrier::new(parties))),
            ..Self::default()
        }
    }

    fn snapshot(&self) -> Vec<Appointment> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn count_slot_bookings(&self, slot: &Slot) -> Result<usize, DbError> {
        let count = self.rows.lock().unwrap().iter().filter(|a| a.slot() == *slot).count();
        if let Some(gate) = &self.gate {
            gate.wait().await;
        }
        Ok(count)
    }

    async fn insert_pending(&self, request: &BookingRequest) -> Result<Appointment, DbError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|a| a.slot() == request.slot) {
            return Err(DbError::UniqueViolation("appointments_slot_key".to_string()));
        }

        let appointment = Appointment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            patient_id: request.patient_id,
            doctor_id: request.slot.doctor_id,
            appointment_date: request.slot.date,
            appointment_time: request.slot.time,
            status: AppointmentStatus::Pending,
            reason: request.reason.clone(),
        };
        rows.push(appointment.clone());
        Ok(appointment)
    }
}

/// Store whose every call fails, as when the database is unreachable.
struct BrokenStore;

#[async_trait]
impl AppointmentStore for BrokenStore {
    async fn count_slot_bookings(&self, _slot: &Slot) -> Result<usize, DbError> {
        Err(DbError::Api { status: 503, message: "connection refused".to_string() })
    }

    async fn insert_pending(&self, _request: &BookingRequest) -> Result<Appointment, DbError> {
        Err(DbError::Api { status: 503, message: "connection refused".to_string() })
    }
}

fn form(doctor: &str, date: &str, time: &str) -> BookAppointmentForm {
    BookAppointmentForm {
        doctor_id: Some(doctor.to_string()),
        appointment_date: Some(date.to_string()),
        appointment_time: Some(time.to_string()),
        reason: None,
    }
}

fn june_first_ten() -> Slot {
    Slot {
        doctor_id: 1,
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_booking_free_slot_creates_one_pending_row() {
    let service = BookingService::new(MemoryStore::default());
    let patient = TestPatient::default().identity();

    let mut request = form("1", "2024-06-01", "10:00");
    request.reason = Some("Annual checkup".to_string());

    let appointment = service.book(&patient, &request).await.unwrap();

    assert_eq!(appointment.patient_id, patient.id);
    assert_eq!(appointment.slot(), june_first_ten());
    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.reason.as_deref(), Some("Annual checkup"));
}

#[tokio::test]
async fn test_second_patient_is_turned_away_from_taken_slot() {
    let service = BookingService::new(MemoryStore::default());

    let first = TestPatient::new(1, "Alice", "alice@example.com").identity();
    let second = TestPatient::new(2, "Bob", "bob@example.com").identity();

    service.book(&first, &form("1", "2024-06-01", "10:00")).await.unwrap();
    let result = service.book(&second, &form("1", "2024-06-01", "10:00")).await;

    assert_matches!(result, Err(AppointmentError::SlotTaken));
}

#[tokio::test]
async fn test_rejection_leaves_table_unchanged() {
    let store = Arc::new(MemoryStore::default());
    let service = BookingService::new(SharedStore(store.clone()));
    let first = TestPatient::new(1, "Alice", "alice@example.com").identity();
    let second = TestPatient::new(2, "Bob", "bob@example.com").identity();

    service.book(&first, &form("1", "2024-06-01", "10:00")).await.unwrap();

    for _ in 0..3 {
        let result = service.book(&second, &form("1", "2024-06-01", "10:00:00")).await;
        assert_matches!(result, Err(AppointmentError::SlotTaken));
    }

    let rows = store.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].patient_id, 1);
}

#[tokio::test]
async fn test_neighbouring_slots_stay_bookable() {
    let store = Arc::new(MemoryStore::default());
    let service = BookingService::new(SharedStore(store.clone()));
    let patient = TestPatient::default().identity();

    service.book(&patient, &form("1", "2024-06-01", "10:00")).await.unwrap();
    service.book(&patient, &form("2", "2024-06-01", "10:00")).await.unwrap();
    service.book(&patient, &form("1", "2024-06-02", "10:00")).await.unwrap();
    service.book(&patient, &form("1", "2024-06-01", "10:30")).await.unwrap();

    assert_eq!(store.snapshot().len(), 4);
}

#[tokio::test]
async fn test_missing_date_is_rejected_before_storage() {
    let store = Arc::new(MemoryStore::default());
    let service = BookingService::new(SharedStore(store.clone()));
    let patient = TestPatient::default().identity();

    let mut request = form("1", "", "10:00");
    request.appointment_date = None;

    let result = service.book(&patient, &request).await;

    assert_matches!(result, Err(AppointmentError::ValidationError(msg)) if msg == "Please select doctor, date and time.");
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn test_concurrent_bookings_yield_exactly_one_success() {
    let store = Arc::new(MemoryStore::gated(2));
    let service = Arc::new(BookingService::new(SharedStore(store.clone())));

    let tasks: Vec<_> = [
        TestPatient::new(1, "Alice", "alice@example.com"),
        TestPatient::new(2, "Bob", "bob@example.com"),
    ]
    .into_iter()
    .map(|patient| {
        let service = service.clone();
        tokio::spawn(async move {
            service.book(&patient.identity(), &form("1", "2024-06-01", "10:00")).await
        })
    })
    .collect();

    let mut booked = 0;
    let mut taken = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => booked += 1,
            Err(AppointmentError::SlotTaken) => taken += 1,
            Err(other) => panic!("unexpected booking error: {other}"),
        }
    }

    assert_eq!(booked, 1);
    assert_eq!(taken, 1);

    let rows = store.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].slot(), june_first_ten());
}

#[tokio::test]
async fn test_store_failure_is_reported_as_database_error() {
    let service = BookingService::new(BrokenStore);
    let patient = TestPatient::default().identity();

    let result = service.book(&patient, &form("1", "2024-06-01", "10:00")).await;

    assert_matches!(result, Err(AppointmentError::DatabaseError(_)));
}

/// Lets a test keep a handle on the table while the service owns the store.
struct SharedStore(Arc<MemoryStore>);

#[async_trait]
impl AppointmentStore for SharedStore {
    async fn count_slot_bookings(&self, slot: &Slot) -> Result<usize, DbError> {
        self.0.count_slot_bookings(slot).await
    }

    async fn insert_pending(&self, request: &BookingRequest) -> Result<Appointment, DbError> {
        self.0.insert_pending(request).await
    }
}
