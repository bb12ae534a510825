pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Appointment, AppointmentError, AppointmentStatus, BookingRequest, Slot};
pub use router::appointment_routes;
pub use services::{AppointmentQueryService, AppointmentStore, BookingService, SupabaseAppointmentStore};
