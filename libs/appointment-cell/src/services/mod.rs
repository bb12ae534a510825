pub mod booking;
pub mod listing;
pub mod store;

pub use booking::BookingService;
pub use listing::AppointmentQueryService;
pub use store::{AppointmentStore, SupabaseAppointmentStore};
