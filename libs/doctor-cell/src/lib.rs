pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{BookableDoctor, Doctor, DoctorError, NewDoctor};
pub use router::doctor_routes;
pub use services::DoctorService;
