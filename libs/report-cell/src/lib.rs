pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{ReportError, ReportRow};
pub use router::report_routes;
pub use services::{render_appointments_pdf, ReportService};
