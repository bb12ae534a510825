pub mod pdf;
pub mod report;

pub use pdf::render_appointments_pdf;
pub use report::ReportService;
