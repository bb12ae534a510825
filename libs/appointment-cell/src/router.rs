// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    let patient_routes = Router::new()
        .route("/book-appointment", get(handlers::book_appointment_page).post(handlers::book_appointment))
        .route("/my-appointments", get(handlers::my_appointments));

    let admin_routes = Router::new()
        .route("/admin-dashboard", get(handlers::admin_dashboard))
        .route("/delete-appointment/{appointment_id}", get(handlers::delete_appointment))
        .route("/view-appointments", get(handlers::view_appointments));

    Router::new()
        .merge(patient_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
