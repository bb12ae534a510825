use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    Json,
};
use serde_json::{json, Value};

use appointment_cell::appointment_routes;
use auth_cell::auth_routes;
use doctor_cell::doctor_routes;
use patient_cell::patient_routes;
use report_cell::report_routes;
use shared_config::AppConfig;

async fn home() -> Json<Value> {
    Json(json!({
        "view": "home",
        "message": "HealthCare Clinic appointment booking is running",
        "links": {
            "patient": "/login-register",
            "admin": "/admin-login"
        }
    }))
}

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(home))
        .merge(auth_routes(state.clone()))
        .merge(patient_routes(state.clone()))
        .merge(doctor_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(report_routes(state))
}
