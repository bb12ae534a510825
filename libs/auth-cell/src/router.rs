use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn auth_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/login-register", get(handlers::login_register_page).post(handlers::patient_login))
        .route("/patient-login", get(handlers::login_register_page).post(handlers::patient_login))
        .route("/patient-register", post(handlers::patient_register))
        .route("/logout", get(handlers::logout))
        .route("/admin-login", get(handlers::admin_login_page).post(handlers::admin_login))
        .route("/admin-logout", get(handlers::admin_logout))
        .with_state(state)
}
