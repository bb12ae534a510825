use std::sync::Arc;
use axum::{middleware, routing::get, Router};
use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers::*;

pub fn patient_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/profile", get(profile))
        .route("/update-phone", get(update_phone_page).post(update_phone))
        .layer(middleware::from_fn_with_state(config.clone(), session_middleware))
        .with_state(config)
}
