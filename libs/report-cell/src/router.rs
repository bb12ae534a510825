use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::session_middleware;

use crate::handlers;

pub fn report_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/export-appointments", get(handlers::export_appointments))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
