use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::{AuthContext, ADMIN_LOGIN_PATH, PATIENT_LOGIN_PATH};
use shared_models::error::AppError;
use shared_utils::form::non_empty;
use shared_utils::session::{cleared_session_cookie, session_cookie};

use crate::models::{AuthError, LoginForm, LoginRegisterQuery, RegisterForm};
use crate::services::{AccountService, AdminAuthenticator};

fn start_session(context: &AuthContext, config: &AppConfig, redirect_to: &str) -> Result<Response, AppError> {
    let cookie = session_cookie(context, config).map_err(AuthError::Session)?;
    Ok(([(SET_COOKIE, cookie)], Redirect::to(redirect_to)).into_response())
}

fn end_session(redirect_to: &str) -> Response {
    ([(SET_COOKIE, cleared_session_cookie())], Redirect::to(redirect_to)).into_response()
}

pub async fn login_register_page(Query(query): Query<LoginRegisterQuery>) -> Json<Value> {
    Json(json!({
        "view": "login-register",
        "show_msg": query.show_registered_message(),
    }))
}

pub async fn patient_login(
    State(config): State<Arc<AppConfig>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let service = AccountService::new(&config);
    let patient = service.authenticate(form).await?;

    start_session(&AuthContext::for_patient(patient), &config, "/dashboard")
}

pub async fn patient_register(
    State(config): State<Arc<AppConfig>>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, AppError> {
    let service = AccountService::new(&config);
    service.register(form).await?;

    Ok(Redirect::to(&format!("{}?registered=1", PATIENT_LOGIN_PATH)))
}

pub async fn logout() -> Response {
    debug!("Patient logout");
    end_session(PATIENT_LOGIN_PATH)
}

pub async fn admin_login_page() -> Json<Value> {
    Json(json!({ "view": "admin-login" }))
}

pub async fn admin_login(
    State(config): State<Arc<AppConfig>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = non_empty(form.email.as_deref()).ok_or(AuthError::MissingField("email and password"))?;
    let password = form.password.as_deref()
        .filter(|p| !p.is_empty())
        .ok_or(AuthError::MissingField("email and password"))?;

    AdminAuthenticator::new(&config).authenticate(email, password)?;

    start_session(&AuthContext::for_admin(), &config, "/admin-dashboard")
}

pub async fn admin_logout() -> Response {
    debug!("Admin logout");
    end_session(ADMIN_LOGIN_PATH)
}
