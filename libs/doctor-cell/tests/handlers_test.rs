use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Extension, State};
use axum_extra::extract::Form;
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_json, method, path, query_param};

use doctor_cell::handlers::{add_doctor, add_doctor_page};
use doctor_cell::models::AddDoctorForm;
use doctor_cell::DoctorService;
use shared_config::AppConfig;
use shared_models::auth::AuthContext;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig, TestPatient};

fn config_for(server: &MockServer) -> Arc<AppConfig> {
    TestConfig::with_supabase_url(&server.uri()).to_arc()
}

fn admin() -> Extension<AuthContext> {
    Extension(AuthContext::for_admin())
}

fn valid_form() -> AddDoctorForm {
    AddDoctorForm {
        name: Some("Dr. Meredith Grey".to_string()),
        specialization: Some("General Surgery".to_string()),
        email: Some("grey@clinic.com".to_string()),
        available_from: Some("09:00".to_string()),
        available_to: Some("17:00".to_string()),
        available_days: vec!["Monday".to_string(), "Wednesday".to_string(), "Friday".to_string()],
    }
}

#[tokio::test]
async fn test_add_doctor_inserts_normalized_row() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .and(body_json(json!({
            "name": "Dr. Meredith Grey",
            "specialization": "General Surgery",
            "email": "grey@clinic.com",
            "available_days": "Monday, Wednesday, Friday",
            "available_from": "09:00:00",
            "available_to": "17:00:00"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::doctor_response(3, "grey@clinic.com", "Dr. Meredith Grey", "General Surgery")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let page = add_doctor(State(config_for(&server)), admin(), Form(valid_form()))
        .await
        .unwrap();

    assert_eq!(page.0["success"], true);
    assert_eq!(page.0["doctor"]["id"], 3);
}

#[tokio::test]
async fn test_add_doctor_duplicate_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(409).set_body_json(
            MockSupabaseResponses::unique_violation("doctors_email_key"),
        ))
        .mount(&server)
        .await;

    let result = add_doctor(State(config_for(&server)), admin(), Form(valid_form())).await;

    assert_matches!(result, Err(AppError::Conflict(msg)) if msg == "Doctor already exists");
}

#[tokio::test]
async fn test_add_doctor_inverted_window_never_reaches_store() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = valid_form();
    form.available_from = Some("18:00".to_string());

    let result = add_doctor(State(config_for(&server)), admin(), Form(form)).await;

    assert_matches!(result, Err(AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_add_doctor_requires_admin() {
    let server = MockServer::start().await;
    let patient = Extension(TestPatient::default().auth_context());

    let result = add_doctor(State(config_for(&server)), patient, Form(valid_form())).await;
    assert_matches!(result, Err(AppError::LoginRequired(path)) if path == "/admin-login");

    let page = add_doctor_page(Extension(AuthContext::anonymous())).await;
    assert_matches!(page, Err(AppError::LoginRequired(_)));
}

#[tokio::test]
async fn test_list_bookable_doctors_ordered_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("order", "name.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::doctor_response(1, "a@clinic.com", "Dr. Adams", "Dermatology"),
            MockSupabaseResponses::doctor_response(2, "b@clinic.com", "Dr. Baker", "Cardiology")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let doctors = DoctorService::new(&config_for(&server))
        .list_bookable_doctors()
        .await
        .unwrap();

    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0].name, "Dr. Adams");
    assert_eq!(doctors[1].available_days.as_deref(), Some("Monday, Wednesday, Friday"));
}
