//! Field-shape validation on the create DTOs.

use bluecarbon_db::models::mrv_submission::CreateMrvSubmission;
use bluecarbon_db::models::project::CreateProject;
use validator::Validate;

fn valid_project() -> CreateProject {
    serde_json::from_value(serde_json::json!({
        "name": "Benoa Mangroves",
        "project_type": "mangrove_restoration",
        "area_hectares": 120.5,
        "location": { "latitude": -8.65, "longitude": 115.21 }
    }))
    .unwrap()
}

#[test]
fn valid_project_passes() {
    assert!(valid_project().validate().is_ok());
}

#[test]
fn empty_name_fails() {
    let mut input = valid_project();
    input.name = String::new();
    assert!(input.validate().is_err());
}

#[test]
fn empty_project_type_fails() {
    let mut input = valid_project();
    input.project_type = String::new();
    assert!(input.validate().is_err());
}

#[test]
fn zero_area_fails() {
    let mut input = valid_project();
    input.area_hectares = 0.0;
    assert!(input.validate().is_err());
}

#[test]
fn omitted_status_defaults_to_none() {
    assert!(valid_project().status.is_none());
}

#[test]
fn negative_measurement_fails() {
    let input: CreateMrvSubmission = serde_json::from_value(serde_json::json!({
        "submission_date": "2026-03-14",
        "data_source": "csv",
        "carbon_measurement": -1.0
    }))
    .unwrap();
    assert!(input.validate().is_err());
}

#[test]
fn missing_measurement_passes() {
    let input: CreateMrvSubmission = serde_json::from_value(serde_json::json!({
        "submission_date": "2026-03-14",
        "data_source": "sensor"
    }))
    .unwrap();
    assert!(input.validate().is_ok());
}
