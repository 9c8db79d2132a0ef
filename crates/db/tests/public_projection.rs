//! The public projection types must never expose identifying fields: their
//! serialized form is the public API surface, so these tests pin down the
//! exact key sets.

use bluecarbon_core::project::{Location, ProjectStatus};
use bluecarbon_db::models::public::{PublicProject, PublicStats, PublicTransaction};
use chrono::Utc;
use sqlx::types::Json;

fn sample_project() -> PublicProject {
    PublicProject {
        id: uuid::Uuid::from_u128(1),
        name: "Benoa Mangroves".to_string(),
        description: Some("Mangrove replanting across the bay".to_string()),
        project_type: "mangrove_restoration".to_string(),
        area_hectares: 120.5,
        location: Json(Location {
            latitude: Some(-8.65),
            longitude: Some(115.21),
            address: Some("Benoa Bay, Bali".to_string()),
        }),
        baseline_carbon: Some(1000.0),
        projected_sequestration: Some(4800.0),
        status: ProjectStatus::Approved,
        approved_at: Some(Utc::now()),
    }
}

fn keys(value: &serde_json::Value) -> Vec<String> {
    value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .cloned()
        .collect()
}

#[test]
fn public_project_carries_no_owner_fields() {
    let json = serde_json::to_value(sample_project()).unwrap();
    let keys = keys(&json);

    for forbidden in ["owner_id", "approved_by", "registry_hash"] {
        assert!(
            !keys.contains(&forbidden.to_string()),
            "public project must not expose '{forbidden}'"
        );
    }
    assert!(keys.contains(&"name".to_string()));
    assert!(keys.contains(&"area_hectares".to_string()));
}

#[test]
fn public_project_serializes_approved_status() {
    let json = serde_json::to_value(sample_project()).unwrap();
    assert_eq!(json["status"], "approved");
    assert_eq!(json["location"]["latitude"], -8.65);
}

#[test]
fn public_transaction_carries_no_party_fields() {
    let tx = PublicTransaction {
        id: uuid::Uuid::from_u128(2),
        transaction_type: "transfer".to_string(),
        amount: 50.0,
        ledger_hash: "a".repeat(64),
        transaction_date: Utc::now(),
    };
    let json = serde_json::to_value(tx).unwrap();
    let keys = keys(&json);

    for forbidden in ["from_profile_id", "to_profile_id", "notes", "credit_id"] {
        assert!(
            !keys.contains(&forbidden.to_string()),
            "public transaction must not expose '{forbidden}'"
        );
    }
}

#[test]
fn public_stats_serializes_all_counters() {
    let stats = PublicStats {
        approved_projects: 3,
        total_hectares: 360.0,
        credits_issued: 900.0,
        credits_retired: 120.0,
    };
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["approved_projects"], 3);
    assert_eq!(json["credits_retired"], 120.0);
}
