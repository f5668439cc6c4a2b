//! End-to-end tests driving the router through the full request cycle.
//!
//! Each test builds its own store so no state leaks between tests.

use std::collections::HashSet;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use medication_service::api::{create_router, AppState};
use medication_service::medication::MedicationStore;

struct TestApp {
    router: Router,
}

impl TestApp {
    fn seeded() -> Self {
        Self {
            router: create_router(AppState::new(MedicationStore::seeded())),
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, bytes) = self.send(request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn list(&self) -> Vec<Value> {
        let (status, body) = self.json(Method::GET, "/medicamentos", None).await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().cloned().unwrap()
    }

    async fn create(&self, name: &str, dosage: &str, schedule: &str) -> Value {
        let (status, body) = self
            .json(
                Method::POST,
                "/medicamentos",
                Some(json!({ "name": name, "dosage": dosage, "schedule": schedule })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }
}

fn names(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn startup_lists_exactly_the_seed_records() {
    let app = TestApp::seeded();

    let records = app.list().await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Dipirona");
    assert_eq!(records[0]["dosage"], "500mg");
    assert_eq!(records[0]["schedule"], "08:00");
    assert_eq!(records[1]["name"], "Vitamina C");
    assert_eq!(records[1]["dosage"], "1g");
    assert_eq!(records[1]["schedule"], "12:00");
}

#[tokio::test]
async fn create_echoes_payload_and_grows_collection() {
    let app = TestApp::seeded();

    let created = app.create("Ibuprofeno", "400mg", "20:00").await;

    assert_eq!(created["name"], "Ibuprofeno");
    assert_eq!(created["dosage"], "400mg");
    assert_eq!(created["schedule"], "20:00");

    let records = app.list().await;
    assert_eq!(records.len(), 3);
    assert_eq!(records[2], created);
}

#[tokio::test]
async fn create_ids_are_unique() {
    let app = TestApp::seeded();

    let first = app.create("A", "1mg", "01:00").await;
    let second = app.create("B", "2mg", "02:00").await;

    assert_ne!(first["id"], second["id"]);

    let records = app.list().await;
    let ids: HashSet<u64> = records.iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids.len(), records.len());
}

#[tokio::test]
async fn create_with_missing_or_empty_field_is_rejected() {
    let app = TestApp::seeded();

    let payloads = [
        json!({ "dosage": "400mg", "schedule": "20:00" }),
        json!({ "name": "Ibuprofeno", "schedule": "20:00" }),
        json!({ "name": "Ibuprofeno", "dosage": "400mg" }),
        json!({ "name": "", "dosage": "400mg", "schedule": "20:00" }),
        json!({ "name": "Ibuprofeno", "dosage": "400mg", "schedule": null }),
        json!({}),
    ];

    for payload in payloads {
        let (status, body) = app
            .json(Method::POST, "/medicamentos", Some(payload.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(body, json!({ "error": "Preencha nome, dosagem e horário." }));
    }

    assert_eq!(app.list().await.len(), 2);
}

#[tokio::test]
async fn create_without_json_content_type_is_a_validation_error() {
    let app = TestApp::seeded();

    let (status, bytes) = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/medicamentos")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("Dipirona"))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Preencha nome, dosagem e horário.");
    assert_eq!(app.list().await.len(), 2);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::seeded();

    let (status, bytes) = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/medicamentos")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\": "))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
    assert_eq!(app.list().await.len(), 2);
}

#[tokio::test]
async fn legacy_field_names_are_accepted() {
    let app = TestApp::seeded();

    let (status, body) = app
        .json(
            Method::POST,
            "/medicamentos",
            Some(json!({ "nome": "Paracetamol", "dosagem": "750mg", "horario": "18:00" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Paracetamol");
    assert_eq!(body["dosage"], "750mg");
    assert_eq!(body["schedule"], "18:00");
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = TestApp::seeded();
    let created = app.create("Ibuprofeno", "400mg", "20:00").await;
    let id = created["id"].as_u64().unwrap();

    let (status, updated) = app
        .json(
            Method::PUT,
            &format!("/medicamentos/{id}"),
            Some(json!({ "dosage": "600mg" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({ "id": id, "name": "Ibuprofeno", "dosage": "600mg", "schedule": "20:00" })
    );

    let records = app.list().await;
    assert_eq!(records.len(), 3);
    assert_eq!(records[2], updated);
}

#[tokio::test]
async fn update_ignores_empty_values() {
    let app = TestApp::seeded();

    let (status, updated) = app
        .json(
            Method::PUT,
            "/medicamentos/1",
            Some(json!({ "name": "", "dosage": "750mg", "schedule": null })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({ "id": 1, "name": "Dipirona", "dosage": "750mg", "schedule": "08:00" })
    );
}

#[tokio::test]
async fn update_without_body_returns_record_unchanged() {
    let app = TestApp::seeded();

    let (status, body) = app.json(Method::PUT, "/medicamentos/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 2, "name": "Vitamina C", "dosage": "1g", "schedule": "12:00" })
    );
}

#[tokio::test]
async fn update_or_delete_unknown_id_leaves_collection_unchanged() {
    let app = TestApp::seeded();
    let before = app.list().await;

    for uri in ["/medicamentos/999", "/medicamentos/abc"] {
        let (status, body) = app
            .json(Method::PUT, uri, Some(json!({ "name": "X" })))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Medicamento não encontrado" }));

        let (status, body) = app.json(Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Medicamento não encontrado" }));
    }

    assert_eq!(app.list().await, before);
}

#[tokio::test]
async fn delete_removes_exactly_one_record_preserving_order() {
    let app = TestApp::seeded();
    let created = app.create("Ibuprofeno", "400mg", "20:00").await;
    app.create("Paracetamol", "750mg", "18:00").await;
    let id = created["id"].as_u64().unwrap();

    let (status, bytes) = app
        .send(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/medicamentos/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    let records = app.list().await;
    assert_eq!(records.len(), 3);
    assert_eq!(
        names(&records),
        vec!["Dipirona", "Vitamina C", "Paracetamol"]
    );
    assert!(records.iter().all(|r| r["id"] != created["id"]));

    // A second delete of the same id no longer matches.
    let (status, _) = app
        .json(Method::DELETE, &format!("/medicamentos/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stores_are_isolated_between_apps() {
    let first = TestApp::seeded();
    let second = TestApp::seeded();

    first.create("Ibuprofeno", "400mg", "20:00").await;

    assert_eq!(first.list().await.len(), 3);
    assert_eq!(second.list().await.len(), 2);
}
