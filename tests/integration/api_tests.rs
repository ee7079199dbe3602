//! API integration tests, driven through the router over an in-memory workbook

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use labtrack_server::{
    api,
    config::{AppConfig, StoreBackend},
    models::Worksheet,
    repository::{store::MemoryStore, Repository},
    services::Services,
    AppState,
};

const SEED: &str = r#"{
  "Equipment": [
    ["ID", "Name", "Category", "Status", "Holder", "DueDate", "CheckoutDate"],
    [1, "Analytical balance", "Weighing", "Available", "", "", ""],
    [2.0, "Centrifuge", "Sample prep", "Available", "", "", ""],
    [3, "Drying oven", "Sample prep", "In repair", "", "", ""]
  ],
  "Reservations": [
    ["EquipmentID", "EquipmentName", "Requester", "StartDate", "EndDate", "Purpose"],
    ["2", "Centrifuge", "Kim", "2031-03-10", "2031-03-12", "Research"]
  ],
  "Proposals": [
    ["ID", "ItemName", "Requester", "Price", "Justification", "SubmittedOn", "Status", "ManagerComment"]
  ],
  "Faults": [
    ["EquipmentID", "EquipmentName", "Reporter", "Description", "ReportedOn", "Status"]
  ],
  "Remarks": [
    ["Date", "Author", "Text", "Category"]
  ]
}"#;

fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::from_seed_json(SEED).expect("seed parses"));
    let mut config = AppConfig::default();
    config.store.backend = StoreBackend::Memory;
    let repository = Repository::new(store.clone(), &config.store);
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(repository)),
    };
    (api::router(state), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");

    let response = app.clone().oneshot(request).await.expect("router answers");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body reads");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, value)
}

fn outcomes(report: &Value) -> Vec<&str> {
    report["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["outcome"].as_str().unwrap_or_default())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/api/v1/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_status_board_lists_equipment() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/equipment", None).await;
    assert_eq!(status, StatusCode::OK);
    let equipment = body["equipment"].as_array().unwrap();
    assert_eq!(equipment.len(), 3);
    assert_eq!(equipment[1]["id"], "2");
    assert_eq!(equipment[2]["status"], "in_repair");
}

#[tokio::test]
async fn test_checkout_then_return() {
    let (app, store) = app();

    let (status, report) = send(
        &app,
        Method::POST,
        "/api/v1/equipment/checkout",
        Some(json!({
            "equipment_ids": ["1", "2", "3", "9"],
            "holder": "Ana",
            "checkout_date": "2031-03-09",
            "due_date": "2031-03-11"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // 2 is booked by Kim, 3 is in repair, 9 does not exist
    assert_eq!(outcomes(&report), vec!["done", "conflict", "rejected", "rejected"]);
    assert!(report["items"][1]["message"].as_str().unwrap().contains("Kim"));

    let rows = store.rows(Worksheet::Equipment).await;
    assert_eq!(
        rows[0],
        vec!["1", "Analytical balance", "Weighing", "Checked out", "Ana", "2031-03-11", "2031-03-09"]
    );

    // the loan shows up on the calendar right away
    let (_, events) = send(&app, Method::GET, "/api/v1/calendar", None).await;
    let loan = events
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["kind"] == "loan")
        .expect("loan entry");
    assert_eq!(loan["title"], "CHECKED OUT: Analytical balance (Ana)");
    assert_eq!(loan["start"], "2031-03-09");
    assert_eq!(loan["end"], "2031-03-12");

    let (status, report) = send(
        &app,
        Method::POST,
        "/api/v1/equipment/return",
        Some(json!({ "equipment_ids": ["1", "2"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcomes(&report), vec!["done", "rejected"]);

    let rows = store.rows(Worksheet::Equipment).await;
    assert_eq!(rows[0][3..].to_vec(), vec!["Available", "", "", ""]);
}

#[tokio::test]
async fn test_lab_block_conflict() {
    let (app, _) = app();
    let block = json!({
        "start_date": "2031-05-01",
        "end_date": "2031-05-03",
        "purpose": "classes",
        "requester": "Dr. Nowak"
    });

    let (status, body) = send(&app, Method::POST, "/api/v1/reservations/lab", Some(block.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["equipment_id"], "WHOLE_LAB");

    let (status, body) = send(&app, Method::POST, "/api/v1/reservations/lab", Some(block)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("Dr. Nowak"));

    // devices are blocked too
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/availability?equipment_id=1&start_date=2031-05-03&end_date=2031-05-04",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);

    let (_, events) = send(&app, Method::GET, "/api/v1/calendar", None).await;
    let block = events
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["kind"] == "lab_block")
        .expect("lab block entry");
    assert_eq!(block["title"], "LAB BLOCKED: Classes");
    assert_eq!(block["color"], "#ff9f89");
    assert_eq!(block["end"], "2031-05-04");
}

#[tokio::test]
async fn test_inverted_range_is_rejected() {
    let (app, store) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/reservations/plan",
        Some(json!({
            "equipment_ids": ["1"],
            "start_date": "2031-05-03",
            "end_date": "2031-05-01",
            "purpose": "research",
            "requester": "Lee"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert_eq!(store.rows(Worksheet::Reservations).await.len(), 1);
}

#[tokio::test]
async fn test_fault_puts_device_in_repair() {
    let (app, store) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/faults",
        Some(json!({ "equipment_id": "2", "description": "Lid latch broken", "reporter": "Lee" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Open");

    let rows = store.rows(Worksheet::Equipment).await;
    assert_eq!(rows[1][3], "In repair");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/faults",
        Some(json!({ "equipment_id": "77", "description": "Gone", "reporter": "Lee" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
async fn test_proposal_lifecycle() {
    let (app, _) = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/proposals",
        Some(json!({
            "item_name": "Micropipette set",
            "price": "300 EUR",
            "justification": "Old set out of calibration",
            "requester": "Ana"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "1");
    assert_eq!(created["status"], "pending");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/proposals/1/status",
        Some(json!({ "status": "approved", "comment": "Go ahead" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, proposals) = send(&app, Method::GET, "/api/v1/proposals", None).await;
    assert_eq!(proposals[0]["status"], "approved");
    assert_eq!(proposals[0]["manager_comment"], "Go ahead");
}

#[tokio::test]
async fn test_remarks_and_refresh() {
    let (app, store) = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/remarks",
        Some(json!({ "author": "Kim", "category": "missing_supplies", "text": "No more ethanol" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(store.rows(Worksheet::Remarks).await[0][3], "Missing supplies");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/remarks",
        Some(json!({ "author": "", "category": "other", "text": "Anonymous" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, _) = send(&app, Method::POST, "/api/v1/refresh", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, remarks) = send(&app, Method::GET, "/api/v1/remarks", None).await;
    assert_eq!(remarks.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_whitespace_only_fields_are_rejected() {
    let (app, store) = app();

    let cases = [
        (
            "/api/v1/reservations/lab",
            json!({
                "start_date": "2031-06-01",
                "end_date": "2031-06-02",
                "purpose": "classes",
                "requester": "   "
            }),
        ),
        (
            "/api/v1/equipment/checkout",
            json!({ "equipment_ids": ["1"], "holder": " ", "due_date": "2031-06-02" }),
        ),
        (
            "/api/v1/faults",
            json!({ "equipment_id": "1", "description": "\t", "reporter": "Lee" }),
        ),
        (
            "/api/v1/proposals",
            json!({
                "item_name": "Stirrer",
                "price": " ",
                "justification": "Needed",
                "requester": "Ana"
            }),
        ),
        (
            "/api/v1/remarks",
            json!({ "author": " ", "category": "other", "text": "\t" }),
        ),
    ];

    for (uri, body) in cases {
        let (status, response) = send(&app, Method::POST, uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(response["error"], "BadValue");
    }

    assert_eq!(store.rows(Worksheet::Reservations).await.len(), 1);
    assert!(store.rows(Worksheet::Faults).await.is_empty());
    assert!(store.rows(Worksheet::Proposals).await.is_empty());
    assert!(store.rows(Worksheet::Remarks).await.is_empty());
    assert_eq!(store.rows(Worksheet::Equipment).await[0][3], "Available");
}
