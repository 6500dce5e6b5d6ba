use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use otriples_core::ValidationConfig;
use otriples_db::{init_pool, run_migrations};
use otriples_server::{create_router, AppState};

/// Create a test app with in-memory database.
async fn create_test_app() -> axum::Router {
    let pool = init_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let state = AppState::new(pool, ValidationConfig::default());
    create_router(state)
}

/// Send a request and return status plus parsed JSON body (Null when empty).
async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn new_contact() -> Value {
    let actor = Uuid::new_v4();
    let now = Utc::now();
    json!({
        "id": Uuid::new_v4(),
        "information": "+47 22 00 00 00",
        "notes": "main office",
        "created_by": actor,
        "created_date": now,
        "updated_by": actor,
        "updated_date": now,
    })
}

// ============================================================================
// Health endpoint tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

// ============================================================================
// Contact endpoint tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_contact() {
    let app = create_test_app().await;
    let contact = new_contact();
    let id = contact["id"].as_str().unwrap().to_string();

    let (status, created) = send(&app, "POST", "/api/contacts", Some(contact.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], contact["id"]);
    assert_eq!(created["notes"], "main office");

    let (status, fetched) = send(&app, "GET", &format!("/api/contacts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["information"], "+47 22 00 00 00");
}

#[tokio::test]
async fn test_create_null_contact() {
    let app = create_test_app().await;

    let (status, problem) = send(&app, "POST", "/api/contacts", Some(Value::Null)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["detail"], "Contact is null");
    assert!(problem.get("errors").is_none());
}

#[tokio::test]
async fn test_create_invalid_contact_lists_all_errors() {
    let app = create_test_app().await;
    let mut contact = new_contact();
    contact["id"] = json!(Uuid::nil());
    contact["information"] = json!("   ");
    contact["updated_by"] = json!(Uuid::new_v4());

    let (status, problem) = send(&app, "POST", "/api/contacts", Some(contact)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["status"], 400);
    assert_eq!(problem["errors"]["id"], json!(["Id is required"]));
    assert_eq!(problem["errors"]["information"], json!(["Text is required"]));
    assert_eq!(
        problem["errors"]["updated_by"],
        json!(["Id is not the same as created_by"])
    );
}

#[tokio::test]
async fn test_create_contact_without_audit_fields() {
    let app = create_test_app().await;
    let body = json!({
        "id": Uuid::new_v4(),
        "information": "",
        "notes": "x",
    });

    let (status, problem) = send(&app, "POST", "/api/contacts", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = &problem["errors"];
    assert_eq!(errors["information"], json!(["Text is required"]));
    assert_eq!(errors["created_by"], json!(["Id is required"]));
    assert_eq!(errors["updated_by"], json!(["Id is required"]));
    assert_eq!(
        errors["created_date"],
        json!(["Date is required", "Date is not recent"])
    );
    assert_eq!(errors["updated_date"], json!(["Date is required"]));
    assert!(errors.get("id").is_none());
}

#[tokio::test]
async fn test_modify_contact_with_empty_body() {
    let app = create_test_app().await;

    let (status, problem) = send(&app, "PUT", "/api/contacts", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["errors"]["id"], json!(["Id is required"]));
    assert_eq!(problem["errors"]["notes"], json!(["Text is required"]));
}

#[tokio::test]
async fn test_create_stale_contact() {
    let app = create_test_app().await;
    let mut contact = new_contact();
    let stale = Utc::now() - Duration::minutes(10);
    contact["created_date"] = json!(stale);
    contact["updated_date"] = json!(stale);

    let (status, problem) = send(&app, "POST", "/api/contacts", Some(contact)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["errors"]["created_date"], json!(["Date is not recent"]));
}

#[tokio::test]
async fn test_create_duplicate_contact_conflicts() {
    let app = create_test_app().await;
    let contact = new_contact();

    let (status, _) = send(&app, "POST", "/api/contacts", Some(contact.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, problem) = send(&app, "POST", "/api/contacts", Some(contact)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        problem["title"],
        "Contact dependency validation error occurred, fix the errors and try again"
    );
    assert_eq!(problem["detail"], "Contact with the same key already exists");
}

#[tokio::test]
async fn test_get_missing_contact() {
    let app = create_test_app().await;
    let id = Uuid::new_v4();

    let (status, problem) = send(&app, "GET", &format!("/api/contacts/{}", id), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        problem["detail"],
        format!("Couldn't find Contact with id: {}", id)
    );
}

#[tokio::test]
async fn test_get_nil_contact_id() {
    let app = create_test_app().await;

    let (status, problem) =
        send(&app, "GET", &format!("/api/contacts/{}", Uuid::nil()), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["errors"]["id"], json!(["Id is required"]));
}

#[tokio::test]
async fn test_list_contacts() {
    let app = create_test_app().await;

    let (status, list) = send(&app, "GET", "/api/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    send(&app, "POST", "/api/contacts", Some(new_contact())).await;
    send(&app, "POST", "/api/contacts", Some(new_contact())).await;

    let (status, list) = send(&app, "GET", "/api/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_modify_contact() {
    let app = create_test_app().await;
    let contact = new_contact();
    send(&app, "POST", "/api/contacts", Some(contact.clone())).await;

    let mut changed = contact.clone();
    changed["notes"] = json!("moved to annex");
    changed["updated_by"] = json!(Uuid::new_v4());
    changed["updated_date"] = json!(Utc::now() + Duration::seconds(1));

    let (status, modified) = send(&app, "PUT", "/api/contacts", Some(changed)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(modified["notes"], "moved to annex");

    let id = contact["id"].as_str().unwrap();
    let (_, fetched) = send(&app, "GET", &format!("/api/contacts/{}", id), None).await;
    assert_eq!(fetched["notes"], "moved to annex");
}

#[tokio::test]
async fn test_modify_without_changed_updated_date() {
    let app = create_test_app().await;
    let contact = new_contact();
    send(&app, "POST", "/api/contacts", Some(contact.clone())).await;

    let (status, problem) = send(&app, "PUT", "/api/contacts", Some(contact)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        problem["errors"]["updated_date"],
        json!(["Date is the same as created_date"])
    );
}

#[tokio::test]
async fn test_modify_missing_contact() {
    let app = create_test_app().await;
    let mut contact = new_contact();
    contact["created_date"] = json!(Utc::now() - Duration::days(1));

    let (status, _) = send(&app, "PUT", "/api/contacts", Some(contact)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_contact() {
    let app = create_test_app().await;
    let contact = new_contact();
    let id = contact["id"].as_str().unwrap().to_string();
    send(&app, "POST", "/api/contacts", Some(contact)).await;

    let (status, removed) = send(&app, "DELETE", &format!("/api/contacts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["id"], json!(id));

    let (status, _) = send(&app, "DELETE", &format!("/api/contacts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Other entities
// ============================================================================

#[tokio::test]
async fn test_create_teacher_requires_names() {
    let app = create_test_app().await;
    let actor = Uuid::new_v4();
    let now = Utc::now();
    let teacher = json!({
        "id": Uuid::new_v4(),
        "user_id": "t-100",
        "employee_number": "E-100",
        "first_name": "",
        "last_name": "Hopper",
        "created_by": actor,
        "created_date": now,
        "updated_by": actor,
        "updated_date": now,
    });

    let (status, problem) = send(&app, "POST", "/api/teachers", Some(teacher)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["errors"]["first_name"], json!(["Text is required"]));
    assert!(problem["errors"].get("middle_name").is_none());
}

#[tokio::test]
async fn test_student_attachment_composite_routes() {
    let app = create_test_app().await;
    let actor = Uuid::new_v4();
    let now = Utc::now();
    let student_id = Uuid::new_v4();
    let attachment_id = Uuid::new_v4();
    let attachment = json!({
        "student_id": student_id,
        "attachment_id": attachment_id,
        "notes": "transcript",
        "created_by": actor,
        "created_date": now,
        "updated_by": actor,
        "updated_date": now,
    });

    let (status, _) = send(&app, "POST", "/api/studentattachments", Some(attachment)).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/studentattachments/{}/{}", student_id, attachment_id);
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["notes"], "transcript");

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_entities_are_partitioned() {
    let app = create_test_app().await;
    let contact = new_contact();
    let id = contact["id"].as_str().unwrap().to_string();
    send(&app, "POST", "/api/contacts", Some(contact)).await;

    let (status, _) = send(&app, "GET", &format!("/api/calendars/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
