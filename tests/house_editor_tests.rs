//! Integration tests for the house editor: composite create/edit saves,
//! gallery replacement rules, staff assignment and protected deletes,
//! exercised end to end through the router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use backoffice::config::AppConfig;
use backoffice::migration::{Migrator, MigratorTrait};
use backoffice::server::{create_app, AppState};
use backoffice::storage::MediaStorage;
use http_body_util::BodyExt;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Set,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "test-bundle-boundary";

struct TestApp {
    app: Router,
    db: DatabaseConnection,
    _media_dir: tempfile::TempDir,
}

async fn spawn_app() -> TestApp {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("Failed to init test DB");
    Migrator::up(&db, None).await.unwrap();

    let media_dir = tempfile::tempdir().unwrap();
    let state = AppState {
        db: db.clone(),
        media: MediaStorage::new(media_dir.path()),
        config: AppConfig::default(),
    };

    TestApp {
        app: create_app(state),
        db,
        _media_dir: media_dir,
    }
}

/// Builds a multipart body with a JSON `payload` part and optional image
/// parts of (field name, file name, bytes).
fn multipart_body(payload: &Value, images: &[(&str, &str, &[u8])]) -> Body {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"payload\"\r\n\r\n");
    body.extend_from_slice(payload.to_string().as_bytes());
    body.extend_from_slice(b"\r\n");

    for (field, file_name, bytes) in images {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

fn bundle_payload(name: &str, sections: &[&str], floors: &[i32], staff: &[i32]) -> Value {
    json!({
        "house": { "name": name, "address": "1 Main St" },
        "sections": sections.iter().map(|s| json!({ "name": s })).collect::<Vec<_>>(),
        "floors": floors.iter().map(|n| json!({ "number": n })).collect::<Vec<_>>(),
        "staff": staff.iter().map(|id| json!({ "user_id": id })).collect::<Vec<_>>(),
    })
}

fn multipart_request(uri: &str, payload: &Value, images: &[(&str, &str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(multipart_body(payload, images))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a house through the API and returns its id from the Location
/// header.
async fn create_house(app: &Router, payload: &Value, images: &[(&str, &str, &[u8])]) -> i32 {
    let response = app
        .clone()
        .oneshot(multipart_request("/admin/houses", payload, images))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    location
        .rsplit('/')
        .next()
        .unwrap()
        .parse()
        .expect("Location should end with the house id")
}

async fn insert_staff_user(db: &DatabaseConnection, email: &str) -> i32 {
    backoffice::models::user::ActiveModel {
        username: Set(email.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("x".to_string()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        patronymic: Set(String::new()),
        phone: Set(String::new()),
        telegram: Set(String::new()),
        viber: Set(String::new()),
        birth_date: Set(None),
        role_id: Set(None),
        is_active: Set(true),
        is_staff: Set(true),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn test_sunrise_tower_scenario() {
    let test = spawn_app().await;

    // 2 sections, floors [1,2,3], no staff.
    let id = create_house(
        &test.app,
        &bundle_payload("Sunrise Tower", &["A", "B"], &[1, 2, 3], &[]),
        &[],
    )
    .await;

    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/admin/houses/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detail = json_body(response).await;

    assert_eq!(detail["name"], "Sunrise Tower");
    assert_eq!(detail["sections_count"], 2);
    assert_eq!(detail["floors_per_section"], 3);
    assert_eq!(detail["section_floor_counts"].as_array().unwrap().len(), 2);

    let floor_total = backoffice::models::Floor::find()
        .count(&test.db)
        .await
        .unwrap();
    assert_eq!(floor_total, 6);
}

#[tokio::test]
async fn test_edit_to_zero_sections_keeps_gallery_and_staff() {
    let test = spawn_app().await;
    let olena = insert_staff_user(&test.db, "olena@example.com").await;

    let id = create_house(
        &test.app,
        &bundle_payload("Sunrise Tower", &["A", "B"], &[1, 2, 3], &[olena]),
        &[("image0", "front.png", b"png-bytes")],
    )
    .await;

    let response = test
        .app
        .clone()
        .oneshot(multipart_request(
            &format!("/admin/houses/{id}/edit"),
            &bundle_payload("Sunrise Tower", &[], &[], &[olena]),
            &[],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(
        backoffice::models::Section::find().count(&test.db).await.unwrap(),
        0
    );
    assert_eq!(
        backoffice::models::Floor::find().count(&test.db).await.unwrap(),
        0
    );
    assert_eq!(
        backoffice::models::HouseImage::find().count(&test.db).await.unwrap(),
        1
    );
    assert_eq!(
        backoffice::models::HouseStaff::find().count(&test.db).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_empty_staff_list_clears_assignments() {
    let test = spawn_app().await;
    let olena = insert_staff_user(&test.db, "olena@example.com").await;

    let id = create_house(
        &test.app,
        &bundle_payload("Sunrise Tower", &["A"], &[1], &[olena]),
        &[],
    )
    .await;
    assert_eq!(
        backoffice::models::HouseStaff::find().count(&test.db).await.unwrap(),
        1
    );

    let response = test
        .app
        .clone()
        .oneshot(multipart_request(
            &format!("/admin/houses/{id}/edit"),
            &bundle_payload("Sunrise Tower", &["A"], &[1], &[]),
            &[],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        backoffice::models::HouseStaff::find().count(&test.db).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_bundle_validation_failure_reports_field_errors() {
    let test = spawn_app().await;

    // Blank name plus an unknown staff id; nothing may be written.
    let response = test
        .app
        .clone()
        .oneshot(multipart_request(
            "/admin/houses",
            &bundle_payload("", &["A"], &[1], &[999]),
            &[],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["details"]["house"]["name"].is_array());

    assert_eq!(
        backoffice::models::House::find().count(&test.db).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_more_than_five_images_rejected() {
    let test = spawn_app().await;

    let images: Vec<(&str, &str, &[u8])> = vec![
        ("image0", "a.png", b"1"),
        ("image1", "b.png", b"2"),
        ("image2", "c.png", b"3"),
        ("image3", "d.png", b"4"),
        ("image4", "e.png", b"5"),
        ("image5", "f.png", b"6"),
    ];
    let response = test
        .app
        .clone()
        .oneshot(multipart_request(
            "/admin/houses",
            &bundle_payload("Sunrise Tower", &[], &[], &[]),
            &images,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        backoffice::models::House::find().count(&test.db).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_delete_house_with_message_returns_conflict() {
    let test = spawn_app().await;

    let id = create_house(
        &test.app,
        &bundle_payload("Sunrise Tower", &["A"], &[1], &[]),
        &[],
    )
    .await;

    backoffice::models::message::ActiveModel {
        subject: Set("Water outage".to_string()),
        body: Set("Planned maintenance".to_string()),
        house_id: Set(id),
        section_id: Set(None),
        floor_id: Set(None),
        only_debtors: Set(false),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    }
    .insert(&test.db)
    .await
    .unwrap();

    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/admin/houses/{id}/delete"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["code"], "PROTECTED_REFERENCE");

    // The house and its children survive the rejected delete.
    assert_eq!(
        backoffice::models::House::find().count(&test.db).await.unwrap(),
        1
    );
    assert_eq!(
        backoffice::models::Section::find().count(&test.db).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_delete_house_without_references_redirects() {
    let test = spawn_app().await;

    let id = create_house(
        &test.app,
        &bundle_payload("Sunrise Tower", &["A"], &[1], &[]),
        &[],
    )
    .await;

    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/admin/houses/{id}/delete"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/houses"
    );
    assert_eq!(
        backoffice::models::House::find().count(&test.db).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_detail_of_unknown_house_is_404() {
    let test = spawn_app().await;

    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/houses/12345")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_edit_form_prefills_saved_bundle() {
    let test = spawn_app().await;
    let olena = insert_staff_user(&test.db, "olena@example.com").await;

    let id = create_house(
        &test.app,
        &bundle_payload("Sunrise Tower", &["A", "B"], &[1, 2, 3], &[olena]),
        &[],
    )
    .await;

    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/admin/houses/{id}/edit"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["section_names"], json!(["A", "B"]));
    assert_eq!(body["floor_numbers"], json!([1, 2, 3]));
    assert_eq!(body["staff_ids"], json!([olena]));
}
