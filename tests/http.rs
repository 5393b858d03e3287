use axum::body::Body;
use axum::http::{ header, Request, Response, StatusCode };
use http_body_util::BodyExt;
use sea_orm::{ DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult };
use tower::ServiceExt;

use uams::db::entity::{ address, user };

fn user_row(id: i32, name: &str, email: &str) -> user::Model {
    let now = chrono::Utc::now();
    user::Model {
        id,
        name: name.to_string(),
        email: email.to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn address_row(id: i32, street: &str) -> address::Model {
    let now = chrono::Utc::now();
    address::Model {
        address_id: id,
        building_name: None,
        street: street.to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        pincode: "62704".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn app(db: DatabaseConnection) -> axum::Router {
    uams::app(db).expect("router should build")
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn root_redirects_to_users() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let response = app(db).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/users");
}

#[tokio::test]
async fn api_create_user_returns_created_record() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(1, "John Doe", "john.doe@example.com")]])
        .append_exec_results([MockExecResult { last_insert_id: 1, rows_affected: 1 }])
        .into_connection();

    let response = app(db)
        .oneshot(
            json_post(
                "/api/users",
                serde_json::json!({ "name": "John Doe", "email": "john.doe@example.com" })
            )
        ).await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn api_create_user_without_email_fails_with_raw_message() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let response = app(db)
        .oneshot(json_post("/api/users", serde_json::json!({ "name": "John Doe" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.contains("email cannot be null"));
}

#[tokio::test]
async fn api_list_addresses_returns_inserted_street() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![address_row(1, "123 Main St")]])
        .into_connection();

    let response = app(db).oneshot(get("/api/addresses")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let addresses = body.as_array().unwrap();
    assert!(!addresses.is_empty());
    assert_eq!(addresses[0]["street"], "123 Main St");
}

#[tokio::test]
async fn api_update_user_overwrites_supplied_fields() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![user_row(1, "John Doe", "john.doe@example.com")],
            vec![user_row(1, "Jane Doe", "john.doe@example.com")],
        ])
        .append_exec_results([MockExecResult { last_insert_id: 1, rows_affected: 1 }])
        .into_connection();

    let response = app(db)
        .oneshot(json_post("/api/users/1", serde_json::json!({ "name": "Jane Doe" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["name"], "Jane Doe");
    // The omitted field keeps its stored value.
    assert_eq!(body["email"], "john.doe@example.com");
}

#[tokio::test]
async fn api_update_user_with_explicit_null_name_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(1, "John Doe", "john.doe@example.com")]])
        .into_connection();

    let response = app(db)
        .oneshot(json_post("/api/users/1", serde_json::json!({ "name": null })))
        .await
        .unwrap();

    // Explicit null is a notNull violation, unlike an omitted field.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.contains("name cannot be null"));
}

#[tokio::test]
async fn api_create_address_with_null_street_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let response = app(db)
        .oneshot(
            json_post(
                "/api/addresses",
                serde_json::json!({
                    "street": null,
                    "city": "Springfield",
                    "state": "IL",
                    "pincode": "62704"
                })
            )
        ).await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.contains("street cannot be null"));
}

#[tokio::test]
async fn both_resources_serve_from_one_connection() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(1, "John Doe", "john.doe@example.com")]])
        .append_query_results([vec![address_row(1, "123 Main St")]])
        .into_connection();
    let app = app(db);

    let response = app.clone().oneshot(get("/api/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/addresses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("123 Main St"));
}

#[tokio::test]
async fn update_of_missing_user_silently_redirects() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();

    let response = app(db)
        .oneshot(form_post("/users/99", "name=Jane+Doe&email=jane@example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/users");
}

#[tokio::test]
async fn delete_is_idempotent_for_missing_keys() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult { last_insert_id: 0, rows_affected: 1 },
            MockExecResult { last_insert_id: 0, rows_affected: 0 },
        ])
        .into_connection();
    let app = app(db);

    // First delete removes the row, the second finds nothing. Both look
    // identical from the outside.
    for _ in 0..2 {
        let response = app.clone().oneshot(get("/users/1/delete")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/users");
    }
}

#[tokio::test]
async fn edit_form_for_missing_address_redirects_to_list() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<address::Model>::new()])
        .into_connection();

    let response = app(db).oneshot(get("/addresses/42/edit")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/addresses");
    // A cookieless visitor still gets a session, as on every other page.
    assert!(response.headers()[header::SET_COOKIE].to_str().unwrap().starts_with("sid="));
}

#[tokio::test]
async fn edit_form_is_prefilled_for_existing_user() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(3, "John Doe", "john.doe@example.com")]])
        .into_connection();

    let response = app(db).oneshot(get("/users/3/edit")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("action=\"/users/3\""));
    assert!(html.contains("John Doe"));
}

#[tokio::test]
async fn flash_notice_shows_once_after_page_create() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            // Insert, then two list renders.
            vec![user_row(1, "John Doe", "john.doe@example.com")],
            vec![user_row(1, "John Doe", "john.doe@example.com")],
            vec![user_row(1, "John Doe", "john.doe@example.com")],
        ])
        .append_exec_results([MockExecResult { last_insert_id: 1, rows_affected: 1 }])
        .into_connection();
    let app = app(db);

    let response = app
        .clone()
        .oneshot(form_post("/users", "name=John+Doe&email=john.doe%40example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/users");

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    let sid = set_cookie.split(';').next().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/users")
                .header(header::COOKIE, sid.clone())
                .body(Body::empty())
                .unwrap()
        ).await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("User created successfully!"));

    // The notice is one-shot: the next render no longer carries it.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/users")
                .header(header::COOKIE, sid)
                .body(Body::empty())
                .unwrap()
        ).await
        .unwrap();
    assert!(!body_string(response).await.contains("User created successfully!"));
}

#[tokio::test]
async fn page_create_form_renders_empty_form() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let response = app(db).oneshot(get("/addresses/new")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("action=\"/addresses\""));
    assert!(html.contains("name=\"pincode\""));
}
