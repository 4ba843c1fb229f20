//! HTTP-level tests: JSON → request → handler → store → response → JSON.
//!
//! The server is backed by in-memory stores and the default configuration,
//! which protects create/delete with `content:write` and leaves reads public.

use axum_test::TestServer;
use serde_json::json;
use testbank::config::ApiConfig;
use testbank::server::{AppState, build_router};

fn make_server() -> TestServer {
    let state = AppState::in_memory(ApiConfig::default_config());
    TestServer::try_new(build_router(state)).unwrap()
}

/// Create a category as a writer and return its JSON body
async fn create_category(server: &TestServer, name: &str) -> serde_json::Value {
    let response = server
        .post("/categories")
        .add_header("x-permissions", "content:write")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

// ==============================================================
// CRUD
// ==============================================================

#[tokio::test]
async fn test_rest_create_and_get() {
    let server = make_server();

    let created = create_category(&server, "Mathematics").await;
    assert_eq!(created["name"], "Mathematics");
    assert_eq!(created["status"], "active");
    let id = created["id"].as_str().unwrap();
    uuid::Uuid::parse_str(id).unwrap();

    let response = server.get(&format!("/categories/{}", id)).await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Mathematics");
}

#[tokio::test]
async fn test_rest_create_requires_permission() {
    let server = make_server();

    let response = server
        .post("/categories")
        .json(&json!({ "name": "Forbidden" }))
        .await;
    response.assert_status(axum::http::StatusCode::FORBIDDEN);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_rest_admin_inherits_write_through_hierarchy() {
    let server = make_server();

    // "admin" grants content:manage grants content:write
    let response = server
        .post("/categories")
        .add_header("x-permissions", "admin")
        .json(&json!({ "name": "Granted" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
}

#[tokio::test]
async fn test_rest_get_unknown_id_is_404() {
    let server = make_server();

    let response = server
        .get(&format!("/categories/{}", uuid::Uuid::new_v4()))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "ENTITY_NOT_FOUND");
}

#[tokio::test]
async fn test_rest_get_invalid_uuid_is_400() {
    let server = make_server();

    let response = server.get("/categories/not-a-uuid").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rest_delete_soft_deletes() {
    let server = make_server();

    let created = create_category(&server, "Temporary").await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .delete(&format!("/categories/{}", id))
        .add_header("x-permissions", "content:write")
        .await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    // Gone from reads
    let response = server.get(&format!("/categories/{}", id)).await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    // And a second delete is a 404, not a silent success
    let response = server
        .delete(&format!("/categories/{}", id))
        .add_header("x-permissions", "content:write")
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rest_user_can_delete_own_record_without_permission() {
    let server = make_server();

    let created = server
        .post("/users")
        .add_header("x-permissions", "content:write")
        .json(&json!({ "name": "Ada", "email": "ada@example.com" }))
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let body: serde_json::Value = created.json();
    let id = body["id"].as_str().unwrap();

    // No permissions, but the caller is the record's owner
    let response = server
        .delete(&format!("/users/{}", id))
        .add_header("x-user-id", id)
        .await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_rest_user_email_is_validated() {
    let server = make_server();

    let response = server
        .post("/users")
        .add_header("x-permissions", "content:write")
        .json(&json!({ "name": "Ada", "email": "not-an-email" }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ==============================================================
// Paginated listing
// ==============================================================

#[tokio::test]
async fn test_rest_list_follows_next_and_prev_urls() {
    let server = make_server();
    for name in ["algebra", "biology", "chemistry", "dynamics", "ecology"] {
        create_category(&server, name).await;
    }

    let response = server.get("/categories?cursor=name&order=asc&size=2").await;
    response.assert_status_ok();

    let p1: serde_json::Value = response.json();
    assert_eq!(p1["data"][0]["name"], "algebra");
    assert_eq!(p1["data"][1]["name"], "biology");
    assert_eq!(p1["meta"]["cursor"], "name");
    assert!(p1["meta"].get("prevCursor").is_none());

    // Follow the ready-made next URL
    let next_url = p1["meta"]["nextUrl"].as_str().unwrap();
    let response = server.get(&format!("/categories{}", next_url)).await;
    response.assert_status_ok();

    let p2: serde_json::Value = response.json();
    assert_eq!(p2["data"][0]["name"], "chemistry");
    assert_eq!(p2["data"][1]["name"], "dynamics");

    // And back again
    let prev_url = p2["meta"]["prevUrl"].as_str().unwrap();
    let response = server.get(&format!("/categories{}", prev_url)).await;
    response.assert_status_ok();

    let back: serde_json::Value = response.json();
    assert_eq!(back["data"][0]["name"], "algebra");
    assert_eq!(back["data"][1]["name"], "biology");
}

#[tokio::test]
async fn test_rest_list_excludes_soft_deleted() {
    let server = make_server();

    create_category(&server, "keep one").await;
    let doomed = create_category(&server, "remove me").await;
    create_category(&server, "keep two").await;

    server
        .delete(&format!("/categories/{}", doomed["id"].as_str().unwrap()))
        .add_header("x-permissions", "content:write")
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    let response = server.get("/categories?cursor=name&order=asc&size=10").await;
    let body: serde_json::Value = response.json();

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["keep one", "keep two"]);
}

#[tokio::test]
async fn test_rest_list_empty_collection() {
    let server = make_server();

    let response = server.get("/exams").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert!(body["meta"].get("nextCursor").is_none());
    assert!(body["meta"].get("prevCursor").is_none());
}

#[tokio::test]
async fn test_rest_list_filters_questions_by_category() {
    let server = make_server();

    let math = create_category(&server, "math").await;
    let math_id = math["id"].as_str().unwrap();
    let misc = create_category(&server, "misc").await;
    let misc_id = misc["id"].as_str().unwrap();

    for (name, category) in [
        ("q1", math_id),
        ("q2", misc_id),
        ("q3", math_id),
    ] {
        server
            .post("/questions")
            .add_header("x-permissions", "content:write")
            .json(&json!({
                "name": name,
                "category_id": category,
                "prompt": "?",
                "points": 2
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let response = server
        .get(&format!("/questions?category={}&cursor=name&order=asc", math_id))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["q1", "q3"]);
}

#[tokio::test]
async fn test_rest_list_search_by_name() {
    let server = make_server();
    for name in ["linear algebra", "organic chemistry", "abstract algebra"] {
        create_category(&server, name).await;
    }

    let response = server
        .get("/categories?search=algebra&cursor=name&order=asc")
        .await;
    let body: serde_json::Value = response.json();

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["abstract algebra", "linear algebra"]);
}

// ==============================================================
// Listing error handling
// ==============================================================

#[tokio::test]
async fn test_rest_malformed_cursor_is_400() {
    let server = make_server();
    create_category(&server, "anything").await;

    let response = server.get("/categories?nextCursor=garbage").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "MALFORMED_CURSOR");
}

#[tokio::test]
async fn test_rest_unlisted_cursor_field_is_400() {
    let server = make_server();

    let response = server.get("/categories?cursor=secret").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rest_list_respects_configured_allow_list() {
    let mut config = ApiConfig::default_config();
    config
        .cursor_fields
        .insert("users".to_string(), vec!["name".to_string()]);

    let state = AppState::in_memory(config);
    let server = TestServer::try_new(build_router(state)).unwrap();

    // "email" is sortable on the entity but kept off this allow-list
    let response = server.get("/users?cursor=email").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let response = server.get("/users?cursor=name").await;
    response.assert_status_ok();
}
