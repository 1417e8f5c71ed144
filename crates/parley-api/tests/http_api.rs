//! In-process HTTP tests driving the full router.

use axum::Router;
use axum::body::Body;
use axum::http::header::{ALLOW, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use parley_api::http::router::build_router;
use parley_api::state::AppState;
use parley_infra::sqlite::pool::DatabasePool;
use parley_types::config::ServerConfig;

async fn app() -> Router {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("http.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    // Leak tempdir so it lives for the test
    std::mem::forget(dir);

    let pool = DatabasePool::new(&url).await.unwrap();
    build_router(AppState::new(pool), &ServerConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn create_user(app: &Router, username: &str) -> i64 {
    let (status, body) = post(app, "/users/add", json!({ "username": username })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_chat(app: &Router, name: &str, users: &[i64]) -> i64 {
    let (status, body) = post(app, "/chats/add", json!({ "name": name, "users": users })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_message(app: &Router, chat: i64, author: i64, text: &str) -> i64 {
    let (status, body) = post(
        app,
        "/messages/add",
        json!({ "chat": chat, "author": author, "text": text }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = app().await;
    assert_eq!(create_user(&app, "alice").await, 1);

    let (status, body) = post(&app, "/users/add", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "User already exists" }));
}

#[tokio::test]
async fn field_validation_messages() {
    let app = app().await;

    let cases = [
        ("/users/add", json!({}), "Missing field \"username\""),
        ("/users/add", json!({ "username": 7 }), "Field \"username\" must be a string"),
        ("/users/add", json!({ "username": "" }), "Field \"username\" must have non-zero length"),
        ("/users/add", json!(["alice"]), "Request body must be a JSON object"),
        ("/chats/add", json!({ "name": "c", "users": 1 }), "Field \"users\" must be an array"),
        (
            "/chats/add",
            json!({ "name": "c", "users": [] }),
            "Field \"users\" must contain at least one user id",
        ),
        (
            "/chats/add",
            json!({ "name": "c", "users": ["1"] }),
            "Each item in \"users\" array must be a 64-bit integer value",
        ),
        (
            "/chats/add",
            json!({ "name": "c", "users": [0] }),
            "Each item in \"users\" array must be a valid user id greater than zero",
        ),
        (
            "/messages/add",
            json!({ "chat": 1.5, "author": 1, "text": "hi" }),
            "Field \"chat\" must be a 64-bit integer value",
        ),
        (
            "/messages/add",
            json!({ "chat": 1, "author": -3, "text": "hi" }),
            "Field \"author\" must be a valid id greater than zero",
        ),
        ("/chats/get", json!({ "user": 0 }), "Field \"user\" must be a valid id greater than zero"),
        ("/messages/get", json!({}), "Missing field \"chat\""),
    ];

    for (uri, body, message) in cases {
        let (status, response) = post(&app, uri, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert_eq!(response, json!({ "error": message }), "{uri} {body}");
    }
}

#[tokio::test]
async fn payload_checks() {
    let app = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users/add")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"username":"alice"}"#))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], "Content-Type header must be application/json");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users/add")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No body provided");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users/add")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Malformed JSON");
}

#[tokio::test]
async fn get_is_method_not_allowed() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::GET)
        .uri("/users/add")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let allow = response.headers().get(ALLOW).unwrap().to_str().unwrap();
    assert!(allow.contains("POST"));
}

#[tokio::test]
async fn chat_creation_errors() {
    let app = app().await;
    let alice = create_user(&app, "alice").await;
    create_chat(&app, "general", &[alice]).await;

    let (status, body) = post(&app, "/chats/add", json!({ "name": "general", "users": [alice] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Chat already exists");

    let (status, body) = post(&app, "/chats/add", json!({ "name": "other", "users": [alice, 99] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad user list");
}

#[tokio::test]
async fn message_creation_errors() {
    let app = app().await;
    let alice = create_user(&app, "alice").await;
    let mallory = create_user(&app, "mallory").await;
    let chat = create_chat(&app, "private", &[alice]).await;

    let cases = [
        (json!({ "chat": 42, "author": alice, "text": "hi" }), "Chat with provided id does not exist"),
        (json!({ "chat": chat, "author": 42, "text": "hi" }), "Author with provided id does not exist"),
        (json!({ "chat": chat, "author": mallory, "text": "hi" }), "Author is not chat member"),
    ];
    for (body, message) in cases {
        let (status, response) = post(&app, "/messages/add", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], message);
    }

    let (status, body) = post(&app, "/messages/get", json!({ "chat": chat })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn read_errors() {
    let app = app().await;

    let (status, body) = post(&app, "/chats/get", json!({ "user": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User does not exist");

    let (status, body) = post(&app, "/messages/get", json!({ "chat": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Chat does not exist");
}

#[tokio::test]
async fn conversation_round_trip() {
    let app = app().await;
    let alice = create_user(&app, "alice").await;
    let bob = create_user(&app, "bob").await;
    let chat = create_chat(&app, "lunch", &[alice, bob]).await;

    let first = create_message(&app, chat, alice, "noon?").await;
    let second = create_message(&app, chat, bob, "sure").await;

    let (status, chats) = post(&app, "/chats/get", json!({ "user": bob })).await;
    assert_eq!(status, StatusCode::OK);
    let chats = chats.as_array().unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0]["id"], chat);
    assert_eq!(chats[0]["name"], "lunch");
    assert!(chats[0]["created_at"].is_string());
    let members: Vec<&str> = chats[0]["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(members, vec!["alice", "bob"]);

    let (status, messages) = post(&app, "/messages/get", json!({ "chat": chat })).await;
    assert_eq!(status, StatusCode::OK);
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["id"], first);
    assert_eq!(messages[0]["author"], alice);
    assert_eq!(messages[0]["text"], "noon?");
    assert_eq!(messages[1]["id"], second);
    assert_eq!(messages[1]["chat"], chat);
    assert_eq!(messages[1]["text"], "sure");
}
