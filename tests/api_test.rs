use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::json;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

use codebattle::api::models::{ApiProblem, ProgrammerCollection, ProgrammerRepresentation};
use codebattle::api::state::AppState;
use codebattle::api::{router, Principal};
use codebattle::config::Config;
use codebattle::store::Repository;

/// Creates a minimal config for testing, bypassing file-based loading
fn create_test_config() -> Config {
    let config_toml = r#"
[server]
bind_addr = "127.0.0.1:8080"
data_path = "/tmp/unused"

[principal]
username = "weaverryan"
    "#;

    toml::from_str(config_toml).expect("Failed to parse test config")
}

/// Builds a test app with an isolated store
fn build_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let store = Repository::open(temp_dir.path().join("store"))
        .expect("Failed to open test store");

    let principal_user = store
        .find_or_create_user("weaverryan")
        .expect("Failed to create principal user");
    let principal = Principal::from(&principal_user);

    let state = AppState::new(create_test_config(), store);
    let app = router(state, principal);

    (app, temp_dir)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    ServiceExt::<Request<Body>>::oneshot(app.clone(), request)
        .await
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(
    response: axum::response::Response,
) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn weaverryan_payload() -> serde_json::Value {
    json!({
        "nickname": "weaverryan",
        "avatarNumber": 3,
        "tagLine": "Symfony"
    })
}

#[tokio::test]
async fn test_create_programmer_success() {
    let (app, _temp_dir) = build_test_app();

    let response = send(
        &app,
        json_request("POST", "/api/programmers", weaverryan_payload()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/programmers/weaverryan"
    );

    let programmer: ProgrammerRepresentation = body_json(response).await;
    assert_eq!(programmer.nickname, "weaverryan");
    assert_eq!(programmer.avatar_number, 3);
    assert_eq!(programmer.tag_line.as_deref(), Some("Symfony"));
    // power level is assigned server-side, never taken from the client
    assert!(programmer.power_level > 0);
}

#[tokio::test]
async fn test_create_then_show_round_trip() {
    let (app, _temp_dir) = build_test_app();

    let create_response = send(
        &app,
        json_request("POST", "/api/programmers", weaverryan_payload()),
    )
    .await;
    assert_eq!(create_response.status(), StatusCode::CREATED);
    let created: ProgrammerRepresentation = body_json(create_response).await;

    let show_response = send(&app, get_request("/api/programmers/weaverryan")).await;
    assert_eq!(show_response.status(), StatusCode::OK);
    let shown: ProgrammerRepresentation = body_json(show_response).await;

    assert_eq!(created, shown);
}

#[tokio::test]
async fn test_create_ignores_client_power_level() {
    let (app, _temp_dir) = build_test_app();

    let mut payload = weaverryan_payload();
    payload["powerLevel"] = json!(9999);

    let response = send(&app, json_request("POST", "/api/programmers", payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let programmer: ProgrammerRepresentation = body_json(response).await;
    assert_ne!(programmer.power_level, 9999);
}

#[tokio::test]
async fn test_create_missing_nickname_returns_validation_problem() {
    let (app, _temp_dir) = build_test_app();

    let response = send(
        &app,
        json_request("POST", "/api/programmers", json!({"avatarNumber": 3})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );

    let problem: ApiProblem = body_json(response).await;
    assert_eq!(problem.problem_type, "validation_error");
    assert_eq!(problem.title, "There was a validation error");
    assert!(problem.errors.contains_key("nickname"));

    // nothing was persisted
    let list_response = send(&app, get_request("/api/programmers")).await;
    let collection: ProgrammerCollection = body_json(list_response).await;
    assert!(collection.programmers.is_empty());
}

#[tokio::test]
async fn test_create_duplicate_nickname_does_not_clobber() {
    let (app, _temp_dir) = build_test_app();

    let first = send(
        &app,
        json_request("POST", "/api/programmers", weaverryan_payload()),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send(
        &app,
        json_request(
            "POST",
            "/api/programmers",
            json!({"nickname": "weaverryan", "avatarNumber": 5, "tagLine": "clobbered"}),
        ),
    )
    .await;

    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let problem: ApiProblem = body_json(second).await;
    assert_eq!(problem.problem_type, "validation_error");
    assert!(problem.errors.contains_key("nickname"));

    // the original record is untouched
    let show = send(&app, get_request("/api/programmers/weaverryan")).await;
    let programmer: ProgrammerRepresentation = body_json(show).await;
    assert_eq!(programmer.avatar_number, 3);
    assert_eq!(programmer.tag_line.as_deref(), Some("Symfony"));

    let list = send(&app, get_request("/api/programmers")).await;
    let collection: ProgrammerCollection = body_json(list).await;
    assert_eq!(collection.programmers.len(), 1);
}

#[tokio::test]
async fn test_create_rejects_nickname_unfit_for_urls() {
    let (app, _temp_dir) = build_test_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/programmers",
            json!({"nickname": "a/b", "avatarNumber": 3}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let problem: ApiProblem = body_json(response).await;
    assert!(problem.errors.contains_key("nickname"));
}

#[tokio::test]
async fn test_create_invalid_avatar_returns_validation_problem() {
    let (app, _temp_dir) = build_test_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/programmers",
            json!({"nickname": "weaverryan", "avatarNumber": 42}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let problem: ApiProblem = body_json(response).await;
    assert!(problem.errors.contains_key("avatarNumber"));
}

#[tokio::test]
async fn test_create_malformed_json_returns_400() {
    let (app, _temp_dir) = build_test_app();

    let request = Request::builder()
        .uri("/api/programmers")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );

    let problem: ApiProblem = body_json(response).await;
    assert_eq!(problem.problem_type, "invalid_body_format");
}

#[tokio::test]
async fn test_create_oversized_body_returns_413() {
    let (app, _temp_dir) = build_test_app();

    let mut payload = weaverryan_payload();
    payload["tagLine"] = json!("x".repeat(100 * 1024));

    let response = send(&app, json_request("POST", "/api/programmers", payload)).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_show_missing_programmer_returns_404() {
    let (app, _temp_dir) = build_test_app();

    let response = send(&app, get_request("/api/programmers/nobody")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let message = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(message.contains("nobody"));
}

#[tokio::test]
async fn test_list_returns_all_created_programmers() {
    let (app, _temp_dir) = build_test_app();

    for nickname in ["alice", "bob", "carol"] {
        let response = send(
            &app,
            json_request(
                "POST",
                "/api/programmers",
                json!({"nickname": nickname, "avatarNumber": 2}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = send(&app, get_request("/api/programmers")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let collection: ProgrammerCollection = body_json(response).await;
    assert_eq!(collection.programmers.len(), 3);
    let nicknames: Vec<_> = collection
        .programmers
        .iter()
        .map(|p| p.nickname.as_str())
        .collect();
    assert_eq!(nicknames, vec!["alice", "bob", "carol"]);
}

#[tokio::test]
async fn test_patch_tag_line_leaves_avatar_unchanged() {
    let (app, _temp_dir) = build_test_app();
    send(
        &app,
        json_request("POST", "/api/programmers", weaverryan_payload()),
    )
    .await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            "/api/programmers/weaverryan",
            json!({"tagLine": "likes to hack"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let programmer: ProgrammerRepresentation = body_json(response).await;
    assert_eq!(programmer.avatar_number, 3);
    assert_eq!(programmer.tag_line.as_deref(), Some("likes to hack"));
}

#[tokio::test]
async fn test_patch_avatar_leaves_tag_line_unchanged() {
    let (app, _temp_dir) = build_test_app();
    send(
        &app,
        json_request("POST", "/api/programmers", weaverryan_payload()),
    )
    .await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            "/api/programmers/weaverryan",
            json!({"avatarNumber": 5}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let programmer: ProgrammerRepresentation = body_json(response).await;
    assert_eq!(programmer.avatar_number, 5);
    assert_eq!(programmer.tag_line.as_deref(), Some("Symfony"));
}

#[tokio::test]
async fn test_put_also_skips_missing_fields() {
    let (app, _temp_dir) = build_test_app();
    send(
        &app,
        json_request("POST", "/api/programmers", weaverryan_payload()),
    )
    .await;

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/programmers/weaverryan",
            json!({"avatarNumber": 2}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let programmer: ProgrammerRepresentation = body_json(response).await;
    assert_eq!(programmer.avatar_number, 2);
    // tagLine was absent from the PUT body but survives the update
    assert_eq!(programmer.tag_line.as_deref(), Some("Symfony"));
}

#[tokio::test]
async fn test_update_cannot_change_nickname() {
    let (app, _temp_dir) = build_test_app();
    send(
        &app,
        json_request("POST", "/api/programmers", weaverryan_payload()),
    )
    .await;

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/programmers/weaverryan",
            json!({"nickname": "hacker", "avatarNumber": 2}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let programmer: ProgrammerRepresentation = body_json(response).await;
    assert_eq!(programmer.nickname, "weaverryan");

    // still reachable under the original nickname, not the attempted one
    let old = send(&app, get_request("/api/programmers/weaverryan")).await;
    assert_eq!(old.status(), StatusCode::OK);
    let renamed = send(&app, get_request("/api/programmers/hacker")).await;
    assert_eq!(renamed.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_programmer_returns_404() {
    let (app, _temp_dir) = build_test_app();

    let response = send(
        &app,
        json_request(
            "PATCH",
            "/api/programmers/nobody",
            json!({"tagLine": "hello"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_invalid_avatar_returns_validation_problem() {
    let (app, _temp_dir) = build_test_app();
    send(
        &app,
        json_request("POST", "/api/programmers", weaverryan_payload()),
    )
    .await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            "/api/programmers/weaverryan",
            json!({"avatarNumber": 0}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let problem: ApiProblem = body_json(response).await;
    assert_eq!(problem.problem_type, "validation_error");
    assert!(problem.errors.contains_key("avatarNumber"));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (app, _temp_dir) = build_test_app();
    send(
        &app,
        json_request("POST", "/api/programmers", weaverryan_payload()),
    )
    .await;

    let delete_request = || {
        Request::builder()
            .uri("/api/programmers/weaverryan")
            .method("DELETE")
            .body(Body::empty())
            .unwrap()
    };

    let first = send(&app, delete_request()).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    // gone from show and list
    let show = send(&app, get_request("/api/programmers/weaverryan")).await;
    assert_eq!(show.status(), StatusCode::NOT_FOUND);
    let list = send(&app, get_request("/api/programmers")).await;
    let collection: ProgrammerCollection = body_json(list).await;
    assert!(collection.programmers.is_empty());

    // deleting again still succeeds
    let second = send(&app, delete_request()).await;
    assert_eq!(second.status(), StatusCode::NO_CONTENT);
}
