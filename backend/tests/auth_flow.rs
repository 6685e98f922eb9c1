use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use credgate::config::Config;
use credgate::database::Database;
use credgate::state::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

// Helper to create an app backed by a fresh in-memory database
async fn test_app() -> (Router, AppState) {
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "DB_MAX_CONNECTIONS" => Some("1".to_string()),
        "JWT_SECRET" => Some("integration-test-secret".to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .unwrap();

    let db = Database::new(&config).await.unwrap();
    db.migrate().await.unwrap();

    let state = credgate::build_state(&config, &db).unwrap();
    (credgate::app(state.clone(), &config), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_auth(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

fn jane() -> Value {
    json!({"name": "Jane", "email": "jane@x.com", "password": "secret1"})
}

fn without_timestamp(mut body: Value) -> Value {
    body.as_object_mut().unwrap().remove("timestamp");
    body
}

#[tokio::test]
async fn test_register_then_login() {
    let (app, state) = test_app().await;

    let (status, registered) = send(&app, post_json("/auth/register", jane())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registered["success"], true);
    let t1 = registered["data"]["token"].as_str().unwrap().to_string();
    let subject = registered["data"]["user"]["id"].as_str().unwrap().to_string();
    assert_eq!(registered["data"]["user"]["email"], "jane@x.com");
    assert!(registered["data"]["user"].get("password_hash").is_none());
    assert!(registered["data"]["expires_at"].is_string());

    let (status, logged_in) = send(
        &app,
        post_json(
            "/auth/login",
            json!({"email": "jane@x.com", "password": "secret1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let t2 = logged_in["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(logged_in["data"]["user"]["id"], subject.as_str());

    for token in [&t1, &t2] {
        let claims = state.jwt_utils().validate_token(token).unwrap();
        assert_eq!(claims.sub, subject);
        assert_eq!(claims.token_type, "access");

        let (status, me) = send(
            &app,
            get_with_auth("/auth/me", Some(&format!("Bearer {}", token))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["data"]["id"], subject.as_str());
        assert_eq!(me["data"]["name"], "Jane");
    }
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let (app, _) = test_app().await;

    let (status, _) = send(&app, post_json("/auth/register", jane())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post_json("/auth/register", jane())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "USER_ALREADY_EXISTS");

    // The first credential still logs in.
    let (status, _) = send(
        &app,
        post_json(
            "/auth/login",
            json!({"email": "jane@x.com", "password": "secret1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _) = test_app().await;
    send(&app, post_json("/auth/register", jane())).await;

    let (unknown_status, unknown_body) = send(
        &app,
        post_json(
            "/auth/login",
            json!({"email": "nobody@x.com", "password": "secret1"}),
        ),
    )
    .await;
    let (wrong_status, wrong_body) = send(
        &app,
        post_json(
            "/auth/login",
            json!({"email": "jane@x.com", "password": "not-the-password"}),
        ),
    )
    .await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_body["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(without_timestamp(unknown_body), without_timestamp(wrong_body));
}

#[tokio::test]
async fn test_invalid_input_is_bad_request() {
    let (app, _) = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"name": "Jane", "email": "not-an-email", "password": "secret1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["field"], "email");

    let malformed = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let (status, body) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, post_json("/auth/login", json!({"email": "jane@x.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let long_password = format!("{}REAL-SUFFIX", "a".repeat(72));
    let (status, body) = send(
        &app,
        post_json(
            "/auth/register",
            json!({"name": "Jane", "email": "jane@x.com", "password": long_password}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "password");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let (app, _) = test_app().await;

    let (status, body) = send(&app, get_with_auth("/health/protected", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "TOKEN_REQUIRED");

    let (status, body) = send(&app, get_with_auth("/health/protected", Some(""))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "TOKEN_REQUIRED");

    let (status, body) = send(&app, get_with_auth("/health/protected", Some("Token xyz"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");

    let (status, body) = send(&app, get_with_auth("/auth/me", Some("Bearer not.a.jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_protected_route_rejects_expired_and_tampered_tokens() {
    let (app, state) = test_app().await;

    let expired = state
        .jwt_utils()
        .issue_at("some-subject", Utc::now() - Duration::hours(7))
        .unwrap();
    let (status, body) = send(
        &app,
        get_with_auth(
            "/health/protected",
            Some(&format!("Bearer {}", expired.token)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");

    let valid = state.jwt_utils().issue("some-subject").unwrap();
    let (head, signature) = valid.token.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{}.{}{}", head, flipped, &signature[1..]);
    let (status, body) = send(
        &app,
        get_with_auth("/health/protected", Some(&format!("Bearer {}", tampered))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_protected_route_admits_valid_token() {
    let (app, state) = test_app().await;

    let issued = state.jwt_utils().issue("0190b3c2-subject").unwrap();
    let (status, body) = send(
        &app,
        get_with_auth(
            "/health/protected",
            Some(&format!("Bearer {}", issued.token)),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], "0190b3c2-subject");
}

#[tokio::test]
async fn test_me_for_deleted_subject_is_invalid_token() {
    let (app, state) = test_app().await;

    let issued = state.jwt_utils().issue("never-registered").unwrap();
    let (status, body) = send(
        &app,
        get_with_auth("/auth/me", Some(&format!("Bearer {}", issued.token))),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_public_health_and_unknown_route() {
    let (app, _) = test_app().await;

    let (status, body) = send(&app, get_with_auth("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["service"], "credgate");

    let (status, body) = send(&app, get_with_auth("/does-not-exist", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "ROUTE_NOT_FOUND");
}

#[tokio::test]
async fn test_cors_headers_on_api_routes() {
    let (app, _) = test_app().await;

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://frontend.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
