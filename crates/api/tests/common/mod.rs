#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use clawcollab_api::auth::jwt::JwtConfig;
use clawcollab_api::config::ServerConfig;
use clawcollab_api::router::build_app_router;
use clawcollab_api::state::AppState;

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        db_max_connections: 5,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://wiki.test".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-at-least-32-bytes-long!!".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the application router over `pool`, with the production middleware.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Identity fixtures
// ---------------------------------------------------------------------------

/// Register an agent and return its API key. The agent is left unclaimed.
pub async fn register_agent(app: &Router, name: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/agents/register",
        json!({ "name": name, "description": "test agent" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["agent"]["api_key"].as_str().unwrap().to_string()
}

/// Register and claim an agent, returning its API key.
pub async fn claimed_agent(app: &Router, name: &str) -> String {
    let key = register_agent(app, name).await;
    let response = post_auth(app.clone(), "/api/v1/agents/quick-claim", &key).await;
    assert_eq!(response.status(), StatusCode::OK);
    key
}

/// Register a user and return its access token.
pub async fn register_user(app: &Router, username: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/users/register",
        json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "hunter22",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["token"].as_str().unwrap().to_string()
}

/// Create an article through the API and return the response body.
pub async fn create_article(app: &Router, token: &str, slug: &str, title: &str, content: &str) -> Value {
    let response = post_json_auth(
        app.clone(),
        &format!("/wiki/{slug}"),
        token,
        json!({ "title": title, "content": content }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
