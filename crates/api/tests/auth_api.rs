//! HTTP-level integration tests for agent and user identities and the
//! contributor gate.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, post_auth, post_json, post_json_auth, register_agent,
    register_user,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_agent_returns_key_once(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/agents/register",
        json!({ "name": "scribe", "description": "writes things" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["agent"]["name"], "scribe");
    assert!(json["agent"]["api_key"]
        .as_str()
        .unwrap()
        .starts_with("clawcollab_"));
    assert!(json["agent"]["claim_url"]
        .as_str()
        .unwrap()
        .starts_with("http://wiki.test/claim/clawcollab_claim_"));
    assert!(json["agent"]["verification_code"].as_str().unwrap().contains('-'));
    assert!(json["important"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_agent_name_is_case_insensitive_unique(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_agent(&app, "Scribe").await;

    let response = post_json(app, "/api/v1/agents/register", json!({ "name": "scribe" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_agent_rejects_bad_names(pool: PgPool) {
    let app = common::build_test_app(pool);

    let too_long = "x".repeat(33);
    for name in ["a", "has space", too_long.as_str()] {
        let response =
            post_json(app.clone(), "/api/v1/agents/register", json!({ "name": name })).await;
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "name {name:?} should be rejected"
        );
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unclaimed_agent_cannot_write(pool: PgPool) {
    let app = common::build_test_app(pool);
    let key = register_agent(&app, "fresh").await;

    let response = post_json_auth(
        app,
        "/wiki/test",
        &key,
        json!({ "title": "Test", "content": "body" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_agent_key_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/agents/me", "clawcollab_not-a-real-key").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_claim_flow(pool: PgPool) {
    let app = common::build_test_app(pool);
    let key = register_agent(&app, "claimer").await;

    let status = body_json(get_auth(app.clone(), "/api/v1/agents/status", &key).await).await;
    assert_eq!(status["status"], "pending_claim");

    let response = post_auth(app.clone(), "/api/v1/agents/quick-claim", &key).await;
    assert_eq!(response.status(), StatusCode::OK);
    let claimed = body_json(response).await;
    assert_eq!(claimed["agent"]["is_claimed"], true);
    let claimed_at = claimed["agent"]["claimed_at"].clone();
    assert!(claimed_at.is_string());

    // Claiming again is a no-op that keeps the original timestamp.
    let again = body_json(post_auth(app.clone(), "/api/v1/agents/quick-claim", &key).await).await;
    assert_eq!(again["agent"]["claimed_at"], claimed_at);

    let status = body_json(get_auth(app.clone(), "/api/v1/agents/status", &key).await).await;
    assert_eq!(status["status"], "claimed");

    let me = body_json(get_auth(app, "/api/v1/agents/me", &key).await).await;
    assert_eq!(me["agent"]["name"], "claimer");
    assert!(me["agent"].get("api_key_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_agent_edit_count_tracks_revisions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let key = common::claimed_agent(&app, "counter").await;
    common::create_article(&app, &key, "counted", "Counted", "one").await;
    common::patch_json_auth(app.clone(), "/wiki/counted", &key, json!({ "content": "two" })).await;

    let me = body_json(get_auth(app, "/api/v1/agents/me", &key).await).await;
    assert_eq!(me["agent"]["edit_count"], 2);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_user_register_login_me(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "alice").await;

    let response = post_json(
        app.clone(),
        "/api/v1/users/login",
        json!({ "username": "ALICE", "password": "hunter22" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["username"], "alice");
    assert!(json["user"].get("password_hash").is_none());
    let token = json["token"].as_str().unwrap().to_string();

    let me = body_json(get_auth(app, "/api/v1/users/me", &token).await).await;
    assert_eq!(me["user"]["email"], "alice@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "bob").await;

    let response = post_json(
        app.clone(),
        "/api/v1/users/login",
        json!({ "username": "bob", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        app,
        "/api/v1/users/login",
        json!({ "username": "nobody", "password": "hunter22" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_username_or_email_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "carol").await;

    let response = post_json(
        app.clone(),
        "/api/v1/users/register",
        json!({ "username": "Carol", "email": "other@example.com", "password": "hunter22" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        app,
        "/api/v1/users/register",
        json!({ "username": "carol2", "email": "CAROL@example.com", "password": "hunter22" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_user_validation(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/users/register",
        json!({ "username": "dave", "email": "not-an-email", "password": "hunter22" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = post_json(
        app,
        "/api/v1/users/register",
        json!({ "username": "dave", "email": "dave@example.com", "password": "123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_identity_routes_reject_the_other_kind(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "erin").await;
    let key = register_agent(&app, "erinbot").await;

    let response = get_auth(app.clone(), "/api/v1/agents/me", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.clone(), "/api/v1/users/me", &key).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/users/me", "garbage.jwt.token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_authorization_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
