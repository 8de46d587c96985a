//! HTTP-level integration tests for topics, contributions, votes and topic
//! documents.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, claimed_agent, delete_auth, get, post_auth, post_json_auth, put_json_auth,
    register_user,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_topic(app: &axum::Router, token: &str, title: &str) -> Value {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/topics",
        token,
        json!({ "title": title, "description": "Let's discuss", "categories": ["Design"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn blocks(texts: &[&str]) -> Value {
    let list: Vec<Value> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| json!({ "id": format!("b{i}"), "type": "paragraph", "content": t }))
        .collect();
    Value::Array(list)
}

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_topic_derives_slug(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "alice").await;

    let topic = create_topic(&app, &token, "Async Runtimes Compared").await;
    assert_eq!(topic["slug"], "async-runtimes-compared");
    assert_eq!(topic["created_by"], "alice");
    assert_eq!(topic["categories"], json!(["Design"]));

    let response = get(app, "/api/v1/topics/async-runtimes-compared").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["score"], 0);
    assert_eq!(json["contribution_count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_topic_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "alice").await;
    create_topic(&app, &token, "Same Title").await;

    let response = post_json_auth(
        app,
        "/api/v1/topics",
        &token,
        json!({ "title": "same title" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_short_topic_title_returns_422(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "alice").await;
    let response =
        post_json_auth(app, "/api/v1/topics", &token, json!({ "title": "ab" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_missing_topic_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/topics/none").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_topic_votes_are_idempotent_and_flip(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "alice").await;
    let key = claimed_agent(&app, "voter").await;
    create_topic(&app, &token, "Voting Topic").await;

    post_auth(app.clone(), "/api/v1/topics/voting-topic/upvote", &key).await;
    let tally = body_json(post_auth(app.clone(), "/api/v1/topics/voting-topic/upvote", &key).await).await;
    assert_eq!(tally["upvotes"], 1);
    assert_eq!(tally["score"], 1);

    let tally = body_json(post_auth(app.clone(), "/api/v1/topics/voting-topic/upvote", &token).await).await;
    assert_eq!(tally["upvotes"], 2);

    let tally = body_json(post_auth(app.clone(), "/api/v1/topics/voting-topic/downvote", &key).await).await;
    assert_eq!(tally["upvotes"], 1);
    assert_eq!(tally["downvotes"], 1);
    assert_eq!(tally["score"], 0);

    let response = delete_auth(app.clone(), "/api/v1/topics/voting-topic/vote", &key).await;
    assert_eq!(response.status(), StatusCode::OK);
    let tally = body_json(response).await;
    assert_eq!(tally["downvotes"], 0);
    assert_eq!(tally["score"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_topics_sorted_by_score(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "alice").await;
    create_topic(&app, &token, "Popular One").await;
    create_topic(&app, &token, "Newer One").await;
    post_auth(app.clone(), "/api/v1/topics/popular-one/upvote", &token).await;

    let recent = body_json(get(app.clone(), "/api/v1/topics").await).await;
    assert_eq!(recent[0]["slug"], "newer-one");

    let top = body_json(get(app.clone(), "/api/v1/topics?sort=top").await).await;
    assert_eq!(top[0]["slug"], "popular-one");

    let filtered = body_json(get(app.clone(), "/api/v1/topics?category=Nope").await).await;
    assert_eq!(filtered.as_array().unwrap().len(), 0);

    let paged = body_json(get(app, "/api/v1/topics?limit=1&offset=1").await).await;
    assert_eq!(paged.as_array().unwrap().len(), 1);
    assert_eq!(paged[0]["slug"], "popular-one");
}

// ---------------------------------------------------------------------------
// Contributions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_contributions_thread_and_votes(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "alice").await;
    let key = claimed_agent(&app, "coder").await;
    create_topic(&app, &token, "Code Review").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/topics/code-review/contribute",
        &key,
        json!({ "content_type": "code", "content": "fn main() {}", "language": "rust" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let code = body_json(response).await;
    assert_eq!(code["content_type"], "code");
    assert_eq!(code["author_type"], "agent");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/topics/code-review/contribute",
        &token,
        json!({
            "content_type": "link",
            "file_url": "https://doc.rust-lang.org/book/",
            "reply_to": code["id"],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/v1/contributions/{}/upvote", code["id"]);
    let tally = body_json(post_auth(app.clone(), &uri, &token).await).await;
    assert_eq!(tally["upvotes"], 1);

    let list = body_json(get(app.clone(), "/api/v1/topics/code-review/contributions").await).await;
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["upvotes"], 1);
    assert_eq!(items[1]["reply_to"], code["id"]);

    let topic = body_json(get(app, "/api/v1/topics/code-review").await).await;
    assert_eq!(topic["contribution_count"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_contribution_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "alice").await;
    create_topic(&app, &token, "Checks Here").await;
    create_topic(&app, &token, "Other Topic").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/topics/checks-here/contribute",
        &token,
        json!({ "content_type": "link" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/topics/checks-here/contribute",
        &token,
        json!({ "content_type": "text", "content": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let other = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/topics/other-topic/contribute",
            &token,
            json!({ "content_type": "text", "content": "elsewhere" }),
        )
        .await,
    )
    .await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/topics/checks-here/contribute",
        &token,
        json!({ "content_type": "text", "content": "reply", "reply_to": other["id"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = post_auth(app, "/api/v1/contributions/999999/upvote", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_document_versions_and_revert(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "alice").await;
    create_topic(&app, &token, "Shared Doc").await;

    let response = get(app.clone(), "/api/v1/topics/shared-doc/document").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let first = body_json(
        put_json_auth(
            app.clone(),
            "/api/v1/topics/shared-doc/document",
            &token,
            json!({ "blocks": blocks(&["intro"]) }),
        )
        .await,
    )
    .await;
    assert_eq!(first["version"], 1);

    let second = body_json(
        put_json_auth(
            app.clone(),
            "/api/v1/topics/shared-doc/document",
            &token,
            json!({ "blocks": blocks(&["intro", "more"]), "edit_summary": "extend" }),
        )
        .await,
    )
    .await;
    assert_eq!(second["version"], 2);
    assert_eq!(second["blocks"].as_array().unwrap().len(), 2);

    let response = post_auth(
        app.clone(),
        "/api/v1/topics/shared-doc/document/revert/1",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let reverted = body_json(response).await;
    assert_eq!(reverted["version"], 3);
    assert_eq!(reverted["blocks"], first["blocks"]);

    let history = body_json(get(app, "/api/v1/topics/shared-doc/document/history").await).await;
    let versions: Vec<i64> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["version"].as_i64().unwrap())
        .collect();
    assert_eq!(versions, vec![3, 2, 1]);
    assert_eq!(history[0]["edit_summary"], "Reverted to version 1");
    assert_eq!(history[1]["edit_summary"], "extend");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_document_rejects_duplicate_block_ids(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "alice").await;
    create_topic(&app, &token, "Strict Doc").await;

    let duplicated = json!([
        { "id": "x", "type": "heading", "content": "Title" },
        { "id": "x", "type": "paragraph", "content": "Body" },
    ]);
    let response = put_json_auth(
        app.clone(),
        "/api/v1/topics/strict-doc/document",
        &token,
        json!({ "blocks": duplicated }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = post_auth(app, "/api/v1/topics/strict-doc/document/revert/7", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
