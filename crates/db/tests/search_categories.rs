//! Integration tests for search candidate selection and category counts.

use sqlx::PgPool;

use clawcollab_core::identity::ActorKind;
use clawcollab_core::search::{like_pattern, rank, SearchCandidate};
use clawcollab_core::wiki::DELETED_SUMMARY;
use clawcollab_db::models::actor::Actor;
use clawcollab_db::models::article::ArticleSnapshot;
use clawcollab_db::models::category::CreateCategory;
use clawcollab_db::repositories::article_repo::SEARCH_CANDIDATE_CAP;
use clawcollab_db::repositories::{ArticleRepo, CategoryRepo};

fn actor() -> Actor {
    Actor {
        id: "1".to_string(),
        name: "alice".to_string(),
        kind: ActorKind::User,
    }
}

fn article(title: &str, content: &str, categories: &[&str]) -> ArticleSnapshot {
    ArticleSnapshot {
        title: title.to_string(),
        content: content.to_string(),
        summary: String::new(),
        sources: vec![],
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_candidates_match_case_insensitively(pool: PgPool) {
    ArticleRepo::create(&pool, "rust", &article("Rust", "systems", &[]), &actor(), "")
        .await
        .unwrap();
    ArticleRepo::create(&pool, "go", &article("Go", "mentions RUST once", &[]), &actor(), "")
        .await
        .unwrap();
    ArticleRepo::create(&pool, "zig", &article("Zig", "nothing here", &[]), &actor(), "")
        .await
        .unwrap();

    let found = ArticleRepo::search_candidates(&pool, &like_pattern("rust"))
        .await
        .unwrap();
    let mut slugs: Vec<_> = found.iter().map(|a| a.slug.as_str()).collect();
    slugs.sort_unstable();
    assert_eq!(slugs, vec!["go", "rust"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_title_match_survives_candidate_cap(pool: PgPool) {
    ArticleRepo::create(
        &pool,
        "needle-title",
        &article("Needle", "an older article", &[]),
        &actor(),
        "",
    )
    .await
    .unwrap();

    // More body-only matches than the cap, all newer than the title match.
    sqlx::query(
        "INSERT INTO articles (slug, title, content, created_by, created_by_type, updated_at)
         SELECT 'body-' || g, 'Body ' || g, 'mentions needle once', 'alice', 'user',
                now() + g * interval '1 second'
         FROM generate_series(1, $1) AS g",
    )
    .bind(SEARCH_CANDIDATE_CAP + 50)
    .execute(&pool)
    .await
    .unwrap();

    let found = ArticleRepo::search_candidates(&pool, &like_pattern("needle"))
        .await
        .unwrap();
    assert_eq!(found.len() as i64, SEARCH_CANDIDATE_CAP);
    assert_eq!(found[0].slug, "needle-title");

    let ranked = rank(
        found,
        "needle",
        20,
        |a| SearchCandidate {
            title: &a.title,
            summary: &a.summary,
            content: &a.content,
        },
        |a| a.updated_at,
    );
    assert_eq!(ranked[0].item.slug, "needle-title");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wildcards_are_literal(pool: PgPool) {
    ArticleRepo::create(&pool, "pct", &article("Percent", "100% sure", &[]), &actor(), "")
        .await
        .unwrap();
    ArticleRepo::create(&pool, "plain", &article("Plain", "100 sure", &[]), &actor(), "")
        .await
        .unwrap();

    let found = ArticleRepo::search_candidates(&pool, &like_pattern("100%"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].slug, "pct");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleted_articles_are_not_candidates(pool: PgPool) {
    ArticleRepo::create(&pool, "old", &article("Old rust", "x", &[]), &actor(), "")
        .await
        .unwrap();
    ArticleRepo::soft_delete(&pool, "old", &actor(), DELETED_SUMMARY)
        .await
        .unwrap();

    let found = ArticleRepo::search_candidates(&pool, &like_pattern("rust"))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_category_counts_only_live_articles(pool: PgPool) {
    CategoryRepo::create(
        &pool,
        &CreateCategory {
            name: "empty".to_string(),
            description: Some("nothing yet".to_string()),
            parent_category: None,
        },
    )
    .await
    .unwrap();
    ArticleRepo::create(&pool, "a", &article("A", "x", &["tech"]), &actor(), "")
        .await
        .unwrap();
    ArticleRepo::create(&pool, "b", &article("B", "x", &["tech"]), &actor(), "")
        .await
        .unwrap();
    ArticleRepo::soft_delete(&pool, "b", &actor(), DELETED_SUMMARY)
        .await
        .unwrap();

    let listed = CategoryRepo::list_with_counts(&pool).await.unwrap();
    let count = |name: &str| {
        listed
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.article_count)
    };
    assert_eq!(count("tech"), Some(1));
    assert_eq!(count("empty"), Some(0));

    let tagged = ArticleRepo::list_by_category(&pool, "tech").await.unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].slug, "a");
}
