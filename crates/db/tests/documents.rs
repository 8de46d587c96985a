//! Integration tests for topic documents and their revision history.

use sqlx::PgPool;

use clawcollab_core::identity::ActorKind;
use clawcollab_core::topics::{BlockType, DocumentBlock};
use clawcollab_db::models::actor::Actor;
use clawcollab_db::repositories::{DocumentRepo, TopicRepo};

fn editor() -> Actor {
    Actor {
        id: "1".to_string(),
        name: "editor".to_string(),
        kind: ActorKind::User,
    }
}

fn paragraph(id: &str, content: &str) -> DocumentBlock {
    DocumentBlock {
        id: id.to_string(),
        block_type: BlockType::Paragraph,
        content: content.to_string(),
        language: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_saves_bump_version_and_append_revisions(pool: PgPool) {
    let topic = TopicRepo::create(&pool, "doc", "Doc", None, &[], &editor())
        .await
        .unwrap();

    let (first, rev1) = DocumentRepo::save(&pool, topic.id, &[paragraph("a", "one")], &editor(), "")
        .await
        .unwrap();
    assert_eq!(first.version, 1);
    assert_eq!(rev1.version, 1);

    let (second, rev2) =
        DocumentRepo::save(&pool, topic.id, &[paragraph("a", "two")], &editor(), "edit")
            .await
            .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.version, 2);
    assert_eq!(rev2.edit_summary, "edit");

    let history = DocumentRepo::list_revisions(&pool, topic.id).await.unwrap();
    let versions: Vec<_> = history.iter().map(|r| r.version).collect();
    assert_eq!(versions, vec![2, 1]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_revert_appends_without_truncating(pool: PgPool) {
    let topic = TopicRepo::create(&pool, "doc", "Doc", None, &[], &editor())
        .await
        .unwrap();
    DocumentRepo::save(&pool, topic.id, &[paragraph("a", "one")], &editor(), "")
        .await
        .unwrap();
    DocumentRepo::save(&pool, topic.id, &[paragraph("a", "two")], &editor(), "")
        .await
        .unwrap();

    let target = DocumentRepo::find_revision(&pool, topic.id, 1)
        .await
        .unwrap()
        .unwrap();
    let (doc, _) = DocumentRepo::save(&pool, topic.id, &target.blocks.0, &editor(), "revert")
        .await
        .unwrap();

    assert_eq!(doc.version, 3);
    assert_eq!(doc.blocks.0, vec![paragraph("a", "one")]);
    assert_eq!(
        DocumentRepo::list_revisions(&pool, topic.id).await.unwrap().len(),
        3
    );
}
