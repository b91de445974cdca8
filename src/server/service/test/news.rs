use super::test_cache;
use crate::server::{
    error::AppError, model::news::CreateNewsParam, service::news::NewsService,
};
use test_utils::builder::TestBuilder;

/// Tests unpublishing and republishing an article.
///
/// Expected: `published_at` is stamped once and survives both toggles
#[tokio::test]
async fn republishing_keeps_first_publication_date() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let service = NewsService::new(db, &cache);
    let draft = service
        .create(CreateNewsParam {
            title: "Store opening".to_string(),
            slug: None,
            summary: None,
            content: "We are open.".to_string(),
            cover_image_url: None,
            published: false,
            author_id: None,
        })
        .await?;
    assert_eq!(draft.slug, "store-opening");
    assert_eq!(draft.published_at, None);

    let published = service.set_published(draft.id, true).await?;
    let first_date = published.published_at;
    assert!(first_date.is_some());

    let hidden = service.set_published(draft.id, false).await?;
    assert!(!hidden.published);
    assert_eq!(hidden.published_at, first_date);

    let republished = service.set_published(draft.id, true).await?;
    assert!(republished.published);
    assert_eq!(republished.published_at, first_date);

    Ok(())
}
