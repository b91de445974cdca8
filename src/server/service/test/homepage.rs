use chrono::{Duration, Utc};

use super::test_cache;
use crate::server::{
    error::AppError, model::homepage::UpdateHomepageParam, service::homepage::HomepageService,
};
use test_utils::{builder::TestBuilder, factory};

fn homepage(featured_product_ids: Vec<i32>, featured_category_ids: Vec<i32>) -> UpdateHomepageParam {
    UpdateHomepageParam {
        hero_title: "Autumn collection".to_string(),
        hero_subtitle: None,
        hero_image_url: None,
        featured_product_ids,
        featured_category_ids,
    }
}

/// Tests saving a homepage that features ids which do not exist.
///
/// Expected: Err(AppError::BadRequest) for an unknown product and an unknown category
#[tokio::test]
async fn update_rejects_unknown_ids() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let product = factory::create_product(db).await?;
    let category = factory::create_category(db).await?;

    let service = HomepageService::new(db, &cache);

    let unknown_product = service
        .update(homepage(vec![product.id, i32::MAX], vec![category.id]))
        .await;
    assert!(matches!(unknown_product, Err(AppError::BadRequest(_))));

    let unknown_category = service
        .update(homepage(vec![product.id], vec![i32::MAX]))
        .await;
    assert!(matches!(unknown_category, Err(AppError::BadRequest(_))));

    let saved = service
        .update(homepage(vec![product.id], vec![category.id]))
        .await?;
    assert_eq!(saved.featured_product_ids, vec![product.id]);

    Ok(())
}

/// Tests composing the public homepage from the saved configuration.
///
/// Expected: featured products in configured order without inactive ones, and only
/// the three most recently published articles
#[tokio::test]
async fn composes_featured_products_and_latest_news() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let first = factory::create_product(db).await?;
    let second = factory::create_product(db).await?;
    let inactive = factory::product::ProductFactory::new(db)
        .active(false)
        .build()
        .await?;

    let now = Utc::now();
    let mut published = Vec::new();
    for days_ago in 1..=4 {
        let news = factory::news::NewsFactory::new(db)
            .published_at(now - Duration::days(days_ago))
            .build()
            .await?;
        published.push(news.id);
    }
    factory::news::NewsFactory::new(db).build().await?;

    let service = HomepageService::new(db, &cache);
    service
        .update(homepage(vec![second.id, inactive.id, first.id], vec![]))
        .await?;

    let page = service.get().await?;

    let featured: Vec<i32> = page.featured_products.iter().map(|p| p.id).collect();
    assert_eq!(featured, vec![second.id, first.id]);

    let news: Vec<i32> = page.latest_news.iter().map(|n| n.id).collect();
    assert_eq!(news, published[..3].to_vec());

    Ok(())
}
