use super::*;

/// Tests that a bundle holds one locale and namespace only.
///
/// Expected: Ok with the two `en/common` keys
#[tokio::test]
async fn builds_flat_map_for_locale_and_namespace() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(Translation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TranslationRepository::new(db);
    repo.upsert(entry("en", "common", "cart", "Cart")).await?;
    repo.upsert(entry("en", "common", "checkout", "Checkout")).await?;
    repo.upsert(entry("en", "admin", "orders", "Orders")).await?;
    repo.upsert(entry("vi", "common", "cart", "Giỏ hàng")).await?;

    let bundle = repo.bundle("en", "common").await?;

    assert_eq!(bundle.len(), 2);
    assert_eq!(bundle.get("cart").map(String::as_str), Some("Cart"));
    assert_eq!(bundle.get("checkout").map(String::as_str), Some("Checkout"));

    Ok(())
}

/// Tests a locale with no entries.
///
/// Expected: Ok with an empty map
#[tokio::test]
async fn unknown_locale_gives_empty_bundle() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(Translation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let bundle = TranslationRepository::new(db).bundle("fr", "common").await?;

    assert!(bundle.is_empty());

    Ok(())
}
