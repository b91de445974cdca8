use super::*;

/// Tests that a second upsert of the same key updates the row.
///
/// Expected: Ok with the same id and the new value
#[tokio::test]
async fn updates_existing_key() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(Translation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TranslationRepository::new(db);
    let first = repo.upsert(entry("en", "common", "cart", "Cart")).await?;
    let second = repo
        .upsert(entry("en", "common", "cart", "Shopping cart"))
        .await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.value, "Shopping cart");

    Ok(())
}

/// Tests that the same key in another locale is a separate entry.
///
/// Expected: Ok with distinct ids
#[tokio::test]
async fn keys_are_scoped_by_locale() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(Translation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TranslationRepository::new(db);
    let en = repo.upsert(entry("en", "common", "cart", "Cart")).await?;
    let vi = repo.upsert(entry("vi", "common", "cart", "Giỏ hàng")).await?;

    assert_ne!(en.id, vi.id);
    assert_eq!(repo.locales().await?, vec!["en".to_string(), "vi".to_string()]);

    Ok(())
}
