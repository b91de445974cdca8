use super::*;

/// Tests that omitted fields keep their value and an empty phone clears it.
///
/// Expected: Ok with the new name and no phone
#[tokio::test]
async fn applies_partial_update() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    repo.update_profile(
        user.id,
        UpdateProfileParam {
            name: None,
            phone: Some("0912345678".to_string()),
        },
    )
    .await?;
    let updated = repo
        .update_profile(
            user.id,
            UpdateProfileParam {
                name: Some("Renamed".to_string()),
                phone: Some(String::new()),
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.phone, None);

    Ok(())
}

/// Tests updating an unknown user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update_profile(99, UpdateProfileParam::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
