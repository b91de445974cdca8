use super::*;

fn param(email: &str) -> CreateUserParam {
    CreateUserParam {
        email: email.to_string(),
        name: "Linh Tran".to_string(),
        phone: None,
        password_hash: "hash".to_string(),
        admin: false,
    }
}

/// Tests creating a user and finding them again by email.
///
/// Expected: Ok with an active, non-admin user
#[tokio::test]
async fn creates_user_and_finds_by_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let created = repo.create(param("linh@example.com")).await?;

    assert!(created.active);
    assert!(!created.admin);

    let found = repo.find_by_email("linh@example.com").await?.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Linh Tran");

    Ok(())
}

/// Tests that the email column is unique.
///
/// Expected: Err on the second insert with the same email
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(param("dup@example.com")).await?;
    let result = repo.create(param("dup@example.com")).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));
    assert!(repo.email_exists("dup@example.com").await?);

    Ok(())
}

/// Tests admin detection used by the startup bootstrap.
///
/// Expected: false with only customers, true once an admin exists
#[tokio::test]
async fn admin_exists_reflects_admin_rows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let customer = factory::create_user(db).await?;
    assert!(!repo.admin_exists().await?);

    repo.set_admin(customer.id, true).await?;
    assert!(repo.admin_exists().await?);

    Ok(())
}
