use axum::{http::StatusCode, response::IntoResponse};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::RegisterParam,
    service::{
        auth::{hash_password, AuthService},
        user::UserService,
    },
};
use entity::prelude::User;
use test_utils::{builder::TestBuilder, factory};

fn registration(email: &str) -> RegisterParam {
    RegisterParam {
        email: email.to_string(),
        name: "New Customer".to_string(),
        password: "long enough".to_string(),
        phone: None,
    }
}

/// Tests registering the same email twice.
///
/// Expected: Ok, then Err(AppError::Conflict) answered with 409
#[tokio::test]
async fn register_rejects_taken_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AuthService::new(db);

    let user = service.register(registration("new@example.com")).await?;
    assert!(!user.admin);
    assert!(user.active);

    let duplicate = service.register(registration("new@example.com")).await;
    let Err(err) = duplicate else {
        panic!("duplicate registration succeeded");
    };
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);

    Ok(())
}

/// Tests logging in with a wrong password and into a disabled account.
///
/// Expected: 401 for the wrong password, 403 for the disabled account
#[tokio::test]
async fn login_distinguishes_disabled_accounts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let hash = hash_password("long enough")?;
    let active = factory::user::UserFactory::new(db)
        .email("active@example.com")
        .password_hash(hash.clone())
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .email("disabled@example.com")
        .password_hash(hash)
        .active(false)
        .build()
        .await?;

    let service = AuthService::new(db);

    assert_eq!(service.login("Active@Example.com", "long enough").await?.id, active.id);

    let wrong = service.login("active@example.com", "not the password").await;
    let Err(err) = wrong else {
        panic!("login with a wrong password succeeded");
    };
    assert!(matches!(err, AppError::AuthErr(AuthError::InvalidCredentials)));
    assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);

    let disabled = service.login("disabled@example.com", "long enough").await;
    let Err(err) = disabled else {
        panic!("disabled account logged in");
    };
    assert!(matches!(err, AppError::AuthErr(AuthError::AccountDisabled(_))));
    assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Tests an admin revoking their own admin flag and disabling their own account.
///
/// Expected: Err(AppError::BadRequest) for both, while changing another user succeeds
#[tokio::test]
async fn admins_cannot_demote_or_disable_themselves() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let other = factory::create_user(db).await?;

    let service = UserService::new(db);

    let demoted = service.set_admin(admin.id, admin.id, false).await;
    assert!(matches!(demoted, Err(AppError::BadRequest(_))));

    let disabled = service.set_active(admin.id, admin.id, false).await;
    assert!(matches!(disabled, Err(AppError::BadRequest(_))));

    let still_admin = service.get(admin.id).await?;
    assert!(still_admin.admin);
    assert!(still_admin.active);

    let other = service.set_active(admin.id, other.id, false).await?;
    assert!(!other.active);

    Ok(())
}
