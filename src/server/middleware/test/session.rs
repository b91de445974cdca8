use test_utils::builder::TestBuilder;

use crate::server::{error::AppError, middleware::session::AuthSession};

/// Tests the stored user id can be read back.
///
/// Expected: Some(id) after set, None on a fresh session
#[tokio::test]
async fn stores_and_reads_user_id() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let (_, session) = test.db_and_session().await.unwrap();
    let auth_session = AuthSession::new(session);

    assert_eq!(auth_session.get_user_id().await?, None);

    auth_session.set_user_id(7).await?;
    assert_eq!(auth_session.get_user_id().await?, Some(7));

    Ok(())
}

/// Tests clearing the session logs the user out.
///
/// Expected: None after clear
#[tokio::test]
async fn clear_removes_user_id() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let (_, session) = test.db_and_session().await.unwrap();
    let auth_session = AuthSession::new(session);

    auth_session.set_user_id(7).await?;
    auth_session.clear().await?;

    assert_eq!(auth_session.get_user_id().await?, None);

    Ok(())
}
