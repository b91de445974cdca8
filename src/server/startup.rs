use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{config::ConfigError, AppError},
    model::user::CreateUserParam,
    service::auth::hash_password,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up to date before serving.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the same Sqlite pool.
///
/// Sessions expire after seven days of inactivity.
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| AppError::InternalError(format!("Session store migration failed: {}", e)))?;

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7))))
}

pub fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let origin = match &config.cors_origin {
        Some(origin) => AllowOrigin::exact(origin.parse().map_err(|_| {
            ConfigError::InvalidEnvVar {
                name: "CORS_ORIGIN".to_string(),
                value: origin.clone(),
            }
        })?),
        None => AllowOrigin::from(Any),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Ensures an admin account exists.
///
/// When no admin exists and `ADMIN_EMAIL` is configured, promotes the matching user or
/// creates it with `ADMIN_PASSWORD`. Without credentials a warning is logged so the
/// operator knows no one can reach the admin endpoints yet.
pub async fn bootstrap_admin(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    let user_repo = UserRepository::new(db);

    if user_repo.admin_exists().await? {
        return Ok(());
    }

    let Some(email) = config.admin_email.as_deref() else {
        tracing::warn!("No admin user exists and ADMIN_EMAIL is not set");
        return Ok(());
    };
    let email = email.trim().to_lowercase();

    if let Some(user) = user_repo.find_by_email(&email).await? {
        user_repo.set_admin(user.id, true).await?;
        tracing::info!("Promoted existing user {} to admin", email);
        return Ok(());
    }

    let Some(password) = config.admin_password.as_deref() else {
        tracing::warn!("ADMIN_EMAIL is set but ADMIN_PASSWORD is missing; no admin created");
        return Ok(());
    };

    let password_hash = hash_password(password)?;
    user_repo
        .create(CreateUserParam {
            email: email.clone(),
            name: "Administrator".to_string(),
            phone: None,
            password_hash,
            admin: true,
        })
        .await?;

    tracing::info!("Created admin user {}", email);

    Ok(())
}
