//! Account registration, login and password management.
//!
//! Passwords are stored as Argon2 PHC strings. Login never reveals whether the email
//! exists: a missing account and a wrong password both fail with `InvalidCredentials`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParam, RegisterParam, User},
};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Hashes `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks `password` against a stored PHC string.
///
/// # Returns
/// - `Ok(true)` / `Ok(false)` - Whether the password matches
/// - `Err(AuthError::PasswordHash)` - The stored hash could not be parsed
pub fn verify_password(stored_hash: &str, password: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a customer account.
    ///
    /// # Returns
    /// - `Ok(User)` - The new, active, non-admin user
    /// - `Err(AppError::BadRequest)` - Malformed email, empty name or short password
    /// - `Err(AppError::Conflict)` - Email already registered
    pub async fn register(&self, param: RegisterParam) -> Result<User, AppError> {
        if !param.email.contains('@') {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }
        if param.name.is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }
        validate_password(&param.password)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.email_exists(&param.email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let user = user_repo
            .create(CreateUserParam {
                email: param.email,
                name: param.name,
                phone: param.phone,
                password_hash: hash_password(&param.password)?,
                admin: false,
            })
            .await?;

        tracing::info!(user_id = user.id, "Registered new customer");

        Ok(user)
    }

    /// Verifies credentials and returns the account.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials match an active account
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::AccountDisabled)` - Credentials match but the account is disabled
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim().to_lowercase();

        let Some(user) = UserRepository::new(self.db).find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(&user.password_hash, password)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.active {
            return Err(AuthError::AccountDisabled(user.id).into());
        }

        Ok(user)
    }

    /// Replaces the password after checking the current one.
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);

        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user_id))?;

        if !verify_password(&user.password_hash, current_password)? {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }
        validate_password(new_password)?;

        user_repo
            .update_password(user_id, hash_password(new_password)?)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_own_hash() {
        let hash = hash_password("correct horse").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "correct horse").unwrap());
        assert!(!verify_password(&hash, "wrong horse").unwrap());
    }

    #[test]
    fn rejects_garbage_hash() {
        let result = verify_password("not-a-phc-string", "whatever");

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::PasswordHash(_)))
        ));
    }

    #[test]
    fn short_password_is_bad_request() {
        assert!(matches!(
            validate_password("short"),
            Err(AppError::BadRequest(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }
}
