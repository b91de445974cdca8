//! User service for profile and admin account management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        pagination::{PageRequest, Paginated},
        user::{UpdateProfileParam, User, UserFilter},
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    pub async fn list(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<Paginated<User>, AppError> {
        UserRepository::new(self.db).list(filter, page).await
    }

    /// Updates name and phone. An empty name is rejected; an empty phone clears it.
    pub async fn update_profile(
        &self,
        user_id: i32,
        param: UpdateProfileParam,
    ) -> Result<User, AppError> {
        if param.name.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }

        UserRepository::new(self.db)
            .update_profile(user_id, param)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// Grants or revokes admin. Admins cannot revoke themselves.
    pub async fn set_admin(&self, actor_id: i32, id: i32, admin: bool) -> Result<User, AppError> {
        if actor_id == id && !admin {
            return Err(AppError::BadRequest(
                "You cannot revoke your own admin access".to_string(),
            ));
        }

        let user = UserRepository::new(self.db)
            .set_admin(id, admin)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        tracing::info!(user_id = id, admin, by = actor_id, "Changed admin flag");

        Ok(user)
    }

    /// Enables or disables an account. Admins cannot disable themselves.
    pub async fn set_active(&self, actor_id: i32, id: i32, active: bool) -> Result<User, AppError> {
        if actor_id == id && !active {
            return Err(AppError::BadRequest(
                "You cannot disable your own account".to_string(),
            ));
        }

        let user = UserRepository::new(self.db)
            .set_active(id, active)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        tracing::info!(user_id = id, active, by = actor_id, "Changed active flag");

        Ok(user)
    }
}
