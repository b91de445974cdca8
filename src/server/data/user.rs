//! User data repository for database operations.
//!
//! Provides the `UserRepository` for account records: registration, lookups by id or
//! email, profile and password changes and the admin/active flags. Entities are
//! converted to `User` domain models at this boundary.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::{
        pagination::{PageRequest, Paginated},
        user::{CreateUserParam, UpdateProfileParam, User, UserFilter},
    },
};

/// Repository providing database operations for user accounts.
///
/// Generic over the connection so the same queries run on a pooled connection or
/// inside a transaction.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to a database connection or transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user with an already hashed password.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::DbErr)` - Insert failed; a duplicate email is a unique violation
    pub async fn create(&self, param: CreateUserParam) -> Result<User, AppError> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            email: ActiveValue::Set(param.email),
            name: ActiveValue::Set(param.name),
            phone: ActiveValue::Set(param.phone),
            password_hash: ActiveValue::Set(param.password_hash),
            admin: ActiveValue::Set(param.admin),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by primary key.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by email. The caller passes the normalized (lowercase) address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if any admin users exist in the database.
    ///
    /// Used by the startup bootstrap to decide whether `ADMIN_EMAIL` must be created or
    /// promoted.
    pub async fn admin_exists(&self) -> Result<bool, AppError> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Admin.eq(true))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Sets admin status for a user.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - No user with that id
    pub async fn set_admin(&self, id: i32, admin: bool) -> Result<Option<User>, AppError> {
        self.update_with(id, |active| active.admin = ActiveValue::Set(admin))
            .await
    }

    /// Enables or disables an account.
    pub async fn set_active(&self, id: i32, active: bool) -> Result<Option<User>, AppError> {
        self.update_with(id, |model| model.active = ActiveValue::Set(active))
            .await
    }

    /// Applies a partial profile update; `None` fields keep their stored value.
    pub async fn update_profile(
        &self,
        id: i32,
        param: UpdateProfileParam,
    ) -> Result<Option<User>, AppError> {
        self.update_with(id, |active| {
            if let Some(name) = param.name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(phone) = param.phone {
                active.phone = ActiveValue::Set(Some(phone).filter(|p| !p.is_empty()));
            }
        })
        .await
    }

    pub async fn update_password(
        &self,
        id: i32,
        password_hash: String,
    ) -> Result<Option<User>, AppError> {
        self.update_with(id, |active| {
            active.password_hash = ActiveValue::Set(password_hash)
        })
        .await
    }

    /// Gets users with pagination, newest first.
    ///
    /// `search` matches name or email.
    pub async fn list(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<Paginated<User>, AppError> {
        let mut query = entity::prelude::User::find();

        if let Some(search) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::Name.contains(&search))
                    .add(entity::user::Column::Email.contains(&search.to_lowercase())),
            );
        }

        let paginator = query
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_desc(entity::user::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;
        let users = entities.into_iter().map(User::from_entity).collect();

        Ok(Paginated::new(users, page, total))
    }

    /// Counts non-admin accounts.
    pub async fn count_customers(&self) -> Result<u64, AppError> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Admin.eq(false))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Ids of every enabled account, used for broadcast notifications.
    pub async fn active_ids(&self) -> Result<Vec<i32>, AppError> {
        let ids = entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .filter(entity::user::Column::Active.eq(true))
            .order_by_asc(entity::user::Column::Id)
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        Ok(ids)
    }

    async fn update_with(
        &self,
        id: i32,
        apply: impl FnOnce(&mut entity::user::ActiveModel),
    ) -> Result<Option<User>, AppError> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = entity.into();
        apply(&mut active);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(User::from_entity(entity)))
    }
}
