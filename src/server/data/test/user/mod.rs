use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        pagination::PageRequest,
        user::{CreateUserParam, UpdateProfileParam, UserFilter},
    },
};
use entity::prelude::User;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod list;
mod update_profile;
