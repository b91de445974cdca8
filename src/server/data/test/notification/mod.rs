use crate::{
    model::notification::NotificationKind,
    server::{
        data::notification::NotificationRepository, error::AppError,
        model::{notification::NotificationContent, pagination::PageRequest},
    },
};
use entity::prelude::{Notification, User};
use test_utils::{builder::TestBuilder, factory};

mod create_many;
mod read_state;
