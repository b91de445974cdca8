use chrono::{Duration, Utc};

use crate::{
    model::advertisement::AdPosition,
    server::{data::advertisement::AdvertisementRepository, error::AppError},
};
use entity::prelude::Advertisement;
use test_utils::{builder::TestBuilder, factory};

mod counters;
mod running;
