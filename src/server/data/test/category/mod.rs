use crate::server::{
    data::category::CategoryRepository,
    error::AppError,
    model::{
        category::{CategoryFilter, UpdateCategoryParam},
        pagination::PageRequest,
    },
    util::slug::SlugStore,
};
use entity::prelude::Category;
use test_utils::{builder::TestBuilder, factory};

mod list;
mod tree;
mod update;
