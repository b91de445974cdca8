use crate::{
    model::product::ProductSort,
    server::{
        data::product::ProductRepository,
        error::AppError,
        model::{pagination::PageRequest, product::ProductFilter},
    },
};
use test_utils::{builder::TestBuilder, factory};

mod list;
mod low_stock;
