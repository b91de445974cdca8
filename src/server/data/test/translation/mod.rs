use crate::server::{
    data::translation::TranslationRepository, error::AppError,
    model::translation::UpsertTranslationParam,
};
use entity::prelude::Translation;
use test_utils::builder::TestBuilder;

mod bundle;
mod upsert;

fn entry(locale: &str, namespace: &str, key: &str, value: &str) -> UpsertTranslationParam {
    UpsertTranslationParam {
        locale: locale.to_string(),
        namespace: namespace.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    }
}
