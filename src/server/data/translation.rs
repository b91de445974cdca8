//! Translation repository.

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::{
        pagination::{PageRequest, Paginated},
        translation::{Translation, TranslationFilter, UpsertTranslationParam},
    },
};

pub struct TranslationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TranslationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts or updates the value stored under `(locale, namespace, key)`.
    pub async fn upsert(&self, param: UpsertTranslationParam) -> Result<Translation, AppError> {
        let now = Utc::now();
        let existing = entity::prelude::Translation::find()
            .filter(entity::translation::Column::Locale.eq(&param.locale))
            .filter(entity::translation::Column::Namespace.eq(&param.namespace))
            .filter(entity::translation::Column::Key.eq(&param.key))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(entity) => {
                let mut active: entity::translation::ActiveModel = entity.into();
                active.value = ActiveValue::Set(param.value);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::translation::ActiveModel {
                    locale: ActiveValue::Set(param.locale),
                    namespace: ActiveValue::Set(param.namespace),
                    key: ActiveValue::Set(param.key),
                    value: ActiveValue::Set(param.value),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(Translation::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Translation>, AppError> {
        let entity = entity::prelude::Translation::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Translation::from_entity))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Translation::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Distinct locales that have at least one entry, sorted.
    pub async fn locales(&self) -> Result<Vec<String>, AppError> {
        let locales = entity::prelude::Translation::find()
            .select_only()
            .column(entity::translation::Column::Locale)
            .distinct()
            .order_by_asc(entity::translation::Column::Locale)
            .into_tuple::<String>()
            .all(self.db)
            .await?;

        Ok(locales)
    }

    /// Flat `key -> value` map for one locale and namespace.
    pub async fn bundle(
        &self,
        locale: &str,
        namespace: &str,
    ) -> Result<BTreeMap<String, String>, AppError> {
        let rows = entity::prelude::Translation::find()
            .select_only()
            .column(entity::translation::Column::Key)
            .column(entity::translation::Column::Value)
            .filter(entity::translation::Column::Locale.eq(locale))
            .filter(entity::translation::Column::Namespace.eq(namespace))
            .into_tuple::<(String, String)>()
            .all(self.db)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// Lists entries ordered by locale, namespace and key.
    pub async fn list(
        &self,
        filter: TranslationFilter,
        page: PageRequest,
    ) -> Result<Paginated<Translation>, AppError> {
        use entity::translation::Column;

        let mut query = entity::prelude::Translation::find();
        if let Some(locale) = filter.locale {
            query = query.filter(Column::Locale.eq(locale));
        }
        if let Some(namespace) = filter.namespace {
            query = query.filter(Column::Namespace.eq(namespace));
        }
        if let Some(search) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(Column::Key.contains(&search))
                    .add(Column::Value.contains(&search)),
            );
        }

        let paginator = query
            .order_by_asc(Column::Locale)
            .order_by_asc(Column::Namespace)
            .order_by_asc(Column::Key)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let translations = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Translation::from_entity)
            .collect();

        Ok(Paginated::new(translations, page, total))
    }
}
