//! UI translation bundles.

use std::collections::{BTreeMap, BTreeSet};

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    cache::{CacheKey, CacheValue, ResponseCache},
    data::translation::TranslationRepository,
    error::AppError,
    model::{
        pagination::{PageRequest, Paginated},
        translation::{
            is_valid_locale, Translation, TranslationFilter, UpsertTranslationParam,
            DEFAULT_NAMESPACE,
        },
    },
};

pub struct TranslationService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> TranslationService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    pub async fn locales(&self) -> Result<Vec<String>, AppError> {
        TranslationRepository::new(self.db).locales().await
    }

    /// Flat `key -> value` map for `locale` and `namespace` (default `common`), cached.
    pub async fn bundle(
        &self,
        locale: &str,
        namespace: Option<&str>,
    ) -> Result<BTreeMap<String, String>, AppError> {
        if !is_valid_locale(locale) {
            return Err(AppError::BadRequest(format!("Invalid locale '{}'", locale)));
        }
        let namespace = namespace
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE);

        let key = CacheKey::TranslationBundle {
            locale: locale.to_string(),
            namespace: namespace.to_string(),
        };
        if let Some(CacheValue::TranslationBundle(bundle)) = self.cache.get(&key).await {
            return Ok(bundle);
        }

        let bundle = TranslationRepository::new(self.db)
            .bundle(locale, namespace)
            .await?;
        self.cache
            .insert(key, CacheValue::TranslationBundle(bundle.clone()))
            .await;

        Ok(bundle)
    }

    pub async fn list(
        &self,
        filter: TranslationFilter,
        page: PageRequest,
    ) -> Result<Paginated<Translation>, AppError> {
        TranslationRepository::new(self.db).list(filter, page).await
    }

    pub async fn upsert(&self, param: UpsertTranslationParam) -> Result<Translation, AppError> {
        param.validate().map_err(AppError::BadRequest)?;

        let locale = param.locale.clone();
        let translation = TranslationRepository::new(self.db).upsert(param).await?;
        self.cache.invalidate_translations(&locale);

        Ok(translation)
    }

    /// Upserts every entry in one transaction.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of entries written
    /// - `Err(AppError::BadRequest)` - No entries, bad locale or an empty key; nothing is written
    pub async fn bulk_upsert(&self, params: Vec<UpsertTranslationParam>) -> Result<usize, AppError> {
        if params.is_empty() {
            return Err(AppError::BadRequest("No entries to write".to_string()));
        }
        for param in &params {
            param.validate().map_err(AppError::BadRequest)?;
        }

        let locales: BTreeSet<String> = params.iter().map(|p| p.locale.clone()).collect();
        let count = params.len();

        let txn = self.db.begin().await?;
        let repo = TranslationRepository::new(&txn);
        for param in params {
            repo.upsert(param).await?;
        }
        txn.commit().await?;

        for locale in &locales {
            self.cache.invalidate_translations(locale);
        }

        tracing::info!(count, "Bulk upserted translations");

        Ok(count)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let repo = TranslationRepository::new(self.db);

        let translation = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Translation"))?;

        repo.delete(id).await?;
        self.cache.invalidate_translations(&translation.locale);

        Ok(())
    }
}
