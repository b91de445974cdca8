//! In-memory response cache for hot public reads.
//!
//! Wraps a `moka` future cache keyed by [`CacheKey`]. Services that write cached data
//! call the matching `invalidate_*` method after committing.

use std::{collections::BTreeMap, time::Duration};

use moka::future::Cache;

use crate::model::{
    api::PaginationDto,
    homepage::HomepageDto,
    product::{ProductDto, ProductQuery},
};

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// Public product listing for a normalized query.
    ProductPage(ProductQuery),
    Product(i32),
    Homepage,
    TranslationBundle { locale: String, namespace: String },
}

#[derive(Debug, Clone)]
pub enum CacheValue {
    ProductPage(Vec<ProductDto>, PaginationDto),
    Product(Box<ProductDto>),
    Homepage(Box<HomepageDto>),
    TranslationBundle(BTreeMap<String, String>),
}

#[derive(Clone)]
pub struct ResponseCache {
    cache: Cache<CacheKey, CacheValue>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(ttl)
            .support_invalidation_closures()
            .build();

        Self { cache }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: CacheKey, value: CacheValue) {
        self.cache.insert(key, value).await;
    }

    /// Drops the cached product and every cached listing page.
    ///
    /// Listings are dropped too since any product write can change what a page shows.
    /// The homepage embeds featured products, so it goes as well.
    pub async fn invalidate_product(&self, id: i32) {
        self.cache.invalidate(&CacheKey::Product(id)).await;
        self.invalidate_product_pages();
        self.invalidate_homepage().await;
    }

    pub fn invalidate_product_pages(&self) {
        if let Err(e) = self
            .cache
            .invalidate_entries_if(|key, _| matches!(key, CacheKey::ProductPage(_)))
        {
            tracing::warn!("Failed to invalidate product pages: {}", e);
        }
    }

    pub async fn invalidate_homepage(&self) {
        self.cache.invalidate(&CacheKey::Homepage).await;
    }

    /// Drops every cached bundle of `locale`, across namespaces.
    pub fn invalidate_translations(&self, locale: &str) {
        let locale = locale.to_string();
        if let Err(e) = self.cache.invalidate_entries_if(move |key, _| {
            matches!(key, CacheKey::TranslationBundle { locale: l, .. } if *l == locale)
        }) {
            tracing::warn!("Failed to invalidate translation bundles: {}", e);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bundle(value: &str) -> CacheValue {
        let mut map = BTreeMap::new();
        map.insert("greeting".to_string(), value.to_string());
        CacheValue::TranslationBundle(map)
    }

    #[tokio::test]
    async fn returns_inserted_value() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let key = CacheKey::TranslationBundle {
            locale: "en".to_string(),
            namespace: "common".to_string(),
        };

        cache.insert(key.clone(), bundle("Hello")).await;

        assert!(matches!(
            cache.get(&key).await,
            Some(CacheValue::TranslationBundle(map)) if map["greeting"] == "Hello"
        ));
    }

    #[tokio::test]
    async fn invalidates_homepage() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert(CacheKey::Homepage, bundle("x")).await;

        cache.invalidate_homepage().await;

        assert!(cache.get(&CacheKey::Homepage).await.is_none());
    }
}
