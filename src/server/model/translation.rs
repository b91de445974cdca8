use chrono::{DateTime, Utc};

use crate::model::translation::{
    BulkUpsertTranslationDto, TranslationDto, TranslationQuery, UpsertTranslationDto,
};

pub const DEFAULT_NAMESPACE: &str = "common";

/// Accepts `xx` or `xx-YY`, e.g. `en`, `vi-VN`.
pub fn is_valid_locale(locale: &str) -> bool {
    let bytes = locale.as_bytes();

    match bytes.len() {
        2 => bytes.iter().all(u8::is_ascii_lowercase),
        5 => {
            bytes[..2].iter().all(u8::is_ascii_lowercase)
                && bytes[2] == b'-'
                && bytes[3..].iter().all(u8::is_ascii_uppercase)
        }
        _ => false,
    }
}

fn namespace_or_default(namespace: Option<String>) -> String {
    namespace
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub id: i32,
    pub locale: String,
    pub namespace: String,
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl Translation {
    pub fn from_entity(entity: entity::translation::Model) -> Self {
        Self {
            id: entity.id,
            locale: entity.locale,
            namespace: entity.namespace,
            key: entity.key,
            value: entity.value,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> TranslationDto {
        TranslationDto {
            id: self.id,
            locale: self.locale,
            namespace: self.namespace,
            key: self.key,
            value: self.value,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpsertTranslationParam {
    pub locale: String,
    pub namespace: String,
    pub key: String,
    pub value: String,
}

impl UpsertTranslationParam {
    pub fn from_dto(dto: UpsertTranslationDto) -> Self {
        Self {
            locale: dto.locale.trim().to_string(),
            namespace: namespace_or_default(dto.namespace),
            key: dto.key.trim().to_string(),
            value: dto.value,
        }
    }

    /// Expands a bulk request into one upsert per entry.
    pub fn from_bulk_dto(dto: BulkUpsertTranslationDto) -> Vec<Self> {
        let locale = dto.locale.trim().to_string();
        let namespace = namespace_or_default(dto.namespace);

        dto.entries
            .into_iter()
            .map(|(key, value)| Self {
                locale: locale.clone(),
                namespace: namespace.clone(),
                key: key.trim().to_string(),
                value,
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_locale(&self.locale) {
            return Err(format!("Invalid locale '{}'", self.locale));
        }
        if self.key.is_empty() {
            return Err("Translation key must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TranslationFilter {
    pub locale: Option<String>,
    pub namespace: Option<String>,
    pub search: Option<String>,
}

impl TranslationFilter {
    pub fn from_query(query: &TranslationQuery) -> Self {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            locale: clean(&query.locale),
            namespace: clean(&query.namespace),
            search: clean(&query.search),
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn locale_format() {
        assert!(is_valid_locale("en"));
        assert!(is_valid_locale("vi-VN"));

        assert!(!is_valid_locale("EN"));
        assert!(!is_valid_locale("en-us"));
        assert!(!is_valid_locale("en_US"));
        assert!(!is_valid_locale("eng"));
        assert!(!is_valid_locale(""));
    }

    #[test]
    fn namespace_defaults_to_common() {
        let param = UpsertTranslationParam::from_dto(UpsertTranslationDto {
            locale: "en".to_string(),
            namespace: Some("  ".to_string()),
            key: "cart.title".to_string(),
            value: "Cart".to_string(),
        });

        assert_eq!(param.namespace, DEFAULT_NAMESPACE);
        assert!(param.validate().is_ok());
    }

    #[test]
    fn bulk_rejects_blank_key() {
        let params = UpsertTranslationParam::from_bulk_dto(BulkUpsertTranslationDto {
            locale: "en".to_string(),
            namespace: None,
            entries: BTreeMap::from([(" ".to_string(), "x".to_string())]),
        });

        assert_eq!(params.len(), 1);
        assert!(params[0].validate().is_err());
    }
}
