use deunicode::deunicode;

use crate::server::error::AppError;

/// A table whose rows carry a unique slug.
pub(crate) trait SlugStore {
    async fn slug_taken(&self, slug: &str) -> Result<bool, AppError>;
}

/// Transliterates `input` to ASCII, lowercases it and joins its alphanumeric runs
/// with single hyphens.
///
/// Returns an empty string when nothing alphanumeric survives transliteration.
pub fn slugify(input: &str) -> String {
    let ascii = deunicode(input);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Candidate slug for the `attempt`-th collision: `base`, `base-2`, `base-3`, ...
pub fn with_suffix(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

/// Slugifies `source` and appends `-2`, `-3`, ... until `store` has no row using it.
///
/// `fallback` is the base when `source` has nothing to build a slug from.
pub(crate) async fn unique_slug<S: SlugStore>(
    store: &S,
    source: &str,
    fallback: &str,
) -> Result<String, AppError> {
    let mut base = slugify(source);
    if base.is_empty() {
        base = fallback.to_string();
    }

    let mut attempt = 1;
    loop {
        let candidate = with_suffix(&base, attempt);
        if !store.slug_taken(&candidate).await? {
            return Ok(candidate);
        }
        attempt += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn collapses_separators() {
        assert_eq!(slugify("  Summer -- Sale 2026! "), "summer-sale-2026");
    }

    #[test]
    fn transliterates_non_ascii() {
        assert_eq!(slugify("Café Noir"), "cafe-noir");
        assert_eq!(slugify("Bánh mì"), "banh-mi");
        assert_eq!(slugify("商品"), "shang-pin");
    }

    #[test]
    fn empty_when_nothing_usable() {
        assert_eq!(slugify("!!!"), "");
    }

    struct Taken(Vec<&'static str>);

    impl SlugStore for Taken {
        async fn slug_taken(&self, slug: &str) -> Result<bool, AppError> {
            Ok(self.0.contains(&slug))
        }
    }

    #[tokio::test]
    async fn picks_first_free_suffix() {
        let store = Taken(vec!["red-shoe", "red-shoe-2"]);

        let slug = unique_slug(&store, "Red Shoe", "product").await.unwrap();

        assert_eq!(slug, "red-shoe-3");
    }

    #[tokio::test]
    async fn unusable_source_uses_fallback() {
        let store = Taken(vec!["brand"]);

        let slug = unique_slug(&store, "???", "brand").await.unwrap();

        assert_eq!(slug, "brand-2");
    }

    #[test]
    fn suffixes_from_two() {
        assert_eq!(with_suffix("shoe", 1), "shoe");
        assert_eq!(with_suffix("shoe", 2), "shoe-2");
        assert_eq!(with_suffix("shoe", 3), "shoe-3");
    }
}
