use chrono::{DateTime, Utc};
use pulldown_cmark::{html, Options, Parser};

use crate::model::news::{CreateNewsDto, NewsDto, UpdateNewsDto};

/// Renders article markdown to HTML.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct News {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl News {
    pub fn from_entity(entity: entity::news::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            summary: entity.summary,
            content: entity.content,
            cover_image_url: entity.cover_image_url,
            published: entity.published,
            published_at: entity.published_at,
            author_id: entity.author_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> NewsDto {
        let content_html = render_markdown(&self.content);

        NewsDto {
            id: self.id,
            title: self.title,
            slug: self.slug,
            summary: self.summary,
            content: self.content,
            content_html,
            cover_image_url: self.cover_image_url,
            published: self.published,
            published_at: self.published_at,
            author_id: self.author_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNewsParam {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub published: bool,
    pub author_id: Option<i32>,
}

impl CreateNewsParam {
    pub fn from_dto(author_id: i32, dto: CreateNewsDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            slug: dto.slug,
            summary: dto.summary,
            content: dto.content,
            cover_image_url: dto.cover_image_url,
            published: dto.published,
            author_id: Some(author_id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateNewsParam {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
}

impl UpdateNewsParam {
    pub fn from_dto(dto: UpdateNewsDto) -> Self {
        Self {
            title: dto.title.map(|t| t.trim().to_string()),
            summary: dto.summary,
            content: dto.content,
            cover_image_url: dto.cover_image_url,
        }
    }
}

/// `published_at` to store when the published flag is set to `published`.
///
/// The first publication stamps `now`; later toggles keep the original date.
pub fn publication_date(
    published: bool,
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (published, current) {
        (true, None) => Some(now),
        (_, current) => current,
    }
}

#[cfg(test)]
mod test {
    use chrono::Duration;

    use super::*;

    #[test]
    fn renders_markdown() {
        let html = render_markdown("# Sale\n\n**Half** price");

        assert!(html.contains("<h1>Sale</h1>"));
        assert!(html.contains("<strong>Half</strong>"));
    }

    #[test]
    fn first_publication_sets_date() {
        let now = Utc::now();

        assert_eq!(publication_date(true, None, now), Some(now));
        assert_eq!(publication_date(false, None, now), None);
    }

    #[test]
    fn republishing_keeps_original_date() {
        let now = Utc::now();
        let first = now - Duration::days(10);

        assert_eq!(publication_date(true, Some(first), now), Some(first));
        assert_eq!(publication_date(false, Some(first), now), Some(first));
    }
}
