//! SEO articles drafted (optionally by the AI backend) and published.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{RichText, SeoArticleId, Title, UserId, non_blank, string_enum};

string_enum!(ArticleStatus, "article status", {
    Draft => "draft",
    Published => "published",
});

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SeoArticle {
    pub id: SeoArticleId,
    pub title: Title,
    pub slug: String,
    pub keywords: Option<String>,
    pub meta_description: Option<String>,
    pub body: RichText,
    pub status: ArticleStatus,
    pub author_id: UserId,
    pub published_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewSeoArticle {
    pub title: Title,
    pub slug: String,
    pub keywords: Option<String>,
    pub meta_description: Option<String>,
    pub body: RichText,
    pub status: ArticleStatus,
    pub author_id: UserId,
    pub published_at: Option<NaiveDateTime>,
}

impl NewSeoArticle {
    /// Builds an article, deriving the slug when none is given and stamping
    /// `published_at` for articles created as published.
    #[must_use]
    pub fn new(
        title: Title,
        slug: Option<String>,
        keywords: Option<String>,
        meta_description: Option<String>,
        body: RichText,
        status: ArticleStatus,
        author_id: UserId,
    ) -> Self {
        let slug = non_blank(slug)
            .map(|s| slugify(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify_title(title.as_str()));
        let published_at =
            (status == ArticleStatus::Published).then(|| Utc::now().naive_utc());
        Self {
            title,
            slug,
            keywords: non_blank(keywords),
            meta_description: non_blank(meta_description),
            body,
            status,
            author_id,
            published_at,
        }
    }
}

/// Fields replaced by the article editor.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateSeoArticle {
    pub title: Title,
    pub slug: String,
    pub keywords: Option<String>,
    pub meta_description: Option<String>,
    pub body: RichText,
    pub status: ArticleStatus,
    pub published_at: Option<NaiveDateTime>,
}

impl SeoArticle {
    /// Builds the replacement record. `published_at` is stamped the first time
    /// the article is published and cleared when it returns to draft.
    #[must_use]
    pub fn revise(
        &self,
        title: Title,
        slug: Option<String>,
        keywords: Option<String>,
        meta_description: Option<String>,
        body: RichText,
        status: ArticleStatus,
    ) -> UpdateSeoArticle {
        let slug = non_blank(slug)
            .map(|s| slugify(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.slug.clone());
        let published_at = match status {
            ArticleStatus::Published => self.published_at.or_else(|| Some(Utc::now().naive_utc())),
            ArticleStatus::Draft => None,
        };
        UpdateSeoArticle {
            title,
            slug,
            keywords: non_blank(keywords),
            meta_description: non_blank(meta_description),
            body,
            status,
            published_at,
        }
    }
}

/// Lower-cases ASCII alphanumerics and joins the rest with single dashes.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Japanese titles rarely contain ASCII, so fall back to a random slug.
fn slugify_title(title: &str) -> String {
    let slug = slugify(title);
    if slug.len() >= 3 {
        slug
    } else {
        format!("article-{}", Uuid::new_v4().simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Rust Web -- Guide 2026! "), "rust-web-guide-2026");
        assert_eq!(slugify("東京"), "");
    }

    #[test]
    fn japanese_title_gets_generated_slug() {
        let article = NewSeoArticle::new(
            Title::new("東京のおすすめ").unwrap(),
            None,
            None,
            None,
            RichText::new("本文").unwrap(),
            ArticleStatus::Draft,
            UserId::new(1).unwrap(),
        );
        assert!(article.slug.starts_with("article-"));
        assert!(article.published_at.is_none());
    }

    #[test]
    fn published_articles_get_timestamp() {
        let article = NewSeoArticle::new(
            Title::new("Guide").unwrap(),
            Some("My Guide".into()),
            None,
            None,
            RichText::new("body").unwrap(),
            ArticleStatus::Published,
            UserId::new(1).unwrap(),
        );
        assert_eq!(article.slug, "my-guide");
        assert!(article.published_at.is_some());
    }

    #[test]
    fn revising_keeps_first_publication_time() {
        let stamp = Utc::now().naive_utc() - chrono::Duration::days(3);
        let article = SeoArticle {
            id: SeoArticleId::new(1).unwrap(),
            title: Title::new("Guide").unwrap(),
            slug: "guide".into(),
            keywords: None,
            meta_description: None,
            body: RichText::new("body").unwrap(),
            status: ArticleStatus::Published,
            author_id: UserId::new(1).unwrap(),
            published_at: Some(stamp),
            created_at: stamp,
            updated_at: stamp,
        };
        let body = RichText::new("new body").unwrap();
        let update = article.revise(article.title.clone(), None, None, None, body.clone(), ArticleStatus::Published);
        assert_eq!(update.published_at, Some(stamp));
        assert_eq!(update.slug, "guide");

        let draft = article.revise(article.title.clone(), None, None, None, body, ArticleStatus::Draft);
        assert_eq!(draft.published_at, None);
    }
}
