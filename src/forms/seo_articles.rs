use serde::Deserialize;
use validator::Validate;

use crate::domain::seo_article::{ArticleStatus, NewSeoArticle, SeoArticle, UpdateSeoArticle};
use crate::domain::types::{RichText, Title, UserId};
use crate::forms::{FormError, parse_or, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SeoArticleForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Generated from the title when blank.
    #[validate(length(max = 200))]
    pub slug: Option<String>,
    pub keywords: Option<String>,
    #[validate(length(max = 300))]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub body: String,
    pub status: Option<String>,
}

impl SeoArticleForm {
    pub fn into_new_article(self, author_id: UserId) -> Result<NewSeoArticle, FormError> {
        let form = validated(self)?;
        Ok(NewSeoArticle::new(
            Title::new(form.title)?,
            form.slug,
            form.keywords,
            form.meta_description,
            RichText::new(form.body)?,
            parse_or(form.status, ArticleStatus::Draft)?,
            author_id,
        ))
    }

    pub fn into_revision(self, article: &SeoArticle) -> Result<UpdateSeoArticle, FormError> {
        let form = validated(self)?;
        Ok(article.revise(
            Title::new(form.title)?,
            form.slug,
            form.keywords,
            form.meta_description,
            RichText::new(form.body)?,
            parse_or(form.status, ArticleStatus::Draft)?,
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeoArticleListQuery {
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_required() {
        let form = SeoArticleForm {
            title: "Rust入門".into(),
            slug: None,
            keywords: None,
            meta_description: None,
            body: "   ".into(),
            status: None,
        };
        assert!(form.into_new_article(UserId::new(1).unwrap()).is_err());
    }

    #[test]
    fn explicit_slug_is_normalised() {
        let form = SeoArticleForm {
            title: "Rust入門".into(),
            slug: Some("Rust Intro".into()),
            keywords: Some("rust, 入門".into()),
            meta_description: None,
            body: "<p>本文</p>".into(),
            status: Some("published".into()),
        };
        let article = form.into_new_article(UserId::new(1).unwrap()).unwrap();
        assert_eq!(article.slug, "rust-intro");
        assert!(article.published_at.is_some());
    }
}
