//! Diesel models for SEO articles.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::seo_article::{
    NewSeoArticle as DomainNewSeoArticle, SeoArticle as DomainSeoArticle,
    UpdateSeoArticle as DomainUpdateSeoArticle,
};
use crate::domain::types::{RichText, SeoArticleId, Title, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::seo_articles)]
pub struct SeoArticle {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub keywords: Option<String>,
    pub meta_description: Option<String>,
    pub body: String,
    pub status: String,
    pub author_id: i32,
    pub published_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::seo_articles)]
pub struct NewSeoArticle<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub keywords: Option<&'a str>,
    pub meta_description: Option<&'a str>,
    pub body: &'a str,
    pub status: &'a str,
    pub author_id: i32,
    pub published_at: Option<NaiveDateTime>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::seo_articles)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateSeoArticle<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub keywords: Option<&'a str>,
    pub meta_description: Option<&'a str>,
    pub body: &'a str,
    pub status: &'a str,
    pub published_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<SeoArticle> for DomainSeoArticle {
    type Error = TypeConstraintError;

    fn try_from(row: SeoArticle) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SeoArticleId::new(row.id)?,
            title: Title::new(row.title)?,
            slug: row.slug,
            keywords: row.keywords,
            meta_description: row.meta_description,
            body: RichText::new(row.body)?,
            status: row.status.parse()?,
            author_id: UserId::new(row.author_id)?,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewSeoArticle> for NewSeoArticle<'a> {
    fn from(article: &'a DomainNewSeoArticle) -> Self {
        Self {
            title: article.title.as_str(),
            slug: &article.slug,
            keywords: article.keywords.as_deref(),
            meta_description: article.meta_description.as_deref(),
            body: article.body.as_str(),
            status: article.status.as_str(),
            author_id: article.author_id.get(),
            published_at: article.published_at,
        }
    }
}

impl<'a> UpdateSeoArticle<'a> {
    pub fn new(article: &'a DomainUpdateSeoArticle, now: NaiveDateTime) -> Self {
        Self {
            title: article.title.as_str(),
            slug: &article.slug,
            keywords: article.keywords.as_deref(),
            meta_description: article.meta_description.as_deref(),
            body: article.body.as_str(),
            status: article.status.as_str(),
            published_at: article.published_at,
            updated_at: now,
        }
    }
}
