//! SEO articles with publish-date bookkeeping and unique slugs.

use serde_json::Value;

use crate::domain::role::Section;
use crate::domain::seo_article::{ArticleStatus, SeoArticle};
use crate::domain::types::SeoArticleId;
use crate::forms::parse_optional;
use crate::forms::seo_articles::{SeoArticleForm, SeoArticleListQuery};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{SeoArticleReader, SeoArticleWriter};
use crate::services::{ServiceError, ServiceResult, caller_id, ensure_section, merge_patch};

/// Fails when another article already uses `slug`.
fn ensure_free_slug<R>(repo: &R, slug: &str, own_id: Option<SeoArticleId>) -> ServiceResult<()>
where
    R: SeoArticleReader + ?Sized,
{
    match repo.get_seo_article_by_slug(slug)? {
        Some(other) if Some(other.id) != own_id => Err(ServiceError::Form(format!(
            "スラッグ「{slug}」は既に使われています"
        ))),
        _ => Ok(()),
    }
}

pub fn list_articles<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: SeoArticleListQuery,
) -> ServiceResult<Vec<SeoArticle>>
where
    R: SeoArticleReader + ?Sized,
{
    ensure_section(user, Section::SeoArticles)?;
    let status = parse_optional::<ArticleStatus>(query.status)?;
    Ok(repo.list_seo_articles(status)?)
}

pub fn get_article<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<SeoArticle>
where
    R: SeoArticleReader + ?Sized,
{
    ensure_section(user, Section::SeoArticles)?;
    repo.get_seo_article_by_id(SeoArticleId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_article<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SeoArticleForm,
) -> ServiceResult<SeoArticle>
where
    R: SeoArticleReader + SeoArticleWriter + ?Sized,
{
    ensure_section(user, Section::SeoArticles)?;

    let new_article = form.into_new_article(caller_id(user)?)?;
    ensure_free_slug(repo, &new_article.slug, None)?;
    repo.create_seo_article(&new_article).map_err(|err| {
        log::error!("Failed to create SEO article: {err}");
        ServiceError::from(err)
    })
}

pub fn update_article<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: SeoArticleForm,
) -> ServiceResult<SeoArticle>
where
    R: SeoArticleReader + SeoArticleWriter + ?Sized,
{
    let current = get_article(repo, user, id)?;
    let updates = form.into_revision(&current)?;
    ensure_free_slug(repo, &updates.slug, Some(current.id))?;
    repo.update_seo_article(current.id, &updates).map_err(|err| {
        log::error!("Failed to update SEO article {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_article<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<SeoArticle>
where
    R: SeoArticleReader + SeoArticleWriter + ?Sized,
{
    let current = get_article(repo, user, id)?;
    let form: SeoArticleForm = merge_patch(&current, patch)?;
    update_article(repo, user, id, form)
}

pub fn delete_article<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: SeoArticleWriter + ?Sized,
{
    ensure_section(user, Section::SeoArticles)?;

    let id = SeoArticleId::new(id)?;
    repo.delete_seo_article(id).map_err(|err| {
        log::error!("Failed to delete SEO article {id}: {err}");
        ServiceError::from(err)
    })
}
