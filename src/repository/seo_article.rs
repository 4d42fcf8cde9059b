//! Repository implementation for SEO articles.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::seo_article::{ArticleStatus, NewSeoArticle, SeoArticle, UpdateSeoArticle};
use crate::domain::types::SeoArticleId;
use crate::models::seo_article::{
    NewSeoArticle as DbNewSeoArticle, SeoArticle as DbSeoArticle,
    UpdateSeoArticle as DbUpdateSeoArticle,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, SeoArticleReader, SeoArticleWriter, expect_affected, into_domain,
};

impl SeoArticleReader for DieselRepository {
    fn get_seo_article_by_id(&self, id: SeoArticleId) -> RepositoryResult<Option<SeoArticle>> {
        use crate::schema::seo_articles;

        let mut conn = self.conn()?;
        let row = seo_articles::table
            .find(id.get())
            .first::<DbSeoArticle>(&mut conn)
            .optional()?;

        row.map(SeoArticle::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_seo_article_by_slug(&self, slug: &str) -> RepositoryResult<Option<SeoArticle>> {
        use crate::schema::seo_articles;

        let mut conn = self.conn()?;
        let row = seo_articles::table
            .filter(seo_articles::slug.eq(slug))
            .first::<DbSeoArticle>(&mut conn)
            .optional()?;

        row.map(SeoArticle::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_seo_articles(
        &self,
        status: Option<ArticleStatus>,
    ) -> RepositoryResult<Vec<SeoArticle>> {
        use crate::schema::seo_articles;

        let mut conn = self.conn()?;
        let mut items = seo_articles::table.into_boxed();
        if let Some(status) = status {
            items = items.filter(seo_articles::status.eq(status.as_str()));
        }
        let rows = items
            .order((seo_articles::updated_at.desc(), seo_articles::id.desc()))
            .load::<DbSeoArticle>(&mut conn)?;

        into_domain(rows)
    }
}

impl SeoArticleWriter for DieselRepository {
    fn create_seo_article(&self, new_article: &NewSeoArticle) -> RepositoryResult<SeoArticle> {
        use crate::schema::seo_articles;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(seo_articles::table)
            .values(DbNewSeoArticle::from(new_article))
            .get_result::<DbSeoArticle>(&mut conn)?;

        SeoArticle::try_from(row).map_err(RepositoryError::from)
    }

    fn update_seo_article(
        &self,
        id: SeoArticleId,
        updates: &UpdateSeoArticle,
    ) -> RepositoryResult<SeoArticle> {
        use crate::schema::seo_articles;

        let mut conn = self.conn()?;
        let changeset = DbUpdateSeoArticle::new(updates, Utc::now().naive_utc());
        let row = diesel::update(seo_articles::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbSeoArticle>(&mut conn)?;

        SeoArticle::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_seo_article(&self, id: SeoArticleId) -> RepositoryResult<()> {
        use crate::schema::seo_articles;

        let mut conn = self.conn()?;
        let affected = diesel::delete(seo_articles::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}
