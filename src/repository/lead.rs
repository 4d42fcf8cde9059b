//! Repository implementation for leads.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::lead::{Lead, NewLead, UpdateLead};
use crate::domain::types::LeadId;
use crate::models::lead::{Lead as DbLead, NewLead as DbNewLead};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, LeadListQuery, LeadReader, LeadWriter, expect_affected, into_domain,
    like_pattern,
};

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let row = leads::table
            .find(id.get())
            .first::<DbLead>(&mut conn)
            .optional()?;

        row.map(Lead::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let filtered = || {
            let mut items = leads::table.into_boxed();
            if let Some(status) = query.status {
                items = items.filter(leads::status.eq(status.as_str()));
            }
            if let Some(user_id) = query.assigned_to {
                items = items.filter(leads::assigned_to.eq(user_id.get()));
            }
            if let Some(term) = query.search.as_deref() {
                let pattern = like_pattern(term);
                items = items.filter(
                    leads::name
                        .like(pattern.clone())
                        .or(leads::company.like(pattern.clone()))
                        .or(leads::email.like(pattern.clone()))
                        .or(leads::phone.like(pattern)),
                );
            }
            items
        };

        let total: i64 = filtered().count().get_result(&mut conn)?;

        let mut items = filtered().order((leads::created_at.desc(), leads::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }
        let rows = items.load::<DbLead>(&mut conn)?;

        Ok((total as usize, into_domain(rows)?))
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(leads::table)
            .values(DbNewLead::from(new_lead))
            .get_result::<DbLead>(&mut conn)?;

        Lead::try_from(row).map_err(RepositoryError::from)
    }

    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize> {
        use crate::schema::leads;

        if new_leads.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let insertables = new_leads.iter().map(DbNewLead::from).collect::<Vec<_>>();

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            insertables.iter().try_fold(0, |count, lead| {
                diesel::insert_into(leads::table)
                    .values(lead)
                    .execute(conn)
                    .map(|inserted| count + inserted)
            })
        })?;

        Ok(affected)
    }

    fn update_lead(&self, id: LeadId, updates: &UpdateLead) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let changeset = DbNewLead::from(updates);
        let row = diesel::update(leads::table.find(id.get()))
            .set((&changeset, leads::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbLead>(&mut conn)?;

        Lead::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_lead(&self, id: LeadId) -> RepositoryResult<()> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let affected = diesel::delete(leads::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}
