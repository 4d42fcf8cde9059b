//! Leads, the paginated leads page and the CSV import.
//!
//! Agency users work only with the leads assigned to them; the leads they
//! create or import are assigned to them.

use serde_json::Value;

use crate::domain::lead::{Lead, LeadStatus, NewLead};
use crate::domain::role::{Role, Section};
use crate::domain::types::{LeadId, UserId, non_blank};
use crate::dto::leads::{LeadsPageData, LeadsQuery};
use crate::forms::leads::{LeadForm, parse_leads_csv};
use crate::forms::parse_optional;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{LeadListQuery, LeadReader, LeadWriter};
use crate::services::{ServiceError, ServiceResult, caller_id, ensure_section, merge_patch};

/// The agency user whose leads the caller is limited to, if any.
fn agency_scope(user: &AuthenticatedUser) -> ServiceResult<Option<UserId>> {
    if user.role == Role::Agency {
        Ok(Some(caller_id(user)?))
    } else {
        Ok(None)
    }
}

fn list_query(user: &AuthenticatedUser, params: &LeadsQuery) -> ServiceResult<LeadListQuery> {
    let mut query = LeadListQuery::default();
    if let Some(term) = non_blank(params.search.clone()) {
        query = query.search(term);
    }
    if let Some(status) = parse_optional::<LeadStatus>(params.status.clone())? {
        query = query.status(status);
    }
    if let Some(agency) = agency_scope(user)? {
        query = query.assigned_to(agency);
    }
    Ok(query)
}

pub fn list_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: LeadsQuery,
) -> ServiceResult<Vec<Lead>>
where
    R: LeadReader + ?Sized,
{
    ensure_section(user, Section::Leads)?;

    let (_, leads) = repo.list_leads(list_query(user, &params)?)?;
    Ok(leads)
}

/// Loads one page of leads for the `/leads` page.
pub fn load_leads_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: LeadsQuery,
) -> ServiceResult<LeadsPageData>
where
    R: LeadReader + ?Sized,
{
    ensure_section(user, Section::Leads)?;

    let page = params.page.unwrap_or(1).max(1);
    let query = list_query(user, &params)?.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let (total, leads) = repo.list_leads(query)?;

    Ok(LeadsPageData {
        leads: Paginated::from_total(leads, page, total, DEFAULT_ITEMS_PER_PAGE),
        total,
        search_query: non_blank(params.search),
    })
}

pub fn get_lead<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Lead>
where
    R: LeadReader + ?Sized,
{
    ensure_section(user, Section::Leads)?;
    let agency = agency_scope(user)?;
    repo.get_lead_by_id(LeadId::new(id)?)?
        .filter(|lead| agency.is_none() || lead.assigned_to == agency)
        .ok_or(ServiceError::NotFound)
}

/// Validates the form and applies the agency assignment rule.
fn lead_from_form(user: &AuthenticatedUser, form: LeadForm) -> ServiceResult<NewLead> {
    let mut lead = NewLead::try_from(form)?;
    if let Some(agency) = agency_scope(user)? {
        lead.assigned_to = Some(agency);
    }
    Ok(lead)
}

pub fn create_lead<R>(repo: &R, user: &AuthenticatedUser, form: LeadForm) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    ensure_section(user, Section::Leads)?;

    let new_lead = lead_from_form(user, form)?;
    repo.create_lead(&new_lead).map_err(|err| {
        log::error!("Failed to create lead: {err}");
        ServiceError::from(err)
    })
}

pub fn update_lead<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: LeadForm,
) -> ServiceResult<Lead>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    let current = get_lead(repo, user, id)?;
    let updates = lead_from_form(user, form)?;
    repo.update_lead(current.id, &updates).map_err(|err| {
        log::error!("Failed to update lead {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_lead<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<Lead>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    let current = get_lead(repo, user, id)?;
    let form: LeadForm = merge_patch(&current, patch)?;
    update_lead(repo, user, id, form)
}

pub fn delete_lead<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    let lead = get_lead(repo, user, id)?;
    repo.delete_lead(lead.id).map_err(|err| {
        log::error!("Failed to delete lead {id}: {err}");
        ServiceError::from(err)
    })
}

/// Parses CSV text and stores every named row. Returns the number of created
/// leads; zero is a valid outcome.
pub fn import_leads<R>(repo: &R, user: &AuthenticatedUser, csv: &str) -> ServiceResult<usize>
where
    R: LeadWriter + ?Sized,
{
    ensure_section(user, Section::Leads)?;

    let mut leads = parse_leads_csv(csv).map_err(|err| {
        log::error!("Failed to parse leads CSV: {err}");
        ServiceError::from(err)
    })?;
    if leads.is_empty() {
        return Ok(0);
    }
    if let Some(agency) = agency_scope(user)? {
        for lead in &mut leads {
            lead.assigned_to = Some(agency);
        }
    }

    repo.create_leads(&leads).map_err(|err| {
        log::error!("Failed to import leads: {err}");
        ServiceError::from(err)
    })
}
