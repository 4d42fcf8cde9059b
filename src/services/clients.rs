//! Client companies, their projects and invoices.
//!
//! Staff with the `clients` section manage everything. Client users reach the
//! read-only `documents` view: the projects and invoices of the companies
//! linked to their account.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::client::{
    Client, ClientInvoice, ClientProject, InvoiceStatus, NewClient, NewClientInvoice,
    NewClientProject,
};
use crate::domain::role::Section;
use crate::domain::types::{ClientId, InvoiceId, ProjectId};
use crate::dto::summaries::InvoiceTotals;
use crate::forms::clients::{ClientFilter, ClientForm, ClientInvoiceForm, ClientProjectForm};
use crate::forms::optional_id;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{
    ServiceError, ServiceResult, caller_id, ensure_section, merge_patch,
};

/// Which client companies the caller may read documents of.
enum DocumentScope {
    All,
    Own(Vec<ClientId>),
}

impl DocumentScope {
    fn allows(&self, client_id: ClientId) -> bool {
        match self {
            DocumentScope::All => true,
            DocumentScope::Own(ids) => ids.contains(&client_id),
        }
    }
}

fn document_scope<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DocumentScope>
where
    R: ClientReader + ?Sized,
{
    if user.role.can_access(Section::Clients) {
        return Ok(DocumentScope::All);
    }
    ensure_section(user, Section::Documents)?;
    let own = repo
        .list_clients_for_user(caller_id(user)?)?
        .into_iter()
        .map(|client| client.id)
        .collect();
    Ok(DocumentScope::Own(own))
}

/// Client ids to load for a list request, honouring the optional filter.
fn scoped_client_ids(scope: &DocumentScope, filter: Option<ClientId>) -> Option<Vec<Option<ClientId>>> {
    match (scope, filter) {
        (DocumentScope::All, filter) => Some(vec![filter]),
        (DocumentScope::Own(ids), Some(id)) if ids.contains(&id) => Some(vec![Some(id)]),
        (DocumentScope::Own(_), Some(_)) => None,
        (DocumentScope::Own(ids), None) => Some(ids.iter().copied().map(Some).collect()),
    }
}

pub fn list_clients<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    ensure_section(user, Section::Clients)?;
    Ok(repo.list_clients()?)
}

pub fn get_client<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    ensure_section(user, Section::Clients)?;
    repo.get_client_by_id(ClientId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_client<R>(repo: &R, user: &AuthenticatedUser, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;

    let new_client = NewClient::try_from(form)?;
    repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to create client: {err}");
        ServiceError::from(err)
    })
}

pub fn update_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ClientForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;

    let id = ClientId::new(id)?;
    let updates = NewClient::try_from(form)?;
    repo.update_client(id, &updates).map_err(|err| {
        log::error!("Failed to update client {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let current = get_client(repo, user, id)?;
    let form: ClientForm = merge_patch(&current, patch)?;
    update_client(repo, user, id, form)
}

pub fn delete_client<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;

    let id = ClientId::new(id)?;
    repo.delete_client(id).map_err(|err| {
        log::error!("Failed to delete client {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn list_projects<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: ClientFilter,
) -> ServiceResult<Vec<ClientProject>>
where
    R: ClientReader + ?Sized,
{
    let scope = document_scope(repo, user)?;
    let Some(client_ids) = scoped_client_ids(&scope, optional_id(filter.client_id)?) else {
        return Ok(Vec::new());
    };

    let mut projects = Vec::new();
    for client_id in client_ids {
        projects.extend(repo.list_projects(client_id)?);
    }
    Ok(projects)
}

pub fn get_project<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<ClientProject>
where
    R: ClientReader + ?Sized,
{
    let scope = document_scope(repo, user)?;
    repo.get_project_by_id(ProjectId::new(id)?)?
        .filter(|project| scope.allows(project.client_id))
        .ok_or(ServiceError::NotFound)
}

pub fn create_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ClientProjectForm,
) -> ServiceResult<ClientProject>
where
    R: ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;

    let new_project = NewClientProject::try_from(form)?;
    repo.create_project(&new_project).map_err(|err| {
        log::error!("Failed to create project: {err}");
        ServiceError::from(err)
    })
}

pub fn update_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ClientProjectForm,
) -> ServiceResult<ClientProject>
where
    R: ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;

    let id = ProjectId::new(id)?;
    let updates = NewClientProject::try_from(form)?;
    repo.update_project(id, &updates).map_err(|err| {
        log::error!("Failed to update project {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<ClientProject>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;
    let current = get_project(repo, user, id)?;
    let form: ClientProjectForm = merge_patch(&current, patch)?;
    update_project(repo, user, id, form)
}

pub fn delete_project<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;

    let id = ProjectId::new(id)?;
    repo.delete_project(id).map_err(|err| {
        log::error!("Failed to delete project {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn list_invoices<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: ClientFilter,
) -> ServiceResult<Vec<ClientInvoice>>
where
    R: ClientReader + ?Sized,
{
    let scope = document_scope(repo, user)?;
    let Some(client_ids) = scoped_client_ids(&scope, optional_id(filter.client_id)?) else {
        return Ok(Vec::new());
    };

    let mut invoices = Vec::new();
    for client_id in client_ids {
        invoices.extend(repo.list_invoices(client_id)?);
    }
    Ok(invoices)
}

pub fn get_invoice<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<ClientInvoice>
where
    R: ClientReader + ?Sized,
{
    let scope = document_scope(repo, user)?;
    repo.get_invoice_by_id(InvoiceId::new(id)?)?
        .filter(|invoice| scope.allows(invoice.client_id))
        .ok_or(ServiceError::NotFound)
}

pub fn create_invoice<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ClientInvoiceForm,
) -> ServiceResult<ClientInvoice>
where
    R: ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;

    let new_invoice = NewClientInvoice::try_from(form)?;
    repo.create_invoice(&new_invoice).map_err(|err| {
        log::error!("Failed to create invoice: {err}");
        ServiceError::from(err)
    })
}

pub fn update_invoice<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ClientInvoiceForm,
) -> ServiceResult<ClientInvoice>
where
    R: ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;

    let id = InvoiceId::new(id)?;
    let updates = NewClientInvoice::try_from(form)?;
    repo.update_invoice(id, &updates).map_err(|err| {
        log::error!("Failed to update invoice {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_invoice<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<ClientInvoice>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;
    let current = get_invoice(repo, user, id)?;
    let form: ClientInvoiceForm = merge_patch(&current, patch)?;
    update_invoice(repo, user, id, form)
}

pub fn delete_invoice<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    ensure_section(user, Section::Clients)?;

    let id = InvoiceId::new(id)?;
    repo.delete_invoice(id).map_err(|err| {
        log::error!("Failed to delete invoice {id}: {err}");
        ServiceError::from(err)
    })
}

/// Billed, paid and outstanding totals per client, in client order.
pub fn summarize_invoices(clients: &[Client], invoices: &[ClientInvoice]) -> Vec<InvoiceTotals> {
    let mut totals: BTreeMap<ClientId, InvoiceTotals> = BTreeMap::new();
    for invoice in invoices {
        let entry = totals
            .entry(invoice.client_id)
            .or_insert_with(|| InvoiceTotals {
                client_id: invoice.client_id,
                client_name: clients
                    .iter()
                    .find(|client| client.id == invoice.client_id)
                    .map(|client| client.name.to_string())
                    .unwrap_or_default(),
                billed: 0,
                paid: 0,
                outstanding: 0,
            });
        let amount = invoice.amount.get();
        entry.billed += amount;
        if invoice.status == InvoiceStatus::Paid {
            entry.paid += amount;
        } else if invoice.status.is_outstanding() {
            entry.outstanding += amount;
        }
    }
    totals.into_values().collect()
}

pub fn invoice_summary<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<InvoiceTotals>>
where
    R: ClientReader + ?Sized,
{
    let scope = document_scope(repo, user)?;
    let clients: Vec<Client> = match &scope {
        DocumentScope::All => repo.list_clients()?,
        DocumentScope::Own(_) => repo.list_clients_for_user(caller_id(user)?)?,
    };
    let invoices = list_invoices(repo, user, ClientFilter::default())?;
    Ok(summarize_invoices(&clients, &invoices))
}

#[cfg(test)]
mod summary_tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{CompanyName, InvoiceNumber, Yen};
    use crate::services::test_support::timestamp;

    fn client(id: i32, name: &str) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            name: CompanyName::new(name).unwrap(),
            contact_name: None,
            email: None,
            phone: None,
            address: None,
            user_id: None,
            notes: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn invoice(id: i32, client_id: i32, amount: i64, status: InvoiceStatus) -> ClientInvoice {
        ClientInvoice {
            id: InvoiceId::new(id).unwrap(),
            client_id: ClientId::new(client_id).unwrap(),
            project_id: None,
            invoice_number: InvoiceNumber::new(format!("INV-{id}")).unwrap(),
            amount: Yen::new(amount).unwrap(),
            issued_on: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            due_on: None,
            status,
            created_at: timestamp(),
        }
    }

    #[test]
    fn totals_split_paid_and_outstanding() {
        let clients = vec![client(1, "A社"), client(2, "B社")];
        let invoices = vec![
            invoice(1, 1, 100_000, InvoiceStatus::Paid),
            invoice(2, 1, 50_000, InvoiceStatus::Sent),
            invoice(3, 1, 20_000, InvoiceStatus::Draft),
            invoice(4, 2, 30_000, InvoiceStatus::Overdue),
        ];
        let totals = summarize_invoices(&clients, &invoices);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].client_name, "A社");
        assert_eq!(totals[0].billed, 170_000);
        assert_eq!(totals[0].paid, 100_000);
        assert_eq!(totals[0].outstanding, 50_000);
        assert_eq!(totals[1].outstanding, 30_000);
        let billed: i64 = totals.iter().map(|t| t.billed).sum();
        assert_eq!(billed, invoices.iter().map(|i| i.amount.get()).sum::<i64>());
    }
}
