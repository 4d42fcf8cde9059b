//! Diesel models for clients, their projects and invoices.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, ClientInvoice as DomainClientInvoice,
    ClientProject as DomainClientProject, NewClient as DomainNewClient,
    NewClientInvoice as DomainNewClientInvoice, NewClientProject as DomainNewClientProject,
};
use crate::domain::types::{
    ClientId, CompanyName, Email, InvoiceId, InvoiceNumber, PhoneNumber, ProjectId, Title,
    TypeConstraintError, UserId, Yen,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub user_id: Option<i32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Insertable form of [`Client`], also used as the full-replace changeset.
pub struct NewClient<'a> {
    pub name: &'a str,
    pub contact_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub user_id: Option<i32>,
    pub notes: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::client_projects)]
pub struct ClientProject {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub budget: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::client_projects)]
#[diesel(treat_none_as_null = true)]
pub struct NewClientProject<'a> {
    pub client_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub budget: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::client_invoices)]
pub struct ClientInvoice {
    pub id: i32,
    pub client_id: i32,
    pub project_id: Option<i32>,
    pub invoice_number: String,
    pub amount: i64,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::client_invoices)]
#[diesel(treat_none_as_null = true)]
pub struct NewClientInvoice<'a> {
    pub client_id: i32,
    pub project_id: Option<i32>,
    pub invoice_number: &'a str,
    pub amount: i64,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
    pub status: &'a str,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(row: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(row.id)?,
            name: CompanyName::new(row.name)?,
            contact_name: row.contact_name,
            email: row.email.map(Email::new).transpose()?,
            phone: row.phone.map(PhoneNumber::new).transpose()?,
            address: row.address,
            user_id: row.user_id.map(UserId::new).transpose()?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            name: client.name.as_str(),
            contact_name: client.contact_name.as_deref(),
            email: client.email.as_ref().map(Email::as_str),
            phone: client.phone.as_ref().map(PhoneNumber::as_str),
            address: client.address.as_deref(),
            user_id: client.user_id.map(UserId::get),
            notes: client.notes.as_deref(),
        }
    }
}

impl TryFrom<ClientProject> for DomainClientProject {
    type Error = TypeConstraintError;

    fn try_from(row: ClientProject) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProjectId::new(row.id)?,
            client_id: ClientId::new(row.client_id)?,
            name: Title::new(row.name)?,
            description: row.description,
            status: row.status.parse()?,
            budget: Yen::new(row.budget)?,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClientProject> for NewClientProject<'a> {
    fn from(project: &'a DomainNewClientProject) -> Self {
        Self {
            client_id: project.client_id.get(),
            name: project.name.as_str(),
            description: project.description.as_deref(),
            status: project.status.as_str(),
            budget: project.budget.get(),
            start_date: project.start_date,
            end_date: project.end_date,
        }
    }
}

impl TryFrom<ClientInvoice> for DomainClientInvoice {
    type Error = TypeConstraintError;

    fn try_from(row: ClientInvoice) -> Result<Self, Self::Error> {
        Ok(Self {
            id: InvoiceId::new(row.id)?,
            client_id: ClientId::new(row.client_id)?,
            project_id: row.project_id.map(ProjectId::new).transpose()?,
            invoice_number: InvoiceNumber::new(row.invoice_number)?,
            amount: Yen::new(row.amount)?,
            issued_on: row.issued_on,
            due_on: row.due_on,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewClientInvoice> for NewClientInvoice<'a> {
    fn from(invoice: &'a DomainNewClientInvoice) -> Self {
        Self {
            client_id: invoice.client_id.get(),
            project_id: invoice.project_id.map(ProjectId::get),
            invoice_number: invoice.invoice_number.as_str(),
            amount: invoice.amount.get(),
            issued_on: invoice.issued_on,
            due_on: invoice.due_on,
            status: invoice.status.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::client::InvoiceStatus;

    #[test]
    fn invoice_row_into_domain() {
        let row = ClientInvoice {
            id: 1,
            client_id: 2,
            project_id: None,
            invoice_number: "INV-2026-001".into(),
            amount: 330_000,
            issued_on: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            due_on: NaiveDate::from_ymd_opt(2026, 5, 31),
            status: "sent".into(),
            created_at: Utc::now().naive_utc(),
        };
        let invoice = DomainClientInvoice::try_from(row).expect("valid invoice");
        assert_eq!(invoice.status, InvoiceStatus::Sent);
        assert_eq!(invoice.amount.get(), 330_000);
    }

    #[test]
    fn negative_invoice_amount_is_rejected() {
        let row = ClientInvoice {
            id: 1,
            client_id: 2,
            project_id: None,
            invoice_number: "X".into(),
            amount: -1,
            issued_on: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            due_on: None,
            status: "draft".into(),
            created_at: Utc::now().naive_utc(),
        };
        assert!(DomainClientInvoice::try_from(row).is_err());
    }
}
