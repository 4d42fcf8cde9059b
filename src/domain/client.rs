//! Client companies with their projects and invoices.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientId, CompanyName, Email, InvoiceId, InvoiceNumber, PhoneNumber, ProjectId, Title,
    UserId, Yen, non_blank, string_enum,
};

string_enum!(ProjectStatus, "project status", {
    Planning => "planning",
    InProgress => "in_progress",
    Completed => "completed",
    Cancelled => "cancelled",
});

string_enum!(InvoiceStatus, "invoice status", {
    Draft => "draft",
    Sent => "sent",
    Paid => "paid",
    Overdue => "overdue",
});

impl InvoiceStatus {
    /// Invoices that were billed and still wait for payment.
    pub fn is_outstanding(self) -> bool {
        matches!(self, InvoiceStatus::Sent | InvoiceStatus::Overdue)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: CompanyName,
    pub contact_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    /// Login linked to this client (role `client`) for the documents view.
    pub user_id: Option<UserId>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub name: CompanyName,
    pub contact_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub user_id: Option<UserId>,
    pub notes: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        name: CompanyName,
        contact_name: Option<String>,
        email: Option<Email>,
        phone: Option<PhoneNumber>,
        address: Option<String>,
        user_id: Option<UserId>,
        notes: Option<String>,
    ) -> Self {
        Self {
            name,
            contact_name: non_blank(contact_name),
            email,
            phone,
            address: non_blank(address),
            user_id,
            notes: non_blank(notes),
        }
    }
}

pub type UpdateClient = NewClient;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClientProject {
    pub id: ProjectId,
    pub client_id: ClientId,
    pub name: Title,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub budget: Yen,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewClientProject {
    pub client_id: ClientId,
    pub name: Title,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub budget: Yen,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub type UpdateClientProject = NewClientProject;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClientInvoice {
    pub id: InvoiceId,
    pub client_id: ClientId,
    pub project_id: Option<ProjectId>,
    pub invoice_number: InvoiceNumber,
    pub amount: Yen,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
    pub status: InvoiceStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewClientInvoice {
    pub client_id: ClientId,
    pub project_id: Option<ProjectId>,
    pub invoice_number: InvoiceNumber,
    pub amount: Yen,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
    pub status: InvoiceStatus,
}

pub type UpdateClientInvoice = NewClientInvoice;
