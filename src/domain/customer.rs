//! Customers tracked by the sales team.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CompanyName, CustomerId, Email, PhoneNumber, UserId, non_blank, string_enum,
};

string_enum!(CustomerStatus, "customer status", {
    Prospect => "prospect",
    Negotiating => "negotiating",
    Active => "active",
    Inactive => "inactive",
});

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub company_name: CompanyName,
    pub contact_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub status: CustomerStatus,
    pub notes: Option<String>,
    pub assigned_to: Option<UserId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields accepted when creating a customer or replacing it from the edit modal.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCustomer {
    pub company_name: CompanyName,
    pub contact_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub status: CustomerStatus,
    pub notes: Option<String>,
    pub assigned_to: Option<UserId>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(company_name: CompanyName, status: CustomerStatus) -> Self {
        Self {
            company_name,
            contact_name: None,
            email: None,
            phone: None,
            address: None,
            industry: None,
            status,
            notes: None,
            assigned_to: None,
        }
    }

    #[must_use]
    pub fn with_contact(
        mut self,
        contact_name: Option<String>,
        email: Option<Email>,
        phone: Option<PhoneNumber>,
    ) -> Self {
        self.contact_name = non_blank(contact_name);
        self.email = email;
        self.phone = phone;
        self
    }

    #[must_use]
    pub fn with_details(
        mut self,
        address: Option<String>,
        industry: Option<String>,
        notes: Option<String>,
        assigned_to: Option<UserId>,
    ) -> Self {
        self.address = non_blank(address);
        self.industry = non_blank(industry);
        self.notes = non_blank(notes);
        self.assigned_to = assigned_to;
        self
    }
}

pub type UpdateCustomer = NewCustomer;
