//! Sales leads, created by hand or imported from CSV.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, LeadId, PersonName, PhoneNumber, UserId, non_blank, string_enum};

string_enum!(LeadStatus, "lead status", {
    New => "new",
    Contacted => "contacted",
    Qualified => "qualified",
    Won => "won",
    Lost => "lost",
});

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub name: PersonName,
    pub company: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub assigned_to: Option<UserId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLead {
    pub name: PersonName,
    pub company: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub assigned_to: Option<UserId>,
}

impl NewLead {
    /// Starts a lead in the `new` status with no contact details.
    #[must_use]
    pub fn new(name: PersonName) -> Self {
        Self {
            name,
            company: None,
            email: None,
            phone: None,
            address: None,
            source: None,
            status: LeadStatus::New,
            notes: None,
            assigned_to: None,
        }
    }

    #[must_use]
    pub fn company(mut self, company: Option<String>) -> Self {
        self.company = non_blank(company);
        self
    }

    #[must_use]
    pub fn address(mut self, address: Option<String>) -> Self {
        self.address = non_blank(address);
        self
    }

    #[must_use]
    pub fn source(mut self, source: Option<String>) -> Self {
        self.source = non_blank(source);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = non_blank(notes);
        self
    }
}

pub type UpdateLead = NewLead;
