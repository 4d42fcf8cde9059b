//! Diesel models for sales leads.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{Lead as DomainLead, NewLead as DomainNewLead};
use crate::domain::types::{Email, LeadId, PersonName, PhoneNumber, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leads)]
pub struct Lead {
    pub id: i32,
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub assigned_to: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::leads)]
#[diesel(treat_none_as_null = true)]
pub struct NewLead<'a> {
    pub name: &'a str,
    pub company: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub source: Option<&'a str>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub assigned_to: Option<i32>,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(row: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeadId::new(row.id)?,
            name: PersonName::new(row.name)?,
            company: row.company,
            email: row.email.map(Email::new).transpose()?,
            phone: row.phone.map(PhoneNumber::new).transpose()?,
            address: row.address,
            source: row.source,
            status: row.status.parse()?,
            notes: row.notes,
            assigned_to: row.assigned_to.map(UserId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        Self {
            name: lead.name.as_str(),
            company: lead.company.as_deref(),
            email: lead.email.as_ref().map(Email::as_str),
            phone: lead.phone.as_ref().map(PhoneNumber::as_str),
            address: lead.address.as_deref(),
            source: lead.source.as_deref(),
            status: lead.status.as_str(),
            notes: lead.notes.as_deref(),
            assigned_to: lead.assigned_to.map(UserId::get),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imported_lead_maps_blank_fields_to_null() {
        let lead = DomainNewLead::new(PersonName::new("山田太郎").unwrap())
            .company(Some("株式会社テスト".into()))
            .source(Some("".into()));
        let row = NewLead::from(&lead);
        assert_eq!(row.company, Some("株式会社テスト"));
        assert_eq!(row.source, None);
        assert_eq!(row.status, "new");
    }
}
