//! Diesel models for customers.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{Customer as DomainCustomer, NewCustomer as DomainNewCustomer};
use crate::domain::types::{
    CompanyName, CustomerId, Email, PhoneNumber, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
pub struct Customer {
    pub id: i32,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub assigned_to: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub company_name: &'a str,
    pub contact_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub industry: Option<&'a str>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub assigned_to: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCustomer<'a> {
    pub company_name: &'a str,
    pub contact_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub industry: Option<&'a str>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub assigned_to: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(row: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::new(row.id)?,
            company_name: CompanyName::new(row.company_name)?,
            contact_name: row.contact_name,
            email: row.email.map(Email::new).transpose()?,
            phone: row.phone.map(PhoneNumber::new).transpose()?,
            address: row.address,
            industry: row.industry,
            status: row.status.parse()?,
            notes: row.notes,
            assigned_to: row.assigned_to.map(UserId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            company_name: customer.company_name.as_str(),
            contact_name: customer.contact_name.as_deref(),
            email: customer.email.as_ref().map(Email::as_str),
            phone: customer.phone.as_ref().map(PhoneNumber::as_str),
            address: customer.address.as_deref(),
            industry: customer.industry.as_deref(),
            status: customer.status.as_str(),
            notes: customer.notes.as_deref(),
            assigned_to: customer.assigned_to.map(UserId::get),
        }
    }
}

impl<'a> UpdateCustomer<'a> {
    pub fn new(customer: &'a DomainNewCustomer, now: NaiveDateTime) -> Self {
        let row = NewCustomer::from(customer);
        Self {
            company_name: row.company_name,
            contact_name: row.contact_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            industry: row.industry,
            status: row.status,
            notes: row.notes,
            assigned_to: row.assigned_to,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::customer::CustomerStatus;

    #[test]
    fn from_domain_new_customer() {
        let domain = DomainNewCustomer::new(
            CompanyName::new("株式会社サンプル").unwrap(),
            CustomerStatus::Negotiating,
        )
        .with_contact(
            Some("佐藤".into()),
            Some(Email::new("sato@sample.jp").unwrap()),
            None,
        );
        let row: NewCustomer = (&domain).into();
        assert_eq!(row.company_name, "株式会社サンプル");
        assert_eq!(row.status, "negotiating");
        assert_eq!(row.email, Some("sato@sample.jp"));
        assert_eq!(row.phone, None);
    }

    #[test]
    fn customer_row_into_domain() {
        let now = Utc::now().naive_utc();
        let row = Customer {
            id: 7,
            company_name: "ACME".into(),
            contact_name: None,
            email: None,
            phone: Some("+81312345678".into()),
            address: None,
            industry: Some("IT".into()),
            status: "active".into(),
            notes: None,
            assigned_to: Some(2),
            created_at: now,
            updated_at: now,
        };
        let domain = DomainCustomer::try_from(row).expect("valid row");
        assert_eq!(domain.status, CustomerStatus::Active);
        assert_eq!(domain.assigned_to.map(UserId::get), Some(2));
    }
}
