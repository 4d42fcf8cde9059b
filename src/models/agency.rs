//! Diesel models for agency sales.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::agency::{
    AgencySale as DomainAgencySale, CommissionRate, NewAgencySale as DomainNewAgencySale,
};
use crate::domain::types::{AgencySaleId, CompanyName, Title, TypeConstraintError, UserId, Yen};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::agency_sales)]
pub struct AgencySale {
    pub id: i32,
    pub agency_id: i32,
    pub customer_name: String,
    pub product: String,
    pub amount: i64,
    pub commission_rate: i32,
    pub sold_on: NaiveDate,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::agency_sales)]
pub struct NewAgencySale<'a> {
    pub agency_id: i32,
    pub customer_name: &'a str,
    pub product: &'a str,
    pub amount: i64,
    pub commission_rate: i32,
    pub sold_on: NaiveDate,
    pub status: &'a str,
}

impl TryFrom<AgencySale> for DomainAgencySale {
    type Error = TypeConstraintError;

    fn try_from(row: AgencySale) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AgencySaleId::new(row.id)?,
            agency_id: UserId::new(row.agency_id)?,
            customer_name: CompanyName::new(row.customer_name)?,
            product: Title::new(row.product)?,
            amount: Yen::new(row.amount)?,
            commission_rate: CommissionRate::new(row.commission_rate)?,
            sold_on: row.sold_on,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewAgencySale> for NewAgencySale<'a> {
    fn from(sale: &'a DomainNewAgencySale) -> Self {
        Self {
            agency_id: sale.agency_id.get(),
            customer_name: sale.customer_name.as_str(),
            product: sale.product.as_str(),
            amount: sale.amount.get(),
            commission_rate: sale.commission_rate.get(),
            sold_on: sale.sold_on,
            status: sale.status.as_str(),
        }
    }
}
