//! Repository implementation for agency sales.

use diesel::prelude::*;

use crate::domain::agency::{AgencySale, NewAgencySale, UpdateAgencySale};
use crate::domain::types::{AgencySaleId, UserId};
use crate::models::agency::{AgencySale as DbAgencySale, NewAgencySale as DbNewAgencySale};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AgencySaleReader, AgencySaleWriter, DieselRepository, expect_affected, into_domain,
};

impl AgencySaleReader for DieselRepository {
    fn get_agency_sale_by_id(&self, id: AgencySaleId) -> RepositoryResult<Option<AgencySale>> {
        use crate::schema::agency_sales;

        let mut conn = self.conn()?;
        let row = agency_sales::table
            .find(id.get())
            .first::<DbAgencySale>(&mut conn)
            .optional()?;

        row.map(AgencySale::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_agency_sales(&self, agency_id: Option<UserId>) -> RepositoryResult<Vec<AgencySale>> {
        use crate::schema::agency_sales;

        let mut conn = self.conn()?;
        let mut items = agency_sales::table.into_boxed();
        if let Some(agency_id) = agency_id {
            items = items.filter(agency_sales::agency_id.eq(agency_id.get()));
        }
        let rows = items
            .order((agency_sales::sold_on.desc(), agency_sales::id.desc()))
            .load::<DbAgencySale>(&mut conn)?;

        into_domain(rows)
    }
}

impl AgencySaleWriter for DieselRepository {
    fn create_agency_sale(&self, new_sale: &NewAgencySale) -> RepositoryResult<AgencySale> {
        use crate::schema::agency_sales;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(agency_sales::table)
            .values(DbNewAgencySale::from(new_sale))
            .get_result::<DbAgencySale>(&mut conn)?;

        AgencySale::try_from(row).map_err(RepositoryError::from)
    }

    fn update_agency_sale(
        &self,
        id: AgencySaleId,
        updates: &UpdateAgencySale,
    ) -> RepositoryResult<AgencySale> {
        use crate::schema::agency_sales;

        let mut conn = self.conn()?;
        let changeset = DbNewAgencySale::from(updates);
        let row = diesel::update(agency_sales::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbAgencySale>(&mut conn)?;

        AgencySale::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_agency_sale(&self, id: AgencySaleId) -> RepositoryResult<()> {
        use crate::schema::agency_sales;

        let mut conn = self.conn()?;
        let affected = diesel::delete(agency_sales::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}
