//! Repository implementation for businesses and business designs.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::business::{
    Business, BusinessDesign, NewBusiness, NewBusinessDesign, UpdateBusiness,
    UpdateBusinessDesign,
};
use crate::domain::types::{BusinessDesignId, BusinessId};
use crate::models::business::{
    Business as DbBusiness, BusinessDesign as DbBusinessDesign, NewBusiness as DbNewBusiness,
    NewBusinessDesign as DbNewBusinessDesign, UpdateBusinessDesign as DbUpdateBusinessDesign,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    BusinessReader, BusinessWriter, DieselRepository, expect_affected, into_domain,
};

impl BusinessReader for DieselRepository {
    fn get_business_by_id(&self, id: BusinessId) -> RepositoryResult<Option<Business>> {
        use crate::schema::businesses;

        let mut conn = self.conn()?;
        let row = businesses::table
            .find(id.get())
            .first::<DbBusiness>(&mut conn)
            .optional()?;

        row.map(Business::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_businesses(&self) -> RepositoryResult<Vec<Business>> {
        use crate::schema::businesses;

        let mut conn = self.conn()?;
        let rows = businesses::table
            .order(businesses::name.asc())
            .load::<DbBusiness>(&mut conn)?;

        into_domain(rows)
    }

    fn get_business_design_by_id(
        &self,
        id: BusinessDesignId,
    ) -> RepositoryResult<Option<BusinessDesign>> {
        use crate::schema::business_designs;

        let mut conn = self.conn()?;
        let row = business_designs::table
            .find(id.get())
            .first::<DbBusinessDesign>(&mut conn)
            .optional()?;

        row.map(BusinessDesign::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_business_designs(
        &self,
        business_id: Option<BusinessId>,
    ) -> RepositoryResult<Vec<BusinessDesign>> {
        use crate::schema::business_designs;

        let mut conn = self.conn()?;
        let mut items = business_designs::table.into_boxed();
        if let Some(business_id) = business_id {
            items = items.filter(business_designs::business_id.eq(business_id.get()));
        }
        let rows = items
            .order(business_designs::updated_at.desc())
            .load::<DbBusinessDesign>(&mut conn)?;

        into_domain(rows)
    }
}

impl BusinessWriter for DieselRepository {
    fn create_business(&self, new_business: &NewBusiness) -> RepositoryResult<Business> {
        use crate::schema::businesses;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(businesses::table)
            .values(DbNewBusiness::from(new_business))
            .get_result::<DbBusiness>(&mut conn)?;

        Business::try_from(row).map_err(RepositoryError::from)
    }

    fn update_business(
        &self,
        id: BusinessId,
        updates: &UpdateBusiness,
    ) -> RepositoryResult<Business> {
        use crate::schema::businesses;

        let mut conn = self.conn()?;
        let changeset = DbNewBusiness::from(updates);
        let row = diesel::update(businesses::table.find(id.get()))
            .set((&changeset, businesses::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbBusiness>(&mut conn)?;

        Business::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_business(&self, id: BusinessId) -> RepositoryResult<()> {
        use crate::schema::businesses;

        let mut conn = self.conn()?;
        let affected = diesel::delete(businesses::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }

    fn create_business_design(
        &self,
        new_design: &NewBusinessDesign,
    ) -> RepositoryResult<BusinessDesign> {
        use crate::schema::business_designs;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(business_designs::table)
            .values(DbNewBusinessDesign::from(new_design))
            .get_result::<DbBusinessDesign>(&mut conn)?;

        BusinessDesign::try_from(row).map_err(RepositoryError::from)
    }

    fn update_business_design(
        &self,
        id: BusinessDesignId,
        updates: &UpdateBusinessDesign,
    ) -> RepositoryResult<BusinessDesign> {
        use crate::schema::business_designs;

        let mut conn = self.conn()?;
        let changeset = DbUpdateBusinessDesign::new(updates, Utc::now().naive_utc());
        let row = diesel::update(business_designs::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbBusinessDesign>(&mut conn)?;

        BusinessDesign::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_business_design(&self, id: BusinessDesignId) -> RepositoryResult<()> {
        use crate::schema::business_designs;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(business_designs::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}
