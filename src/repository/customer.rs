//! Repository implementation for customers.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::models::customer::{
    Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository, expect_affected,
    into_domain, like_pattern,
};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let row = customers::table
            .find(id.get())
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        row.map(Customer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<Vec<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let mut items = customers::table.into_boxed();

        if let Some(status) = query.status {
            items = items.filter(customers::status.eq(status.as_str()));
        }
        if let Some(user_id) = query.assigned_to {
            items = items.filter(customers::assigned_to.eq(user_id.get()));
        }
        if let Some(term) = query.search.as_deref() {
            let pattern = like_pattern(term);
            items = items.filter(
                customers::company_name
                    .like(pattern.clone())
                    
                    .or(customers::contact_name.like(pattern.clone()))
                    .or(customers::email.like(pattern)),
            );
        }

        let rows = items
            .order(customers::created_at.desc())
            .then_order_by(customers::id.desc())
            .load::<DbCustomer>(&mut conn)?;

        into_domain(rows)
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(customers::table)
            .values(DbNewCustomer::from(new_customer))
            .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(row).map_err(RepositoryError::from)
    }

    fn update_customer(
        &self,
        id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let changeset = DbUpdateCustomer::new(updates, Utc::now().naive_utc());
        let row = diesel::update(customers::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let affected = diesel::delete(customers::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}
