use serde_json::Value;

use crate::domain::customer::{Customer, CustomerStatus, NewCustomer};
use crate::domain::role::Section;
use crate::domain::types::{CustomerId, non_blank};
use crate::forms::customers::{CustomerForm, CustomerListParams};
use crate::forms::parse_optional;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{CustomerListQuery, CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult, ensure_section, merge_patch};

pub fn list_customers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: CustomerListParams,
) -> ServiceResult<Vec<Customer>>
where
    R: CustomerReader + ?Sized,
{
    ensure_section(user, Section::Customers)?;

    let mut query = CustomerListQuery::default();
    if let Some(term) = non_blank(params.search) {
        query = query.search(term);
    }
    if let Some(status) = parse_optional::<CustomerStatus>(params.status)? {
        query = query.status(status);
    }

    Ok(repo.list_customers(query)?)
}

pub fn get_customer<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    ensure_section(user, Section::Customers)?;
    repo.get_customer_by_id(CustomerId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    ensure_section(user, Section::Customers)?;

    let new_customer = NewCustomer::try_from(form)?;

    repo.create_customer(&new_customer).map_err(|err| {
        log::error!("Failed to create customer: {err}");
        ServiceError::from(err)
    })
}

pub fn update_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: CustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    ensure_section(user, Section::Customers)?;

    let id = CustomerId::new(id)?;
    let updates = NewCustomer::try_from(form)?;

    repo.update_customer(id, &updates).map_err(|err| {
        log::error!("Failed to update customer {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<Customer>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let current = get_customer(repo, user, id)?;
    let form: CustomerForm = merge_patch(&current, patch)?;
    update_customer(repo, user, id, form)
}

pub fn delete_customer<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: CustomerWriter + ?Sized,
{
    ensure_section(user, Section::Customers)?;

    let id = CustomerId::new(id)?;
    repo.delete_customer(id).map_err(|err| {
        log::error!("Failed to delete customer {id}: {err}");
        ServiceError::from(err)
    })
}
