//! Agency sales and their commission summary.
//!
//! Agency users record and see only their own sales; executives see all.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::agency::AgencySale;
use crate::domain::role::{Role, Section};
use crate::domain::types::{AgencySaleId, UserId};
use crate::dto::summaries::AgencySummary;
use crate::forms::agency::AgencySaleForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AgencySaleReader, AgencySaleWriter};
use crate::services::{ServiceError, ServiceResult, caller_id, ensure_section, merge_patch};

fn own_sales_only(user: &AuthenticatedUser) -> ServiceResult<Option<UserId>> {
    if user.role == Role::Agency {
        Ok(Some(caller_id(user)?))
    } else {
        Ok(None)
    }
}

pub fn list_sales<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<AgencySale>>
where
    R: AgencySaleReader + ?Sized,
{
    ensure_section(user, Section::AgencySales)?;
    Ok(repo.list_agency_sales(own_sales_only(user)?)?)
}

pub fn get_sale<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<AgencySale>
where
    R: AgencySaleReader + ?Sized,
{
    ensure_section(user, Section::AgencySales)?;
    let agency = own_sales_only(user)?;
    repo.get_agency_sale_by_id(AgencySaleId::new(id)?)?
        .filter(|sale| agency.is_none_or(|agency| sale.agency_id == agency))
        .ok_or(ServiceError::NotFound)
}

pub fn create_sale<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AgencySaleForm,
) -> ServiceResult<AgencySale>
where
    R: AgencySaleWriter + ?Sized,
{
    ensure_section(user, Section::AgencySales)?;

    let new_sale = form.into_domain(own_sales_only(user)?)?;
    repo.create_agency_sale(&new_sale).map_err(|err| {
        log::error!("Failed to create agency sale: {err}");
        ServiceError::from(err)
    })
}

pub fn update_sale<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: AgencySaleForm,
) -> ServiceResult<AgencySale>
where
    R: AgencySaleReader + AgencySaleWriter + ?Sized,
{
    let current = get_sale(repo, user, id)?;
    let updates = form.into_domain(own_sales_only(user)?)?;
    repo.update_agency_sale(current.id, &updates).map_err(|err| {
        log::error!("Failed to update agency sale {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_sale<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<AgencySale>
where
    R: AgencySaleReader + AgencySaleWriter + ?Sized,
{
    let current = get_sale(repo, user, id)?;
    let form: AgencySaleForm = merge_patch(&current, patch)?;
    update_sale(repo, user, id, form)
}

pub fn delete_sale<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: AgencySaleReader + AgencySaleWriter + ?Sized,
{
    let sale = get_sale(repo, user, id)?;
    repo.delete_agency_sale(sale.id).map_err(|err| {
        log::error!("Failed to delete agency sale {id}: {err}");
        ServiceError::from(err)
    })
}

/// Totals over the given sales. Commission is rounded down per sale.
pub fn summarize_agency_sales(sales: &[AgencySale]) -> AgencySummary {
    let mut by_status = BTreeMap::new();
    for sale in sales {
        *by_status.entry(sale.status.as_str()).or_insert(0) += 1;
    }
    AgencySummary {
        total_amount: sales.iter().map(|sale| sale.amount.get()).sum(),
        total_commission: sales.iter().map(AgencySale::commission).sum(),
        sales: sales.len(),
        by_status,
    }
}

pub fn agency_summary<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<AgencySummary>
where
    R: AgencySaleReader + ?Sized,
{
    let sales = list_sales(repo, user)?;
    Ok(summarize_agency_sales(&sales))
}

#[cfg(test)]
mod summary_tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::agency::{CommissionRate, SaleStatus};
    use crate::domain::types::{CompanyName, Title, Yen};
    use crate::services::test_support::timestamp;

    pub(super) fn sale(id: i32, agency: i32, amount: i64, rate: i32, status: SaleStatus) -> AgencySale {
        AgencySale {
            id: AgencySaleId::new(id).unwrap(),
            agency_id: UserId::new(agency).unwrap(),
            customer_name: CompanyName::new("合同会社テスト").unwrap(),
            product: Title::new("光回線").unwrap(),
            amount: Yen::new(amount).unwrap(),
            commission_rate: CommissionRate::new(rate).unwrap(),
            sold_on: NaiveDate::from_ymd_opt(2026, 4, 15).unwrap(),
            status,
            created_at: timestamp(),
        }
    }

    #[test]
    fn commission_is_rounded_down_per_sale() {
        let sales = vec![
            sale(1, 9, 10_001, 15, SaleStatus::Paid),
            sale(2, 9, 20_000, 10, SaleStatus::Pending),
            sale(3, 9, 5_000, 0, SaleStatus::Pending),
        ];
        let summary = summarize_agency_sales(&sales);
        assert_eq!(summary.total_amount, 35_001);
        assert_eq!(summary.total_commission, 1_500 + 2_000);
        assert_eq!(summary.sales, 3);
        assert_eq!(summary.by_status.get("pending"), Some(&2));
        assert_eq!(summary.by_status.get("paid"), Some(&1));
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::summary_tests::sale;
    use super::*;
    use crate::domain::agency::SaleStatus;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user;

    #[test]
    fn agency_sees_only_own_sales() {
        let mut repo = MockRepository::new();
        repo.expect_list_agency_sales()
            .withf(|agency| *agency == Some(UserId::new(9).unwrap()))
            .times(1)
            .returning(|_| Ok(vec![sale(1, 9, 10_000, 10, SaleStatus::Pending)]));

        let summary = agency_summary(&repo, &user(9, Role::Agency)).unwrap();
        assert_eq!(summary.total_commission, 1_000);
    }

    #[test]
    fn agency_sale_is_recorded_for_caller() {
        let mut repo = MockRepository::new();
        repo.expect_create_agency_sale()
            .withf(|new| new.agency_id == UserId::new(9).unwrap())
            .times(1)
            .returning(|_| Ok(sale(1, 9, 30_000, 10, SaleStatus::Pending)));

        let form: AgencySaleForm = serde_json::from_value(json!({
            "agency_id": 4,
            "customer_name": "合同会社テスト",
            "product": "光回線",
            "amount": 30000,
            "commission_rate": 10,
            "sold_on": "2026-04-15"
        }))
        .unwrap();
        create_sale(&repo, &user(9, Role::Agency), form).unwrap();
    }

    #[test]
    fn foreign_sale_is_hidden() {
        let mut repo = MockRepository::new();
        repo.expect_get_agency_sale_by_id()
            .returning(|_| Ok(Some(sale(1, 4, 10_000, 10, SaleStatus::Pending))));

        let result = get_sale(&repo, &user(9, Role::Agency), 1);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn manager_has_no_agency_section() {
        let repo = MockRepository::new();
        let result = list_sales(&repo, &user(1, Role::Manager));
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
