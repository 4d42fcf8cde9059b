//! Employees with their salaries, shifts and advance payments.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::role::Section;
use crate::domain::staff::{
    AdvancePayment, Employee, NewEmployee, StaffSalary, StaffShift,
};
use crate::domain::types::{AdvancePaymentId, EmployeeId, SalaryId, ShiftId};
use crate::dto::summaries::{PayrollMonth, PayrollSummary};
use crate::forms::employees::{AdvancePaymentForm, EmployeeForm, SalaryForm, ShiftForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{EmployeeReader, EmployeeWriter};
use crate::services::{ServiceError, ServiceResult, ensure_section, merge_patch};

pub fn list_employees<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Employee>>
where
    R: EmployeeReader + ?Sized,
{
    ensure_section(user, Section::Employees)?;
    Ok(repo.list_employees()?)
}

pub fn get_employee<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Employee>
where
    R: EmployeeReader + ?Sized,
{
    ensure_section(user, Section::Employees)?;
    repo.get_employee_by_id(EmployeeId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EmployeeForm,
) -> ServiceResult<Employee>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_section(user, Section::Employees)?;

    let new_employee = NewEmployee::try_from(form)?;
    repo.create_employee(&new_employee).map_err(|err| {
        log::error!("Failed to create employee: {err}");
        ServiceError::from(err)
    })
}

pub fn update_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: EmployeeForm,
) -> ServiceResult<Employee>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_section(user, Section::Employees)?;

    let id = EmployeeId::new(id)?;
    let updates = NewEmployee::try_from(form)?;
    repo.update_employee(id, &updates).map_err(|err| {
        log::error!("Failed to update employee {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<Employee>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    let current = get_employee(repo, user, id)?;
    let form: EmployeeForm = merge_patch(&current, patch)?;
    update_employee(repo, user, id, form)
}

pub fn delete_employee<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_section(user, Section::Employees)?;

    let id = EmployeeId::new(id)?;
    repo.delete_employee(id).map_err(|err| {
        log::error!("Failed to delete employee {id}: {err}");
        ServiceError::from(err)
    })
}

/// Resolves the employee of a nested route, failing with `NotFound` when the
/// employee does not exist.
fn existing_employee<R>(repo: &R, employee_id: i32) -> ServiceResult<EmployeeId>
where
    R: EmployeeReader + ?Sized,
{
    let id = EmployeeId::new(employee_id)?;
    match repo.get_employee_by_id(id)? {
        Some(_) => Ok(id),
        None => Err(ServiceError::NotFound),
    }
}

pub fn list_salaries<R>(
    repo: &R,
    user: &AuthenticatedUser,
    employee_id: i32,
) -> ServiceResult<Vec<StaffSalary>>
where
    R: EmployeeReader + ?Sized,
{
    ensure_section(user, Section::Employees)?;
    let employee_id = existing_employee(repo, employee_id)?;
    Ok(repo.list_salaries(Some(employee_id))?)
}

pub fn get_salary<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<StaffSalary>
where
    R: EmployeeReader + ?Sized,
{
    ensure_section(user, Section::Employees)?;
    repo.get_salary_by_id(SalaryId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

/// Records the salary for a month, replacing an earlier record of the same
/// month.
pub fn save_salary<R>(
    repo: &R,
    user: &AuthenticatedUser,
    employee_id: i32,
    form: SalaryForm,
) -> ServiceResult<StaffSalary>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    ensure_section(user, Section::Employees)?;

    let employee_id = existing_employee(repo, employee_id)?;
    let salary = form.into_domain(employee_id)?;
    repo.upsert_salary(&salary).map_err(|err| {
        log::error!("Failed to save salary of employee {employee_id}: {err}");
        ServiceError::from(err)
    })
}

pub fn update_salary<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: SalaryForm,
) -> ServiceResult<StaffSalary>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    let current = get_salary(repo, user, id)?;
    let updates = form.into_domain(current.employee_id)?;
    repo.update_salary(current.id, &updates).map_err(|err| {
        log::error!("Failed to update salary {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_salary<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<StaffSalary>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    let current = get_salary(repo, user, id)?;
    let form: SalaryForm = merge_patch(&current, patch)?;
    let updates = form.into_domain(current.employee_id)?;
    repo.update_salary(current.id, &updates).map_err(|err| {
        log::error!("Failed to patch salary {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn delete_salary<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_section(user, Section::Employees)?;

    let id = SalaryId::new(id)?;
    repo.delete_salary(id).map_err(|err| {
        log::error!("Failed to delete salary {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn list_shifts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    employee_id: i32,
) -> ServiceResult<Vec<StaffShift>>
where
    R: EmployeeReader + ?Sized,
{
    ensure_section(user, Section::Employees)?;
    let employee_id = existing_employee(repo, employee_id)?;
    Ok(repo.list_shifts(employee_id)?)
}

pub fn get_shift<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<StaffShift>
where
    R: EmployeeReader + ?Sized,
{
    ensure_section(user, Section::Employees)?;
    repo.get_shift_by_id(ShiftId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_shift<R>(
    repo: &R,
    user: &AuthenticatedUser,
    employee_id: i32,
    form: ShiftForm,
) -> ServiceResult<StaffShift>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    ensure_section(user, Section::Employees)?;

    let employee_id = existing_employee(repo, employee_id)?;
    let new_shift = form.into_domain(employee_id)?;
    repo.create_shift(&new_shift).map_err(|err| {
        log::error!("Failed to create shift for employee {employee_id}: {err}");
        ServiceError::from(err)
    })
}

pub fn update_shift<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ShiftForm,
) -> ServiceResult<StaffShift>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    let current = get_shift(repo, user, id)?;
    let updates = form.into_domain(current.employee_id)?;
    repo.update_shift(current.id, &updates).map_err(|err| {
        log::error!("Failed to update shift {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_shift<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<StaffShift>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    let current = get_shift(repo, user, id)?;
    let form: ShiftForm = merge_patch(&current, patch)?;
    update_shift(repo, user, id, form)
}

pub fn delete_shift<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_section(user, Section::Employees)?;

    let id = ShiftId::new(id)?;
    repo.delete_shift(id).map_err(|err| {
        log::error!("Failed to delete shift {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn list_advance_payments<R>(
    repo: &R,
    user: &AuthenticatedUser,
    employee_id: i32,
) -> ServiceResult<Vec<AdvancePayment>>
where
    R: EmployeeReader + ?Sized,
{
    ensure_section(user, Section::Employees)?;
    let employee_id = existing_employee(repo, employee_id)?;
    Ok(repo.list_advance_payments(Some(employee_id))?)
}

pub fn get_advance_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<AdvancePayment>
where
    R: EmployeeReader + ?Sized,
{
    ensure_section(user, Section::Employees)?;
    repo.get_advance_payment_by_id(AdvancePaymentId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_advance_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    employee_id: i32,
    form: AdvancePaymentForm,
) -> ServiceResult<AdvancePayment>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    ensure_section(user, Section::Employees)?;

    let employee_id = existing_employee(repo, employee_id)?;
    let new_payment = form.into_domain(employee_id)?;
    repo.create_advance_payment(&new_payment).map_err(|err| {
        log::error!("Failed to create advance payment for employee {employee_id}: {err}");
        ServiceError::from(err)
    })
}

pub fn update_advance_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: AdvancePaymentForm,
) -> ServiceResult<AdvancePayment>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    let current = get_advance_payment(repo, user, id)?;
    let updates = form.into_domain(current.employee_id)?;
    repo.update_advance_payment(current.id, &updates)
        .map_err(|err| {
            log::error!("Failed to update advance payment {id}: {err}");
            ServiceError::from(err)
        })
}

pub fn patch_advance_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<AdvancePayment>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    let current = get_advance_payment(repo, user, id)?;
    let form: AdvancePaymentForm = merge_patch(&current, patch)?;
    update_advance_payment(repo, user, id, form)
}

pub fn delete_advance_payment<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_section(user, Section::Employees)?;

    let id = AdvancePaymentId::new(id)?;
    repo.delete_advance_payment(id).map_err(|err| {
        log::error!("Failed to delete advance payment {id}: {err}");
        ServiceError::from(err)
    })
}

/// Per-month payroll totals, oldest month first.
pub fn summarize_payroll(salaries: &[StaffSalary]) -> PayrollSummary {
    let mut months: BTreeMap<_, PayrollMonth> = BTreeMap::new();
    for salary in salaries {
        let month = months.entry(salary.month).or_insert_with(|| PayrollMonth {
            month: salary.month,
            ..PayrollMonth::default()
        });
        let net = salary.net();
        month.base_salary += salary.base_salary.get();
        month.allowance += salary.allowance.get();
        month.deduction += salary.deduction.get();
        month.net += net;
        if salary.paid {
            month.paid_net += net;
        } else {
            month.unpaid_net += net;
        }
        month.records += 1;
    }

    let months: Vec<PayrollMonth> = months.into_values().collect();
    PayrollSummary {
        total_net: months.iter().map(|m| m.net).sum(),
        paid_net: months.iter().map(|m| m.paid_net).sum(),
        unpaid_net: months.iter().map(|m| m.unpaid_net).sum(),
        months,
    }
}

pub fn payroll_summary<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<PayrollSummary>
where
    R: EmployeeReader + ?Sized,
{
    ensure_section(user, Section::Employees)?;
    let salaries = repo.list_salaries(None)?;
    Ok(summarize_payroll(&salaries))
}


#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::role::Role;
    use crate::domain::staff::{EmployeeStatus, EmploymentType, NewStaffSalary};
    use crate::domain::types::{PersonName, Yen};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{timestamp, user};

    fn employee() -> Employee {
        Employee {
            id: EmployeeId::new(4).unwrap(),
            user_id: None,
            name: PersonName::new("山田 花子").unwrap(),
            email: None,
            phone: None,
            department: Some("営業".into()),
            position: None,
            employment_type: EmploymentType::FullTime,
            hire_date: None,
            status: EmployeeStatus::Active,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn stored_salary(new: &NewStaffSalary) -> StaffSalary {
        StaffSalary {
            id: SalaryId::new(9).unwrap(),
            employee_id: new.employee_id,
            month: new.month,
            base_salary: new.base_salary,
            allowance: new.allowance,
            deduction: new.deduction,
            paid: new.paid,
            created_at: timestamp(),
        }
    }

    #[test]
    fn salary_month_is_normalised_before_upsert() {
        let mut repo = MockRepository::new();
        repo.expect_get_employee_by_id()
            .returning(|_| Ok(Some(employee())));
        repo.expect_upsert_salary()
            .withf(|salary| salary.month == NaiveDate::from_ymd_opt(2026, 4, 1).unwrap())
            .times(1)
            .returning(|salary| Ok(stored_salary(salary)));

        let form: SalaryForm = serde_json::from_value(json!({
            "month": "2026-04",
            "base_salary": 250000,
            "deduction": 30000
        }))
        .unwrap();
        let saved = save_salary(&repo, &user(1, Role::Manager), 4, form).unwrap();
        assert_eq!(saved.net(), 220_000);
    }

    #[test]
    fn salary_for_missing_employee_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_employee_by_id().returning(|_| Ok(None));
        repo.expect_upsert_salary().never();

        let form: SalaryForm =
            serde_json::from_value(json!({ "month": "2026-04", "base_salary": 1 })).unwrap();
        let result = save_salary(&repo, &user(1, Role::Manager), 4, form);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn patching_paid_flag_keeps_amounts() {
        let mut repo = MockRepository::new();
        repo.expect_get_salary_by_id().returning(|_| {
            Ok(Some(stored_salary(&NewStaffSalary {
                employee_id: EmployeeId::new(4).unwrap(),
                month: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
                base_salary: Yen::new(250_000).unwrap(),
                allowance: Yen::ZERO,
                deduction: Yen::new(30_000).unwrap(),
                paid: false,
            })))
        });
        repo.expect_update_salary()
            .withf(|_, updates| updates.paid && updates.base_salary.get() == 250_000)
            .times(1)
            .returning(|_, updates| Ok(stored_salary(updates)));

        let patched =
            patch_salary(&repo, &user(1, Role::Admin), 9, json!({ "paid": true })).unwrap();
        assert!(patched.paid);
    }

    #[test]
    fn staff_cannot_read_payroll() {
        let repo = MockRepository::new();
        let result = payroll_summary(&repo, &user(2, Role::Staff));
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
