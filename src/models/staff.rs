//! Diesel models for employees and payroll records.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;

use crate::domain::staff::{
    AdvancePayment as DomainAdvancePayment, Employee as DomainEmployee,
    NewAdvancePayment as DomainNewAdvancePayment, NewEmployee as DomainNewEmployee,
    NewStaffSalary as DomainNewStaffSalary, NewStaffShift as DomainNewStaffShift,
    StaffSalary as DomainStaffSalary, StaffShift as DomainStaffShift,
};
use crate::domain::types::{
    AdvancePaymentId, Email, EmployeeId, PersonName, PhoneNumber, SalaryId, ShiftId,
    TypeConstraintError, UserId, Yen,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::employees)]
pub struct Employee {
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub employment_type: String,
    pub hire_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(treat_none_as_null = true)]
pub struct NewEmployee<'a> {
    pub user_id: Option<i32>,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub department: Option<&'a str>,
    pub position: Option<&'a str>,
    pub employment_type: &'a str,
    pub hire_date: Option<NaiveDate>,
    pub status: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Employee, foreign_key = employee_id))]
#[diesel(table_name = crate::schema::staff_salaries)]
pub struct StaffSalary {
    pub id: i32,
    pub employee_id: i32,
    pub month: NaiveDate,
    pub base_salary: i64,
    pub allowance: i64,
    pub deduction: i64,
    pub paid: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::staff_salaries)]
pub struct NewStaffSalary {
    pub employee_id: i32,
    pub month: NaiveDate,
    pub base_salary: i64,
    pub allowance: i64,
    pub deduction: i64,
    pub paid: bool,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Employee, foreign_key = employee_id))]
#[diesel(table_name = crate::schema::staff_shifts)]
pub struct StaffShift {
    pub id: i32,
    pub employee_id: i32,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<String>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::staff_shifts)]
#[diesel(treat_none_as_null = true)]
pub struct NewStaffShift<'a> {
    pub employee_id: i32,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Employee, foreign_key = employee_id))]
#[diesel(table_name = crate::schema::advance_payments)]
pub struct AdvancePayment {
    pub id: i32,
    pub employee_id: i32,
    pub amount: i64,
    pub requested_on: NaiveDate,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::advance_payments)]
#[diesel(treat_none_as_null = true)]
pub struct NewAdvancePayment<'a> {
    pub employee_id: i32,
    pub amount: i64,
    pub requested_on: NaiveDate,
    pub reason: Option<&'a str>,
    pub status: &'a str,
}

impl TryFrom<Employee> for DomainEmployee {
    type Error = TypeConstraintError;

    fn try_from(row: Employee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmployeeId::new(row.id)?,
            user_id: row.user_id.map(UserId::new).transpose()?,
            name: PersonName::new(row.name)?,
            email: row.email.map(Email::new).transpose()?,
            phone: row.phone.map(PhoneNumber::new).transpose()?,
            department: row.department,
            position: row.position,
            employment_type: row.employment_type.parse()?,
            hire_date: row.hire_date,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewEmployee> for NewEmployee<'a> {
    fn from(employee: &'a DomainNewEmployee) -> Self {
        Self {
            user_id: employee.user_id.map(UserId::get),
            name: employee.name.as_str(),
            email: employee.email.as_ref().map(Email::as_str),
            phone: employee.phone.as_ref().map(PhoneNumber::as_str),
            department: employee.department.as_deref(),
            position: employee.position.as_deref(),
            employment_type: employee.employment_type.as_str(),
            hire_date: employee.hire_date,
            status: employee.status.as_str(),
        }
    }
}

impl TryFrom<StaffSalary> for DomainStaffSalary {
    type Error = TypeConstraintError;

    fn try_from(row: StaffSalary) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SalaryId::new(row.id)?,
            employee_id: EmployeeId::new(row.employee_id)?,
            month: row.month,
            base_salary: Yen::new(row.base_salary)?,
            allowance: Yen::new(row.allowance)?,
            deduction: Yen::new(row.deduction)?,
            paid: row.paid,
            created_at: row.created_at,
        })
    }
}

impl From<&DomainNewStaffSalary> for NewStaffSalary {
    fn from(salary: &DomainNewStaffSalary) -> Self {
        Self {
            employee_id: salary.employee_id.get(),
            month: salary.month,
            base_salary: salary.base_salary.get(),
            allowance: salary.allowance.get(),
            deduction: salary.deduction.get(),
            paid: salary.paid,
        }
    }
}

impl TryFrom<StaffShift> for DomainStaffShift {
    type Error = TypeConstraintError;

    fn try_from(row: StaffShift) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ShiftId::new(row.id)?,
            employee_id: EmployeeId::new(row.employee_id)?,
            work_date: row.work_date,
            start_time: row.start_time,
            end_time: row.end_time,
            note: row.note,
        })
    }
}

impl<'a> From<&'a DomainNewStaffShift> for NewStaffShift<'a> {
    fn from(shift: &'a DomainNewStaffShift) -> Self {
        Self {
            employee_id: shift.employee_id.get(),
            work_date: shift.work_date,
            start_time: shift.start_time,
            end_time: shift.end_time,
            note: shift.note.as_deref(),
        }
    }
}

impl TryFrom<AdvancePayment> for DomainAdvancePayment {
    type Error = TypeConstraintError;

    fn try_from(row: AdvancePayment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AdvancePaymentId::new(row.id)?,
            employee_id: EmployeeId::new(row.employee_id)?,
            amount: Yen::new(row.amount)?,
            requested_on: row.requested_on,
            reason: row.reason,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewAdvancePayment> for NewAdvancePayment<'a> {
    fn from(payment: &'a DomainNewAdvancePayment) -> Self {
        Self {
            employee_id: payment.employee_id.get(),
            amount: payment.amount.get(),
            requested_on: payment.requested_on,
            reason: payment.reason.as_deref(),
            status: payment.status.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::staff::{EmployeeStatus, EmploymentType};

    #[test]
    fn employee_round_trip_fields() {
        let domain = DomainNewEmployee::new(
            PersonName::new("鈴木 花子").unwrap(),
            EmploymentType::PartTime,
        )
        .with_organisation(Some("営業部".into()), Some(" ".into()));
        let row: NewEmployee = (&domain).into();
        assert_eq!(row.employment_type, "part_time");
        assert_eq!(row.department, Some("営業部"));
        assert_eq!(row.position, None);
        assert_eq!(row.status, EmployeeStatus::Active.as_str());
    }

    #[test]
    fn shift_row_into_domain() {
        let row = StaffShift {
            id: 4,
            employee_id: 1,
            work_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            note: None,
        };
        let shift = DomainStaffShift::try_from(row).unwrap();
        assert_eq!(shift.minutes(), 510);
    }
}
