//! Employees, their monthly salaries, shifts and advance payments.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AdvancePaymentId, Email, EmployeeId, PersonName, PhoneNumber, SalaryId, ShiftId,
    TypeConstraintError, UserId, Yen, non_blank, string_enum,
};

string_enum!(EmploymentType, "employment type", {
    FullTime => "full_time",
    PartTime => "part_time",
    Contract => "contract",
});

string_enum!(EmployeeStatus, "employee status", {
    Active => "active",
    OnLeave => "on_leave",
    Retired => "retired",
});

string_enum!(AdvancePaymentStatus, "advance payment status", {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    Repaid => "repaid",
});

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub user_id: Option<UserId>,
    pub name: PersonName,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub employment_type: EmploymentType,
    pub hire_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewEmployee {
    pub user_id: Option<UserId>,
    pub name: PersonName,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub employment_type: EmploymentType,
    pub hire_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
}

impl NewEmployee {
    #[must_use]
    pub fn new(name: PersonName, employment_type: EmploymentType) -> Self {
        Self {
            user_id: None,
            name,
            email: None,
            phone: None,
            department: None,
            position: None,
            employment_type,
            hire_date: None,
            status: EmployeeStatus::Active,
        }
    }

    #[must_use]
    pub fn with_organisation(mut self, department: Option<String>, position: Option<String>) -> Self {
        self.department = non_blank(department);
        self.position = non_blank(position);
        self
    }
}

pub type UpdateEmployee = NewEmployee;

/// Monthly payroll entry. `month` is always the first day of the month.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StaffSalary {
    pub id: SalaryId,
    pub employee_id: EmployeeId,
    pub month: NaiveDate,
    pub base_salary: Yen,
    pub allowance: Yen,
    pub deduction: Yen,
    pub paid: bool,
    pub created_at: NaiveDateTime,
}

impl StaffSalary {
    /// Take-home amount; may be negative when deductions exceed pay.
    pub fn net(&self) -> i64 {
        self.base_salary.get() + self.allowance.get() - self.deduction.get()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewStaffSalary {
    pub employee_id: EmployeeId,
    pub month: NaiveDate,
    pub base_salary: Yen,
    pub allowance: Yen,
    pub deduction: Yen,
    pub paid: bool,
}

pub type UpdateStaffSalary = NewStaffSalary;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StaffShift {
    pub id: ShiftId,
    pub employee_id: EmployeeId,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<String>,
}

impl StaffShift {
    /// Worked minutes for the shift.
    pub fn minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewStaffShift {
    pub employee_id: EmployeeId,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<String>,
}

impl NewStaffShift {
    /// Rejects shifts that do not end after they start.
    pub fn try_new(
        employee_id: EmployeeId,
        work_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        note: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        if end_time <= start_time {
            return Err(TypeConstraintError::InvalidValue(
                "shift must end after it starts".to_string(),
            ));
        }
        Ok(Self {
            employee_id,
            work_date,
            start_time,
            end_time,
            note: non_blank(note),
        })
    }
}

pub type UpdateStaffShift = NewStaffShift;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdvancePayment {
    pub id: AdvancePaymentId,
    pub employee_id: EmployeeId,
    pub amount: Yen,
    pub requested_on: NaiveDate,
    pub reason: Option<String>,
    pub status: AdvancePaymentStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAdvancePayment {
    pub employee_id: EmployeeId,
    pub amount: Yen,
    pub requested_on: NaiveDate,
    pub reason: Option<String>,
    pub status: AdvancePaymentStatus,
}

pub type UpdateAdvancePayment = NewAdvancePayment;

#[cfg(test)]
mod tests {
    use super::*;

    fn employee_id() -> EmployeeId {
        EmployeeId::new(1).expect("valid id")
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[test]
    fn shift_must_end_after_start() {
        let date = NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date");
        assert!(NewStaffShift::try_new(employee_id(), date, time(9, 0), time(9, 0), None).is_err());
        assert!(NewStaffShift::try_new(employee_id(), date, time(18, 0), time(9, 0), None).is_err());
        let shift = NewStaffShift::try_new(employee_id(), date, time(9, 0), time(18, 0), Some(" ".into()))
            .expect("valid shift");
        assert_eq!(shift.note, None);
    }

    #[test]
    fn salary_net_subtracts_deduction() {
        let salary = StaffSalary {
            id: SalaryId::new(1).unwrap(),
            employee_id: employee_id(),
            month: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            base_salary: Yen::new(250_000).unwrap(),
            allowance: Yen::new(20_000).unwrap(),
            deduction: Yen::new(45_000).unwrap(),
            paid: false,
            created_at: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
        };
        assert_eq!(salary.net(), 225_000);
    }
}
