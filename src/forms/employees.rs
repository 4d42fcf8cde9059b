use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::staff::{
    AdvancePaymentStatus, EmployeeStatus, EmploymentType, NewAdvancePayment, NewEmployee,
    NewStaffSalary, NewStaffShift,
};
use crate::domain::types::{EmployeeId, PersonName, Yen, non_blank};
use crate::forms::{FormError, optional_email, optional_id, optional_phone, parse_or, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmployeeForm {
    /// Linked login account, if the employee has one.
    pub user_id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl TryFrom<EmployeeForm> for NewEmployee {
    type Error = FormError;

    fn try_from(form: EmployeeForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        let employment_type = parse_or(form.employment_type, EmploymentType::FullTime)?;
        let mut employee = NewEmployee::new(PersonName::new(form.name)?, employment_type)
            .with_organisation(form.department, form.position);
        employee.user_id = optional_id(form.user_id)?;
        employee.email = optional_email(form.email)?;
        employee.phone = optional_phone(form.phone)?;
        employee.hire_date = form.hire_date;
        employee.status = parse_or(form.status, EmployeeStatus::Active)?;
        Ok(employee)
    }
}

/// Accepts `2026-04` or any date within the month and returns its first day.
pub fn parse_month(value: &str) -> Result<NaiveDate, FormError> {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"))
        .map_err(|_| FormError::Invalid(format!("月の形式が正しくありません: {value}")))?;
    date.with_day(1)
        .ok_or_else(|| FormError::Invalid(format!("月の形式が正しくありません: {value}")))
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SalaryForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 10))]
    pub month: String,
    pub base_salary: Option<i64>,
    #[serde(default)]
    pub allowance: i64,
    #[serde(default)]
    pub deduction: i64,
    #[serde(default)]
    pub paid: bool,
}

impl SalaryForm {
    pub fn into_domain(self, employee_id: EmployeeId) -> Result<NewStaffSalary, FormError> {
        let form = validated(self)?;
        let base_salary = form
            .base_salary
            .ok_or_else(|| FormError::Invalid("金額を入力してください".to_string()))?;
        Ok(NewStaffSalary {
            employee_id,
            month: parse_month(&form.month)?,
            base_salary: Yen::new(base_salary)?,
            allowance: Yen::new(form.allowance)?,
            deduction: Yen::new(form.deduction)?,
            paid: form.paid,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShiftForm {
    pub work_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

impl ShiftForm {
    pub fn into_domain(self, employee_id: EmployeeId) -> Result<NewStaffShift, FormError> {
        let form = validated(self)?;
        let missing = |field: &str| FormError::Invalid(format!("{field}を入力してください"));
        let work_date = form.work_date.ok_or_else(|| missing("勤務日"))?;
        let start_time = form.start_time.ok_or_else(|| missing("開始時刻"))?;
        let end_time = form.end_time.ok_or_else(|| missing("終了時刻"))?;
        Ok(NewStaffShift::try_new(
            employee_id,
            work_date,
            start_time,
            end_time,
            form.note,
        )?)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdvancePaymentForm {
    #[serde(default)]
    pub amount: i64,
    /// Defaults to today.
    pub requested_on: Option<NaiveDate>,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
    pub status: Option<String>,
}

impl AdvancePaymentForm {
    pub fn into_domain(self, employee_id: EmployeeId) -> Result<NewAdvancePayment, FormError> {
        let form = validated(self)?;
        let amount = Yen::new(form.amount)?;
        if amount == Yen::ZERO {
            return Err(FormError::Invalid(
                "前払い額は1円以上にしてください".to_string(),
            ));
        }
        Ok(NewAdvancePayment {
            employee_id,
            amount,
            requested_on: form
                .requested_on
                .unwrap_or_else(|| Utc::now().date_naive()),
            reason: non_blank(form.reason),
            status: parse_or(form.status, AdvancePaymentStatus::Pending)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee_id() -> EmployeeId {
        EmployeeId::new(3).unwrap()
    }

    #[test]
    fn month_accepts_short_and_full_dates() {
        let first = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        assert_eq!(parse_month("2026-04").unwrap(), first);
        assert_eq!(parse_month("2026-04-25").unwrap(), first);
        assert!(parse_month("April").is_err());
    }

    #[test]
    fn salary_rejects_negative_deduction() {
        let form = SalaryForm {
            month: "2026-04".into(),
            base_salary: Some(250_000),
            allowance: 0,
            deduction: -5,
            paid: false,
        };
        assert!(form.into_domain(employee_id()).is_err());
    }

    #[test]
    fn salary_requires_base_salary() {
        let form: SalaryForm =
            serde_json::from_value(serde_json::json!({ "month": "2026-04", "allowance": 5000 }))
                .unwrap();
        assert!(matches!(
            form.into_domain(employee_id()),
            Err(FormError::Invalid(message)) if message == "金額を入力してください"
        ));
    }

    #[test]
    fn shift_needs_both_times() {
        let form = ShiftForm {
            work_date: NaiveDate::from_ymd_opt(2026, 4, 2),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: None,
            note: None,
        };
        assert!(form.into_domain(employee_id()).is_err());
    }

    #[test]
    fn employee_defaults_to_active_full_time() {
        let form = EmployeeForm {
            user_id: None,
            name: "鈴木 花子".into(),
            email: None,
            phone: None,
            department: Some("営業部".into()),
            position: None,
            employment_type: None,
            hire_date: None,
            status: None,
        };
        let employee = NewEmployee::try_from(form).unwrap();
        assert_eq!(employee.employment_type, EmploymentType::FullTime);
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(employee.department.as_deref(), Some("営業部"));
    }
}
