use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::agency::{CommissionRate, NewAgencySale, SaleStatus};
use crate::domain::types::{CompanyName, Title, UserId, Yen};
use crate::forms::{FormError, optional_id, parse_or, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AgencySaleForm {
    /// Selling agency; agency users always record their own sales.
    pub agency_id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub product: String,
    pub amount: Option<i64>,
    #[serde(default)]
    pub commission_rate: i32,
    pub sold_on: Option<NaiveDate>,
    pub status: Option<String>,
}

impl AgencySaleForm {
    /// `agency_id` overrides the body; without it the body must name one.
    pub fn into_domain(self, agency_id: Option<UserId>) -> Result<NewAgencySale, FormError> {
        let form = validated(self)?;
        let agency_id = match agency_id {
            Some(agency_id) => agency_id,
            None => optional_id(form.agency_id)?
                .ok_or_else(|| FormError::Invalid("代理店を選択してください".to_string()))?,
        };
        let amount = form
            .amount
            .ok_or_else(|| FormError::Invalid("金額を入力してください".to_string()))?;
        let sold_on = form
            .sold_on
            .ok_or_else(|| FormError::Invalid("売上日を入力してください".to_string()))?;
        Ok(NewAgencySale {
            agency_id,
            customer_name: CompanyName::new(form.customer_name)?,
            product: Title::new(form.product)?,
            amount: Yen::new(amount)?,
            commission_rate: CommissionRate::new(form.commission_rate)?,
            sold_on,
            status: parse_or(form.status, SaleStatus::Pending)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AgencySaleForm {
        AgencySaleForm {
            agency_id: Some(9),
            customer_name: "合同会社テスト".into(),
            product: "Wi-Fiルーター".into(),
            amount: Some(30_000),
            commission_rate: 20,
            sold_on: NaiveDate::from_ymd_opt(2026, 4, 15),
            status: None,
        }
    }

    #[test]
    fn caller_agency_overrides_body() {
        let sale = form().into_domain(Some(UserId::new(3).unwrap())).unwrap();
        assert_eq!(sale.agency_id, UserId::new(3).unwrap());
        assert_eq!(sale.status, SaleStatus::Pending);
    }

    #[test]
    fn agency_is_required_without_override() {
        let mut form = form();
        form.agency_id = None;
        assert!(form.into_domain(None).is_err());
    }

    #[test]
    fn commission_rate_above_hundred_is_rejected() {
        let mut form = form();
        form.commission_rate = 150;
        assert!(form.into_domain(None).is_err());
    }

    #[test]
    fn amount_is_required() {
        let mut form = form();
        form.amount = None;
        assert!(matches!(
            form.into_domain(None),
            Err(FormError::Invalid(message)) if message == "金額を入力してください"
        ));
    }

    #[test]
    fn amount_above_one_trillion_is_rejected() {
        let mut form = form();
        form.amount = Some(100_000_000_000_000_000);
        form.commission_rate = 100;
        assert!(form.into_domain(None).is_err());
    }
}
