//! Sales reported by partner agencies and their commission.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AgencySaleId, CompanyName, Title, TypeConstraintError, UserId, Yen, string_enum,
};

string_enum!(SaleStatus, "sale status", {
    Pending => "pending",
    Confirmed => "confirmed",
    Paid => "paid",
    Cancelled => "cancelled",
});

/// Commission percentage between 0 and 100.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct CommissionRate(i32);

impl CommissionRate {
    pub fn new(percent: i32) -> Result<Self, TypeConstraintError> {
        if (0..=100).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(TypeConstraintError::InvalidValue(format!(
                "commission rate must be between 0 and 100, got {percent}"
            )))
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// Commission owed on `amount`, rounded down to the yen.
    pub fn apply(self, amount: Yen) -> i64 {
        amount.get() * i64::from(self.0) / 100
    }
}

impl TryFrom<i32> for CommissionRate {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommissionRate> for i32 {
    fn from(value: CommissionRate) -> Self {
        value.0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AgencySale {
    pub id: AgencySaleId,
    pub agency_id: UserId,
    pub customer_name: CompanyName,
    pub product: Title,
    pub amount: Yen,
    pub commission_rate: CommissionRate,
    pub sold_on: NaiveDate,
    pub status: SaleStatus,
    pub created_at: NaiveDateTime,
}

impl AgencySale {
    pub fn commission(&self) -> i64 {
        self.commission_rate.apply(self.amount)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAgencySale {
    pub agency_id: UserId,
    pub customer_name: CompanyName,
    pub product: Title,
    pub amount: Yen,
    pub commission_rate: CommissionRate,
    pub sold_on: NaiveDate,
    pub status: SaleStatus,
}

pub type UpdateAgencySale = NewAgencySale;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commission_rounds_down() {
        let rate = CommissionRate::new(15).unwrap();
        assert_eq!(rate.apply(Yen::new(10_001).unwrap()), 1_500);
    }

    #[test]
    fn commission_rate_is_bounded() {
        assert!(CommissionRate::new(101).is_err());
        assert!(CommissionRate::new(-1).is_err());
        assert_eq!(CommissionRate::new(0).unwrap().get(), 0);
    }

    #[test]
    fn full_commission_on_largest_amount() {
        let rate = CommissionRate::new(100).unwrap();
        assert_eq!(rate.apply(Yen::MAX), Yen::MAX.get());
    }
}
