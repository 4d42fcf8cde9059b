//! Aggregates computed from already-loaded lists.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::types::ClientId;

/// Counts keyed by status, serialised as a JSON object.
pub type StatusCounts = BTreeMap<&'static str, usize>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayrollMonth {
    pub month: NaiveDate,
    pub base_salary: i64,
    pub allowance: i64,
    pub deduction: i64,
    pub net: i64,
    pub paid_net: i64,
    pub unpaid_net: i64,
    pub records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayrollSummary {
    /// Oldest month first.
    pub months: Vec<PayrollMonth>,
    pub total_net: i64,
    pub paid_net: i64,
    pub unpaid_net: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgencySummary {
    pub total_amount: i64,
    pub total_commission: i64,
    pub sales: usize,
    pub by_status: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
    pub client_id: ClientId,
    pub client_name: String,
    pub billed: i64,
    pub paid: i64,
    /// Sent or overdue.
    pub outstanding: i64,
}
