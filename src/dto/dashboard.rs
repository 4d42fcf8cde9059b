use serde::Serialize;

use crate::domain::role::MenuItem;
use crate::dto::summaries::StatusCounts;

/// Dashboard figures. Sections the caller cannot open stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardData {
    pub tasks_by_status: Option<StatusCounts>,
    pub open_tasks: Option<usize>,
    pub leads_by_status: Option<StatusCounts>,
    pub customers: Option<usize>,
    pub unpaid_invoice_total: Option<i64>,
    pub unread_notifications: usize,
    pub unread_messages: usize,
}

/// Everything the shell page needs.
#[derive(Debug, Clone, Serialize)]
pub struct IndexPageData {
    pub menu: Vec<MenuItem>,
    pub dashboard: DashboardData,
}
