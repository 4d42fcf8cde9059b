//! The role menu and dashboard figures.

use crate::domain::client::ClientInvoice;
use crate::domain::lead::Lead;
use crate::domain::role::{MenuItem, Section, menu_for};
use crate::domain::task::Task;
use crate::dto::dashboard::{DashboardData, IndexPageData};
use crate::dto::leads::LeadsQuery;
use crate::dto::summaries::StatusCounts;
use crate::forms::clients::ClientFilter;
use crate::forms::customers::CustomerListParams;
use crate::forms::tasks::TaskListParams;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{
    ChatReader, ClientReader, CustomerReader, LeadReader, NotificationReader, TaskReader,
};
use crate::services::{ServiceResult, caller_id, clients, customers, leads, notifications, tasks};

/// Sidebar entries of the caller's role.
pub fn menu(user: &AuthenticatedUser) -> Vec<MenuItem> {
    menu_for(user.role)
}

/// Counts items per status key.
pub fn count_by_status<T>(items: &[T], status: impl Fn(&T) -> &'static str) -> StatusCounts {
    let mut counts = StatusCounts::new();
    for item in items {
        *counts.entry(status(item)).or_insert(0) += 1;
    }
    counts
}

pub fn tasks_by_status(tasks: &[Task]) -> StatusCounts {
    count_by_status(tasks, |task| task.status.as_str())
}

pub fn open_task_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| task.status.is_open()).count()
}

pub fn leads_by_status(leads: &[Lead]) -> StatusCounts {
    count_by_status(leads, |lead| lead.status.as_str())
}

/// Sum of sent and overdue invoices.
pub fn unpaid_invoice_total(invoices: &[ClientInvoice]) -> i64 {
    invoices
        .iter()
        .filter(|invoice| invoice.status.is_outstanding())
        .map(|invoice| invoice.amount.get())
        .sum()
}

/// Fills the figures of every section the caller can open; the rest stay
/// empty.
pub fn dashboard<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardData>
where
    R: TaskReader
        + LeadReader
        + CustomerReader
        + ClientReader
        + NotificationReader
        + ChatReader
        + ?Sized,
{
    let role = user.role;
    let mut data = DashboardData::default();

    if role.can_access(Section::Tasks) {
        let tasks = tasks::list_tasks(repo, user, TaskListParams::default())?;
        data.tasks_by_status = Some(tasks_by_status(&tasks));
        data.open_tasks = Some(open_task_count(&tasks));
    }
    if role.can_access(Section::Leads) {
        let leads = leads::list_leads(repo, user, LeadsQuery::default())?;
        data.leads_by_status = Some(leads_by_status(&leads));
    }
    if role.can_access(Section::Customers) {
        let customers = customers::list_customers(repo, user, CustomerListParams::default())?;
        data.customers = Some(customers.len());
    }
    if role.can_access(Section::Clients) || role.can_access(Section::Documents) {
        let invoices = clients::list_invoices(repo, user, ClientFilter::default())?;
        data.unpaid_invoice_total = Some(unpaid_invoice_total(&invoices));
    }

    let caller = caller_id(user)?;
    if role.can_access(Section::Notifications) {
        data.unread_notifications =
            notifications::count_unread(&repo.list_notifications(caller)?);
    }
    if role.can_access(Section::Chat) {
        data.unread_messages = repo
            .count_unread_by_sender(caller)?
            .into_iter()
            .map(|(_, count)| count)
            .sum();
    }

    Ok(data)
}

/// Data of the `/` shell page.
pub fn load_index_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<IndexPageData>
where
    R: TaskReader
        + LeadReader
        + CustomerReader
        + ClientReader
        + NotificationReader
        + ChatReader
        + ?Sized,
{
    Ok(IndexPageData {
        menu: menu(user),
        dashboard: dashboard(repo, user)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::client::InvoiceStatus;
    use crate::domain::task::{TaskPriority, TaskStatus};
    use crate::domain::types::{ClientId, InvoiceId, InvoiceNumber, TaskId, Title, UserId, Yen};
    use crate::services::test_support::timestamp;

    fn task(status: TaskStatus) -> Task {
        Task {
            id: TaskId::new(1).unwrap(),
            title: Title::new("作業").unwrap(),
            description: None,
            status,
            priority: TaskPriority::Low,
            assignee_id: None,
            business_id: None,
            due_date: None,
            created_by: UserId::new(1).unwrap(),
            ai_generated: false,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn invoice(amount: i64, status: InvoiceStatus) -> ClientInvoice {
        ClientInvoice {
            id: InvoiceId::new(1).unwrap(),
            client_id: ClientId::new(1).unwrap(),
            project_id: None,
            invoice_number: InvoiceNumber::new("INV-1").unwrap(),
            amount: Yen::new(amount).unwrap(),
            issued_on: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            due_on: None,
            status,
            created_at: timestamp(),
        }
    }

    #[test]
    fn task_counts_match_the_list() {
        let list = vec![
            task(TaskStatus::Todo),
            task(TaskStatus::Todo),
            task(TaskStatus::Done),
            task(TaskStatus::Review),
        ];
        let counts = tasks_by_status(&list);
        assert_eq!(counts.get("todo"), Some(&2));
        assert_eq!(counts.get("done"), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), list.len());
        assert_eq!(open_task_count(&list), 3);
    }

    #[test]
    fn unpaid_total_counts_sent_and_overdue() {
        let list = vec![
            invoice(1_000, InvoiceStatus::Draft),
            invoice(2_000, InvoiceStatus::Sent),
            invoice(4_000, InvoiceStatus::Overdue),
            invoice(8_000, InvoiceStatus::Paid),
        ];
        assert_eq!(unpaid_invoice_total(&list), 6_000);
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::domain::role::Role;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user;

    #[test]
    fn staff_dashboard_skips_customer_and_lead_figures() {
        let mut repo = MockRepository::new();
        repo.expect_list_tasks().returning(|_| Ok(vec![]));
        repo.expect_list_notifications().returning(|_| Ok(vec![]));
        repo.expect_count_unread_by_sender().returning(|_| Ok(vec![]));
        repo.expect_list_customers().never();
        repo.expect_list_leads().never();

        let data = dashboard(&repo, &user(2, Role::Staff)).unwrap();
        assert_eq!(data.open_tasks, Some(0));
        assert_eq!(data.customers, None);
        assert_eq!(data.leads_by_status, None);
        assert_eq!(data.unpaid_invoice_total, None);
    }

    #[test]
    fn client_menu_is_limited() {
        let items = menu(&user(7, Role::Client));
        let keys: Vec<Section> = items.into_iter().map(|item| item.key).collect();
        assert_eq!(
            keys,
            vec![
                Section::Dashboard,
                Section::Documents,
                Section::Chat,
                Section::Notifications
            ]
        );
    }
}
