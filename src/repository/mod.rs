//! Persistence boundary.
//!
//! Each entity gets a `*Reader` and a `*Writer` trait so services can ask for
//! exactly the capabilities they use. [`DieselRepository`] implements all of
//! them on top of the SQLite pool; `mock::MockRepository` mirrors them for
//! service tests.

use chrono::NaiveDate;

use crate::db::{DbConnection, DbPool};
use crate::domain::agency::{AgencySale, NewAgencySale, UpdateAgencySale};
use crate::domain::business::{
    Business, BusinessDesign, NewBusiness, NewBusinessDesign, UpdateBusiness,
    UpdateBusinessDesign,
};
use crate::domain::chat::{ChatGroup, Conversation, Message, NewChatGroup, NewMessage};
use crate::domain::client::{
    Client, ClientInvoice, ClientProject, NewClient, NewClientInvoice, NewClientProject,
    UpdateClient, UpdateClientInvoice, UpdateClientProject,
};
use crate::domain::customer::{Customer, CustomerStatus, NewCustomer, UpdateCustomer};
use crate::domain::lead::{Lead, LeadStatus, NewLead, UpdateLead};
use crate::domain::memo::{Memo, NewMemo, UpdateMemo};
use crate::domain::notification::{NewNotification, Notification};
use crate::domain::seo_article::{ArticleStatus, NewSeoArticle, SeoArticle, UpdateSeoArticle};
use crate::domain::staff::{
    AdvancePayment, Employee, NewAdvancePayment, NewEmployee, NewStaffSalary, NewStaffShift,
    StaffSalary, StaffShift, UpdateAdvancePayment, UpdateEmployee, UpdateStaffShift,
};
use crate::domain::task::{NewTask, Task, TaskStatus, UpdateTask};
use crate::domain::types::{
    AdvancePaymentId, AgencySaleId, BusinessDesignId, BusinessId, ChatGroupId, ClientId,
    CustomerId, Email, EmployeeId, InvoiceId, LeadId, MemoId, NotificationId, ProjectId,
    SalaryId, SeoArticleId, ShiftId, TaskId, UserId,
};
use crate::domain::types::TypeConstraintError;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod agency;
pub mod business;
pub mod chat;
pub mod client;
pub mod customer;
pub mod errors;
pub mod lead;
pub mod memo;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod notification;
pub mod seo_article;
pub mod staff;
pub mod task;
pub mod user;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) as i64 * self.per_page as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// Converts loaded rows into domain entities, failing on the first invalid row.
pub(crate) fn into_domain<R, D>(rows: Vec<R>) -> RepositoryResult<Vec<D>>
where
    D: TryFrom<R, Error = TypeConstraintError>,
{
    rows.into_iter()
        .map(D::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(RepositoryError::from)
}

/// Maps an `execute` count of zero to [`RepositoryError::NotFound`].
pub(crate) fn expect_affected(affected: usize) -> RepositoryResult<()> {
    if affected == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}

/// `LIKE` pattern matching the term anywhere in a column.
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{}%", term.trim())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerListQuery {
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
    pub assigned_to: Option<UserId>,
}

impl CustomerListQuery {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: CustomerStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub business_id: Option<BusinessId>,
    /// Restrict to tasks assigned to or created by this user.
    pub involving: Option<UserId>,
}

impl TaskListQuery {
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn involving(mut self, user_id: UserId) -> Self {
        self.involving = Some(user_id);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadListQuery {
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<UserId>,
    pub pagination: Option<Pagination>,
}

impl LeadListQuery {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn assigned_to(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoListQuery {
    pub user_id: UserId,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl MemoListQuery {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            from: None,
            to: None,
        }
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>>;
    fn list_users(&self) -> RepositoryResult<Vec<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
    fn delete_user(&self, id: UserId) -> RepositoryResult<()>;
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<Vec<Customer>>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn update_customer(
        &self,
        id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    /// Client companies whose portal account is the given user.
    fn list_clients_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<Client>>;
    fn get_project_by_id(&self, id: ProjectId) -> RepositoryResult<Option<ClientProject>>;
    fn list_projects(&self, client_id: Option<ClientId>) -> RepositoryResult<Vec<ClientProject>>;
    fn get_invoice_by_id(&self, id: InvoiceId) -> RepositoryResult<Option<ClientInvoice>>;
    fn list_invoices(&self, client_id: Option<ClientId>) -> RepositoryResult<Vec<ClientInvoice>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
    fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
    fn create_project(&self, new_project: &NewClientProject) -> RepositoryResult<ClientProject>;
    fn update_project(
        &self,
        id: ProjectId,
        updates: &UpdateClientProject,
    ) -> RepositoryResult<ClientProject>;
    fn delete_project(&self, id: ProjectId) -> RepositoryResult<()>;
    fn create_invoice(&self, new_invoice: &NewClientInvoice) -> RepositoryResult<ClientInvoice>;
    fn update_invoice(
        &self,
        id: InvoiceId,
        updates: &UpdateClientInvoice,
    ) -> RepositoryResult<ClientInvoice>;
    fn delete_invoice(&self, id: InvoiceId) -> RepositoryResult<()>;
}

pub trait EmployeeReader {
    fn get_employee_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<Employee>>;
    fn list_employees(&self) -> RepositoryResult<Vec<Employee>>;
    fn get_salary_by_id(&self, id: SalaryId) -> RepositoryResult<Option<StaffSalary>>;
    fn list_salaries(&self, employee_id: Option<EmployeeId>) -> RepositoryResult<Vec<StaffSalary>>;
    fn get_shift_by_id(&self, id: ShiftId) -> RepositoryResult<Option<StaffShift>>;
    fn list_shifts(&self, employee_id: EmployeeId) -> RepositoryResult<Vec<StaffShift>>;
    fn get_advance_payment_by_id(
        &self,
        id: AdvancePaymentId,
    ) -> RepositoryResult<Option<AdvancePayment>>;
    fn list_advance_payments(
        &self,
        employee_id: Option<EmployeeId>,
    ) -> RepositoryResult<Vec<AdvancePayment>>;
}

pub trait EmployeeWriter {
    fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee>;
    fn update_employee(
        &self,
        id: EmployeeId,
        updates: &UpdateEmployee,
    ) -> RepositoryResult<Employee>;
    fn delete_employee(&self, id: EmployeeId) -> RepositoryResult<()>;
    /// Inserts the salary or replaces the one already recorded for that month.
    fn upsert_salary(&self, salary: &NewStaffSalary) -> RepositoryResult<StaffSalary>;
    fn update_salary(&self, id: SalaryId, updates: &NewStaffSalary)
    -> RepositoryResult<StaffSalary>;
    fn delete_salary(&self, id: SalaryId) -> RepositoryResult<()>;
    fn create_shift(&self, new_shift: &NewStaffShift) -> RepositoryResult<StaffShift>;
    fn update_shift(&self, id: ShiftId, updates: &UpdateStaffShift)
    -> RepositoryResult<StaffShift>;
    fn delete_shift(&self, id: ShiftId) -> RepositoryResult<()>;
    fn create_advance_payment(
        &self,
        new_payment: &NewAdvancePayment,
    ) -> RepositoryResult<AdvancePayment>;
    fn update_advance_payment(
        &self,
        id: AdvancePaymentId,
        updates: &UpdateAdvancePayment,
    ) -> RepositoryResult<AdvancePayment>;
    fn delete_advance_payment(&self, id: AdvancePaymentId) -> RepositoryResult<()>;
}

pub trait TaskReader {
    fn get_task_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>>;
    fn list_tasks(&self, query: TaskListQuery) -> RepositoryResult<Vec<Task>>;
}

pub trait TaskWriter {
    fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task>;
    /// Inserts all tasks in one transaction.
    fn create_tasks(&self, new_tasks: &[NewTask]) -> RepositoryResult<Vec<Task>>;
    fn update_task(&self, id: TaskId, updates: &UpdateTask) -> RepositoryResult<Task>;
    fn delete_task(&self, id: TaskId) -> RepositoryResult<()>;
}

pub trait BusinessReader {
    fn get_business_by_id(&self, id: BusinessId) -> RepositoryResult<Option<Business>>;
    fn list_businesses(&self) -> RepositoryResult<Vec<Business>>;
    fn get_business_design_by_id(
        &self,
        id: BusinessDesignId,
    ) -> RepositoryResult<Option<BusinessDesign>>;
    fn list_business_designs(
        &self,
        business_id: Option<BusinessId>,
    ) -> RepositoryResult<Vec<BusinessDesign>>;
}

pub trait BusinessWriter {
    fn create_business(&self, new_business: &NewBusiness) -> RepositoryResult<Business>;
    fn update_business(
        &self,
        id: BusinessId,
        updates: &UpdateBusiness,
    ) -> RepositoryResult<Business>;
    fn delete_business(&self, id: BusinessId) -> RepositoryResult<()>;
    fn create_business_design(
        &self,
        new_design: &NewBusinessDesign,
    ) -> RepositoryResult<BusinessDesign>;
    fn update_business_design(
        &self,
        id: BusinessDesignId,
        updates: &UpdateBusinessDesign,
    ) -> RepositoryResult<BusinessDesign>;
    fn delete_business_design(&self, id: BusinessDesignId) -> RepositoryResult<()>;
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
    /// Returns the total matching the filters and the requested page.
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    /// Bulk insert used by the CSV import; returns the number of rows written.
    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize>;
    fn update_lead(&self, id: LeadId, updates: &UpdateLead) -> RepositoryResult<Lead>;
    fn delete_lead(&self, id: LeadId) -> RepositoryResult<()>;
}

pub trait ChatReader {
    /// Messages of a conversation seen from `viewer`, oldest first.
    fn list_messages(
        &self,
        viewer: UserId,
        conversation: Conversation,
    ) -> RepositoryResult<Vec<Message>>;
    /// Unread direct messages addressed to `user_id`, grouped by sender.
    fn count_unread_by_sender(&self, user_id: UserId) -> RepositoryResult<Vec<(UserId, usize)>>;
    fn get_chat_group_by_id(&self, id: ChatGroupId) -> RepositoryResult<Option<ChatGroup>>;
    fn list_chat_groups_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<ChatGroup>>;
}

pub trait ChatWriter {
    fn create_message(&self, new_message: &NewMessage) -> RepositoryResult<Message>;
    /// Marks every direct message from `sender` to `reader` as read.
    fn mark_direct_messages_read(&self, reader: UserId, sender: UserId)
    -> RepositoryResult<usize>;
    /// Creates the group and its member rows in one transaction.
    fn create_chat_group(&self, new_group: &NewChatGroup) -> RepositoryResult<ChatGroup>;
}

pub trait MemoReader {
    fn get_memo_by_id(&self, id: MemoId) -> RepositoryResult<Option<Memo>>;
    fn list_memos(&self, query: MemoListQuery) -> RepositoryResult<Vec<Memo>>;
}

pub trait MemoWriter {
    fn create_memo(&self, new_memo: &NewMemo) -> RepositoryResult<Memo>;
    fn update_memo(&self, id: MemoId, updates: &UpdateMemo) -> RepositoryResult<Memo>;
    fn delete_memo(&self, id: MemoId) -> RepositoryResult<()>;
}

pub trait SeoArticleReader {
    fn get_seo_article_by_id(&self, id: SeoArticleId) -> RepositoryResult<Option<SeoArticle>>;
    fn get_seo_article_by_slug(&self, slug: &str) -> RepositoryResult<Option<SeoArticle>>;
    fn list_seo_articles(
        &self,
        status: Option<ArticleStatus>,
    ) -> RepositoryResult<Vec<SeoArticle>>;
}

pub trait SeoArticleWriter {
    fn create_seo_article(&self, new_article: &NewSeoArticle) -> RepositoryResult<SeoArticle>;
    fn update_seo_article(
        &self,
        id: SeoArticleId,
        updates: &UpdateSeoArticle,
    ) -> RepositoryResult<SeoArticle>;
    fn delete_seo_article(&self, id: SeoArticleId) -> RepositoryResult<()>;
}

pub trait NotificationReader {
    fn get_notification_by_id(
        &self,
        id: NotificationId,
    ) -> RepositoryResult<Option<Notification>>;
    /// Newest first.
    fn list_notifications(&self, user_id: UserId) -> RepositoryResult<Vec<Notification>>;
}

pub trait NotificationWriter {
    fn create_notification(
        &self,
        new_notification: &NewNotification,
    ) -> RepositoryResult<Notification>;
    fn set_notification_read(
        &self,
        id: NotificationId,
        is_read: bool,
    ) -> RepositoryResult<Notification>;
    fn mark_all_notifications_read(&self, user_id: UserId) -> RepositoryResult<usize>;
    fn delete_notification(&self, id: NotificationId) -> RepositoryResult<()>;
}

pub trait AgencySaleReader {
    fn get_agency_sale_by_id(&self, id: AgencySaleId) -> RepositoryResult<Option<AgencySale>>;
    fn list_agency_sales(&self, agency_id: Option<UserId>) -> RepositoryResult<Vec<AgencySale>>;
}

pub trait AgencySaleWriter {
    fn create_agency_sale(&self, new_sale: &NewAgencySale) -> RepositoryResult<AgencySale>;
    fn update_agency_sale(
        &self,
        id: AgencySaleId,
        updates: &UpdateAgencySale,
    ) -> RepositoryResult<AgencySale>;
    fn delete_agency_sale(&self, id: AgencySaleId) -> RepositoryResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_offsets_start_at_page_one() {
        let first = Pagination { page: 1, per_page: 20 };
        let third = Pagination { page: 3, per_page: 20 };
        let zero = Pagination { page: 0, per_page: 20 };
        assert_eq!(first.offset(), 0);
        assert_eq!(third.offset(), 40);
        assert_eq!(zero.offset(), 0);
    }

    #[test]
    fn like_pattern_wraps_trimmed_term() {
        assert_eq!(like_pattern(" 山田 "), "%山田%");
    }
}
