//! Mock repository implementations for isolating services in tests.

use mockall::mock;

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
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::lead::{Lead, NewLead, UpdateLead};
use crate::domain::memo::{Memo, NewMemo, UpdateMemo};
use crate::domain::notification::{NewNotification, Notification};
use crate::domain::seo_article::{ArticleStatus, NewSeoArticle, SeoArticle, UpdateSeoArticle};
use crate::domain::staff::{
    AdvancePayment, Employee, NewAdvancePayment, NewEmployee, NewStaffSalary, NewStaffShift,
    StaffSalary, StaffShift, UpdateAdvancePayment, UpdateEmployee, UpdateStaffShift,
};
use crate::domain::task::{NewTask, Task, UpdateTask};
use crate::domain::types::{
    AdvancePaymentId, AgencySaleId, BusinessDesignId, BusinessId, ChatGroupId, ClientId,
    CustomerId, Email, EmployeeId, InvoiceId, LeadId, MemoId, NotificationId, ProjectId,
    SalaryId, SeoArticleId, ShiftId, TaskId, UserId,
};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AgencySaleReader, AgencySaleWriter, BusinessReader, BusinessWriter, ChatReader, ChatWriter,
    ClientReader, ClientWriter, CustomerListQuery, CustomerReader, CustomerWriter, EmployeeReader,
    EmployeeWriter, LeadListQuery, LeadReader, LeadWriter, MemoListQuery, MemoReader, MemoWriter,
    NotificationReader, NotificationWriter, SeoArticleReader, SeoArticleWriter, TaskListQuery,
    TaskReader, TaskWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>>;
        fn list_users(&self) -> RepositoryResult<Vec<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
        fn delete_user(&self, id: UserId) -> RepositoryResult<()>;
    }

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<Vec<Customer>>;
    }

    impl CustomerWriter for Repository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer(
            &self,
            id: CustomerId,
            updates: &UpdateCustomer,
        ) -> RepositoryResult<Customer>;
        fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
    }

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn list_clients_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<Client>>;
        fn get_project_by_id(&self, id: ProjectId) -> RepositoryResult<Option<ClientProject>>;
        fn list_projects(&self, client_id: Option<ClientId>) -> RepositoryResult<Vec<ClientProject>>;
        fn get_invoice_by_id(&self, id: InvoiceId) -> RepositoryResult<Option<ClientInvoice>>;
        fn list_invoices(&self, client_id: Option<ClientId>) -> RepositoryResult<Vec<ClientInvoice>>;
    }

    impl ClientWriter for Repository {
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

    impl EmployeeReader for Repository {
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

    impl EmployeeWriter for Repository {
        fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee>;
        fn update_employee(
            &self,
            id: EmployeeId,
            updates: &UpdateEmployee,
        ) -> RepositoryResult<Employee>;
        fn delete_employee(&self, id: EmployeeId) -> RepositoryResult<()>;
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

    impl TaskReader for Repository {
        fn get_task_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>>;
        fn list_tasks(&self, query: TaskListQuery) -> RepositoryResult<Vec<Task>>;
    }

    impl TaskWriter for Repository {
        fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task>;
        fn create_tasks(&self, new_tasks: &[NewTask]) -> RepositoryResult<Vec<Task>>;
        fn update_task(&self, id: TaskId, updates: &UpdateTask) -> RepositoryResult<Task>;
        fn delete_task(&self, id: TaskId) -> RepositoryResult<()>;
    }

    impl BusinessReader for Repository {
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

    impl BusinessWriter for Repository {
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

    impl LeadReader for Repository {
        fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize>;
        fn update_lead(&self, id: LeadId, updates: &UpdateLead) -> RepositoryResult<Lead>;
        fn delete_lead(&self, id: LeadId) -> RepositoryResult<()>;
    }

    impl ChatReader for Repository {
        fn list_messages(
            &self,
            viewer: UserId,
            conversation: Conversation,
        ) -> RepositoryResult<Vec<Message>>;
        fn count_unread_by_sender(&self, user_id: UserId) -> RepositoryResult<Vec<(UserId, usize)>>;
        fn get_chat_group_by_id(&self, id: ChatGroupId) -> RepositoryResult<Option<ChatGroup>>;
        fn list_chat_groups_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<ChatGroup>>;
    }

    impl ChatWriter for Repository {
        fn create_message(&self, new_message: &NewMessage) -> RepositoryResult<Message>;
        fn mark_direct_messages_read(&self, reader: UserId, sender: UserId)
        -> RepositoryResult<usize>;
        fn create_chat_group(&self, new_group: &NewChatGroup) -> RepositoryResult<ChatGroup>;
    }

    impl MemoReader for Repository {
        fn get_memo_by_id(&self, id: MemoId) -> RepositoryResult<Option<Memo>>;
        fn list_memos(&self, query: MemoListQuery) -> RepositoryResult<Vec<Memo>>;
    }

    impl MemoWriter for Repository {
        fn create_memo(&self, new_memo: &NewMemo) -> RepositoryResult<Memo>;
        fn update_memo(&self, id: MemoId, updates: &UpdateMemo) -> RepositoryResult<Memo>;
        fn delete_memo(&self, id: MemoId) -> RepositoryResult<()>;
    }

    impl SeoArticleReader for Repository {
        fn get_seo_article_by_id(&self, id: SeoArticleId) -> RepositoryResult<Option<SeoArticle>>;
        fn get_seo_article_by_slug(&self, slug: &str) -> RepositoryResult<Option<SeoArticle>>;
        fn list_seo_articles(
            &self,
            status: Option<ArticleStatus>,
        ) -> RepositoryResult<Vec<SeoArticle>>;
    }

    impl SeoArticleWriter for Repository {
        fn create_seo_article(&self, new_article: &NewSeoArticle) -> RepositoryResult<SeoArticle>;
        fn update_seo_article(
            &self,
            id: SeoArticleId,
            updates: &UpdateSeoArticle,
        ) -> RepositoryResult<SeoArticle>;
        fn delete_seo_article(&self, id: SeoArticleId) -> RepositoryResult<()>;
    }

    impl NotificationReader for Repository {
        fn get_notification_by_id(
            &self,
            id: NotificationId,
        ) -> RepositoryResult<Option<Notification>>;
        fn list_notifications(&self, user_id: UserId) -> RepositoryResult<Vec<Notification>>;
    }

    impl NotificationWriter for Repository {
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

    impl AgencySaleReader for Repository {
        fn get_agency_sale_by_id(&self, id: AgencySaleId) -> RepositoryResult<Option<AgencySale>>;
        fn list_agency_sales(&self, agency_id: Option<UserId>) -> RepositoryResult<Vec<AgencySale>>;
    }

    impl AgencySaleWriter for Repository {
        fn create_agency_sale(&self, new_sale: &NewAgencySale) -> RepositoryResult<AgencySale>;
        fn update_agency_sale(
            &self,
            id: AgencySaleId,
            updates: &UpdateAgencySale,
        ) -> RepositoryResult<AgencySale>;
        fn delete_agency_sale(&self, id: AgencySaleId) -> RepositoryResult<()>;
    }
}
