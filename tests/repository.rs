use chrono::NaiveDate;

use sinjapan_manager::domain::chat::{Conversation, NewChatGroup, NewMessage};
use sinjapan_manager::domain::customer::{CustomerStatus, NewCustomer};
use sinjapan_manager::domain::lead::{LeadStatus, NewLead};
use sinjapan_manager::domain::role::Role;
use sinjapan_manager::domain::staff::{EmploymentType, NewEmployee, NewStaffSalary};
use sinjapan_manager::domain::task::{NewTask, TaskPriority, TaskStatus};
use sinjapan_manager::domain::types::{CompanyName, PersonName, RichText, Title, Yen};
use sinjapan_manager::repository::errors::RepositoryError;
use sinjapan_manager::repository::{
    ChatReader, ChatWriter, CustomerListQuery, CustomerReader, CustomerWriter, EmployeeReader,
    EmployeeWriter, LeadListQuery, LeadReader, LeadWriter, TaskListQuery, TaskReader, TaskWriter,
    UserReader,
};

mod common;

#[test]
fn test_customer_repository_crud() {
    let test_db = common::TestDb::new("test_customer_repository_crud.db");
    let repo = test_db.repo();

    let mut acme = NewCustomer::new(
        CompanyName::new("株式会社アクメ").unwrap(),
        CustomerStatus::Prospect,
    );
    acme.contact_name = Some("山田".into());
    let acme = repo.create_customer(&acme).unwrap();
    let sakura = repo
        .create_customer(&NewCustomer::new(
            CompanyName::new("さくら商事").unwrap(),
            CustomerStatus::Active,
        ))
        .unwrap();

    assert_eq!(
        repo.list_customers(CustomerListQuery::default())
            .unwrap()
            .len(),
        2
    );
    let found = repo
        .list_customers(CustomerListQuery::default().search("さくら"))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, sakura.id);

    let mut changes = NewCustomer::new(acme.company_name.clone(), CustomerStatus::Negotiating);
    changes.contact_name = acme.contact_name.clone();
    let updated = repo.update_customer(acme.id, &changes).unwrap();
    assert_eq!(updated.status, CustomerStatus::Negotiating);
    assert_eq!(updated.contact_name.as_deref(), Some("山田"));

    let negotiating = repo
        .list_customers(CustomerListQuery::default().status(CustomerStatus::Negotiating))
        .unwrap();
    assert_eq!(negotiating.len(), 1);

    repo.delete_customer(acme.id).unwrap();
    assert!(repo.get_customer_by_id(acme.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_customer(acme.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_leads_bulk_insert_search_and_paginate() {
    let test_db = common::TestDb::new("test_leads_bulk_insert_search_and_paginate.db");
    let repo = test_db.repo();

    let leads: Vec<NewLead> = (1..=25)
        .map(|n| {
            NewLead::new(PersonName::new(format!("見込み客{n:02}")).unwrap())
                .company(Some(format!("会社{n:02}")))
        })
        .collect();
    assert_eq!(repo.create_leads(&leads).unwrap(), 25);

    let (total, first_page) = repo
        .list_leads(LeadListQuery::default().paginate(1, 20))
        .unwrap();
    assert_eq!(total, 25);
    assert_eq!(first_page.len(), 20);

    let (_, second_page) = repo
        .list_leads(LeadListQuery::default().paginate(2, 20))
        .unwrap();
    assert_eq!(second_page.len(), 5);

    let (found, items) = repo
        .list_leads(LeadListQuery::default().search("会社07"))
        .unwrap();
    assert_eq!(found, 1);
    assert_eq!(items[0].name.as_str(), "見込み客07");
    assert_eq!(items[0].status, LeadStatus::New);
}

#[test]
fn test_salary_upsert_replaces_same_month() {
    let test_db = common::TestDb::new("test_salary_upsert_replaces_same_month.db");
    let repo = test_db.repo();

    let employee = repo
        .create_employee(&NewEmployee::new(
            PersonName::new("佐藤花子").unwrap(),
            EmploymentType::FullTime,
        ))
        .unwrap();
    let april = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();

    let mut salary = NewStaffSalary {
        employee_id: employee.id,
        month: april,
        base_salary: Yen::new(250_000).unwrap(),
        allowance: Yen::new(10_000).unwrap(),
        deduction: Yen::new(30_000).unwrap(),
        paid: false,
    };
    let first = repo.upsert_salary(&salary).unwrap();
    assert_eq!(first.net(), 230_000);

    salary.base_salary = Yen::new(260_000).unwrap();
    salary.paid = true;
    let second = repo.upsert_salary(&salary).unwrap();

    let salaries = repo.list_salaries(Some(employee.id)).unwrap();
    assert_eq!(salaries.len(), 1);
    assert_eq!(second.net(), 240_000);
    assert!(salaries[0].paid);

    repo.delete_employee(employee.id).unwrap();
    assert!(repo.list_salaries(None).unwrap().is_empty());
}

#[test]
fn test_tasks_created_in_bulk_and_filtered() {
    let test_db = common::TestDb::new("test_tasks_created_in_bulk_and_filtered.db");
    let repo = test_db.repo();
    let author = common::create_user(&repo, "鈴木", "suzuki@sinjapan.jp", Role::Manager);
    let other = common::create_user(&repo, "高橋", "takahashi@sinjapan.jp", Role::Staff);

    let mut assigned = NewTask::new(Title::new("見積書作成").unwrap(), TaskPriority::High, author.id);
    assigned.assignee_id = Some(other.id);
    let own = NewTask::new(Title::new("請求書確認").unwrap(), TaskPriority::Low, author.id);

    let created = repo.create_tasks(&[assigned, own]).unwrap();
    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|task| task.status == TaskStatus::Todo));

    let involving_other = repo
        .list_tasks(TaskListQuery::default().involving(other.id))
        .unwrap();
    assert_eq!(involving_other.len(), 1);
    assert_eq!(involving_other[0].title.as_str(), "見積書作成");

    assert!(
        repo.list_tasks(TaskListQuery::default().status(TaskStatus::Done))
            .unwrap()
            .is_empty()
    );
    assert!(repo.get_task_by_id(created[0].id).unwrap().is_some());
}

#[test]
fn test_direct_messages_are_marked_read() {
    let test_db = common::TestDb::new("test_direct_messages_are_marked_read.db");
    let repo = test_db.repo();
    let taro = common::create_user(&repo, "太郎", "taro@sinjapan.jp", Role::Staff);
    let hanako = common::create_user(&repo, "花子", "hanako@sinjapan.jp", Role::Manager);

    for body in ["おはようございます", "資料を送ります"] {
        let message = NewMessage::try_new(
            taro.id,
            Conversation::Direct(hanako.id),
            RichText::new(body).unwrap(),
            None,
        )
        .unwrap();
        repo.create_message(&message).unwrap();
    }

    assert_eq!(
        repo.count_unread_by_sender(hanako.id).unwrap(),
        vec![(taro.id, 2)]
    );

    let seen_by_hanako = repo
        .list_messages(hanako.id, Conversation::Direct(taro.id))
        .unwrap();
    assert_eq!(seen_by_hanako.len(), 2);
    assert_eq!(seen_by_hanako[0].body.as_str(), "おはようございます");

    assert_eq!(repo.mark_direct_messages_read(hanako.id, taro.id).unwrap(), 2);
    assert!(repo.count_unread_by_sender(hanako.id).unwrap().is_empty());
}

#[test]
fn test_chat_group_includes_creator() {
    let test_db = common::TestDb::new("test_chat_group_includes_creator.db");
    let repo = test_db.repo();
    let owner = common::create_user(&repo, "社長", "ceo@sinjapan.jp", Role::Ceo);
    let member = common::create_user(&repo, "社員", "staff@sinjapan.jp", Role::Staff);
    let outsider = common::create_user(&repo, "外部", "agency@sinjapan.jp", Role::Agency);

    let group = repo
        .create_chat_group(&NewChatGroup::new(
            Title::new("営業チーム").unwrap(),
            owner.id,
            vec![member.id],
        ))
        .unwrap();
    assert_eq!(group.member_ids.len(), 2);

    assert_eq!(repo.list_chat_groups_for_user(member.id).unwrap().len(), 1);
    assert!(
        repo.list_chat_groups_for_user(outsider.id)
            .unwrap()
            .is_empty()
    );
    assert!(repo.get_user_by_id(outsider.id).unwrap().is_some());
}
