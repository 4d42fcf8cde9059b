//! Roles and the navigation sections they unlock.
//!
//! The sidebar menu and API access checks share one table: a role may call a
//! resource exactly when the section owning that resource is in its menu.

use serde::Serialize;

use crate::domain::types::string_enum;

string_enum!(Role, "role", {
    Admin => "admin",
    Ceo => "ceo",
    Manager => "manager",
    Staff => "staff",
    Agency => "agency",
    Client => "client",
});

string_enum!(Section, "section", {
    Dashboard => "dashboard",
    Customers => "customers",
    Clients => "clients",
    Documents => "documents",
    Employees => "employees",
    Tasks => "tasks",
    Chat => "chat",
    Calendar => "calendar",
    Leads => "leads",
    SeoArticles => "seo_articles",
    Study => "study",
    Translation => "translation",
    Users => "users",
    AgencySales => "agency_sales",
    BusinessDesigns => "business_designs",
    Notifications => "notifications",
});

const MANAGER_SECTIONS: &[Section] = &[
    Section::Dashboard,
    Section::Customers,
    Section::Clients,
    Section::Employees,
    Section::Tasks,
    Section::Chat,
    Section::Calendar,
    Section::Leads,
    Section::SeoArticles,
    Section::Study,
    Section::Translation,
    Section::BusinessDesigns,
    Section::Notifications,
];

const STAFF_SECTIONS: &[Section] = &[
    Section::Dashboard,
    Section::Tasks,
    Section::Chat,
    Section::Calendar,
    Section::Study,
    Section::Translation,
    Section::Notifications,
];

const AGENCY_SECTIONS: &[Section] = &[
    Section::Dashboard,
    Section::AgencySales,
    Section::Leads,
    Section::Chat,
    Section::Notifications,
];

const CLIENT_SECTIONS: &[Section] = &[
    Section::Dashboard,
    Section::Documents,
    Section::Chat,
    Section::Notifications,
];

impl Role {
    /// Sections visible to the role, in menu order.
    pub fn sections(self) -> &'static [Section] {
        match self {
            Role::Admin | Role::Ceo => Section::ALL,
            Role::Manager => MANAGER_SECTIONS,
            Role::Staff => STAFF_SECTIONS,
            Role::Agency => AGENCY_SECTIONS,
            Role::Client => CLIENT_SECTIONS,
        }
    }

    pub fn can_access(self, section: Section) -> bool {
        self.sections().contains(&section)
    }

    /// Admin and CEO see every record regardless of ownership.
    pub fn is_executive(self) -> bool {
        matches!(self, Role::Admin | Role::Ceo)
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "管理者",
            Role::Ceo => "代表",
            Role::Manager => "マネージャー",
            Role::Staff => "スタッフ",
            Role::Agency => "代理店",
            Role::Client => "クライアント",
        }
    }
}

impl Section {
    /// Japanese label shown in the sidebar.
    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "ダッシュボード",
            Section::Customers => "顧客管理",
            Section::Clients => "クライアント管理",
            Section::Documents => "書類",
            Section::Employees => "スタッフ管理",
            Section::Tasks => "タスク",
            Section::Chat => "チャット",
            Section::Calendar => "カレンダー",
            Section::Leads => "リード管理",
            Section::SeoArticles => "SEO記事",
            Section::Study => "学習",
            Section::Translation => "翻訳",
            Section::Users => "ユーザー管理",
            Section::AgencySales => "代理店売上",
            Section::BusinessDesigns => "事業設計",
            Section::Notifications => "通知",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Section::Dashboard => "/",
            Section::Customers => "/customers",
            Section::Clients => "/clients",
            Section::Documents => "/documents",
            Section::Employees => "/employees",
            Section::Tasks => "/tasks",
            Section::Chat => "/chat",
            Section::Calendar => "/calendar",
            Section::Leads => "/leads",
            Section::SeoArticles => "/seo-articles",
            Section::Study => "/study",
            Section::Translation => "/translation",
            Section::Users => "/users",
            Section::AgencySales => "/agency-sales",
            Section::BusinessDesigns => "/business-designs",
            Section::Notifications => "/notifications",
        }
    }
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub key: Section,
    pub label: &'static str,
    pub path: &'static str,
}

impl From<Section> for MenuItem {
    fn from(section: Section) -> Self {
        Self {
            key: section,
            label: section.label(),
            path: section.path(),
        }
    }
}

/// Builds the sidebar for the role.
pub fn menu_for(role: Role) -> Vec<MenuItem> {
    role.sections().iter().copied().map(MenuItem::from).collect()
}
