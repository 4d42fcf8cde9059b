//! JSON API mounted under `/api`.
//!
//! Every handler authenticates through [`AuthenticatedUser`], delegates to the
//! matching service and maps the outcome with the helpers in
//! [`crate::routes`].
//!
//! [`AuthenticatedUser`]: crate::models::auth::AuthenticatedUser

use actix_web::web;

pub mod agency;
pub mod ai;
pub mod businesses;
pub mod chat;
pub mod clients;
pub mod customers;
pub mod dashboard;
pub mod employees;
pub mod leads;
pub mod memos;
pub mod notifications;
pub mod seo_articles;
pub mod tasks;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(dashboard::configure)
        .configure(users::configure)
        .configure(customers::configure)
        .configure(clients::configure)
        .configure(employees::configure)
        .configure(tasks::configure)
        .configure(businesses::configure)
        .configure(leads::configure)
        .configure(chat::configure)
        .configure(memos::configure)
        .configure(seo_articles::configure)
        .configure(notifications::configure)
        .configure(agency::configure)
        .configure(ai::configure);
}
