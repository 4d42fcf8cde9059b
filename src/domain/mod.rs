//! Domain entities and value objects of the management application.

pub mod agency;
pub mod business;
pub mod chat;
pub mod client;
pub mod customer;
pub mod lead;
pub mod memo;
pub mod notification;
pub mod role;
pub mod seo_article;
pub mod staff;
pub mod task;
pub mod types;
pub mod user;
