//! Database models and request-scoped identity.

pub mod agency;
#[cfg(feature = "server")]
pub mod auth;
pub mod business;
pub mod chat;
pub mod client;
pub mod config;
pub mod customer;
pub mod lead;
pub mod memo;
pub mod notification;
pub mod seo_article;
pub mod staff;
pub mod task;
pub mod user;
