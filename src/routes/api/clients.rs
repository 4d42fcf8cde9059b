//! Client companies, their projects and invoices.

use actix_web::{Responder, delete, get, patch, post, put, web};
use serde_json::Value;

use crate::forms::clients::{ClientFilter, ClientForm, ClientInvoiceForm, ClientProjectForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_ok};
use crate::services::clients;

#[get("/clients")]
pub async fn list_clients(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(clients::list_clients(repo.get_ref(), &user))
}

#[post("/clients")]
pub async fn create_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClientForm>,
) -> impl Responder {
    api_created(clients::create_client(repo.get_ref(), &user, form))
}

#[get("/clients/{id}")]
pub async fn show_client(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(clients::get_client(repo.get_ref(), &user, id.into_inner()))
}

#[put("/clients/{id}")]
pub async fn update_client(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClientForm>,
) -> impl Responder {
    api_ok(clients::update_client(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/clients/{id}")]
pub async fn patch_client(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(clients::patch_client(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/clients/{id}")]
pub async fn delete_client(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(clients::delete_client(repo.get_ref(), &user, id.into_inner()))
}

#[get("/client-projects")]
pub async fn list_projects(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<ClientFilter>,
) -> impl Responder {
    api_ok(clients::list_projects(repo.get_ref(), &user, params))
}

#[post("/client-projects")]
pub async fn create_project(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClientProjectForm>,
) -> impl Responder {
    api_created(clients::create_project(repo.get_ref(), &user, form))
}

#[get("/client-projects/{id}")]
pub async fn show_project(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(clients::get_project(repo.get_ref(), &user, id.into_inner()))
}

#[put("/client-projects/{id}")]
pub async fn update_project(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClientProjectForm>,
) -> impl Responder {
    api_ok(clients::update_project(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/client-projects/{id}")]
pub async fn patch_project(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(clients::patch_project(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/client-projects/{id}")]
pub async fn delete_project(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(clients::delete_project(repo.get_ref(), &user, id.into_inner()))
}

/// Registered before `/client-invoices/{id}` so the literal segment wins.
#[get("/client-invoices/summary")]
pub async fn invoice_summary(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(clients::invoice_summary(repo.get_ref(), &user))
}

#[get("/client-invoices")]
pub async fn list_invoices(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<ClientFilter>,
) -> impl Responder {
    api_ok(clients::list_invoices(repo.get_ref(), &user, params))
}

#[post("/client-invoices")]
pub async fn create_invoice(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClientInvoiceForm>,
) -> impl Responder {
    api_created(clients::create_invoice(repo.get_ref(), &user, form))
}

#[get("/client-invoices/{id}")]
pub async fn show_invoice(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(clients::get_invoice(repo.get_ref(), &user, id.into_inner()))
}

#[put("/client-invoices/{id}")]
pub async fn update_invoice(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClientInvoiceForm>,
) -> impl Responder {
    api_ok(clients::update_invoice(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/client-invoices/{id}")]
pub async fn patch_invoice(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(clients::patch_invoice(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/client-invoices/{id}")]
pub async fn delete_invoice(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(clients::delete_invoice(repo.get_ref(), &user, id.into_inner()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_clients)
        .service(create_client)
        .service(show_client)
        .service(update_client)
        .service(patch_client)
        .service(delete_client)
        .service(list_projects)
        .service(create_project)
        .service(show_project)
        .service(update_project)
        .service(patch_project)
        .service(delete_project)
        .service(invoice_summary)
        .service(list_invoices)
        .service(create_invoice)
        .service(show_invoice)
        .service(update_invoice)
        .service(patch_invoice)
        .service(delete_invoice);
}
