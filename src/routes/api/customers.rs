use actix_web::{Responder, delete, get, patch, post, put, web};
use serde_json::Value;

use crate::forms::customers::{CustomerForm, CustomerListParams};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_ok};
use crate::services::customers;

#[get("/customers")]
pub async fn list_customers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<CustomerListParams>,
) -> impl Responder {
    api_ok(customers::list_customers(repo.get_ref(), &user, params))
}

#[post("/customers")]
pub async fn create_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CustomerForm>,
) -> impl Responder {
    api_created(customers::create_customer(repo.get_ref(), &user, form))
}

#[get("/customers/{id}")]
pub async fn show_customer(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(customers::get_customer(repo.get_ref(), &user, id.into_inner()))
}

#[put("/customers/{id}")]
pub async fn update_customer(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CustomerForm>,
) -> impl Responder {
    api_ok(customers::update_customer(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/customers/{id}")]
pub async fn patch_customer(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(customers::patch_customer(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/customers/{id}")]
pub async fn delete_customer(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(customers::delete_customer(repo.get_ref(), &user, id.into_inner()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_customers)
        .service(create_customer)
        .service(show_customer)
        .service(update_customer)
        .service(patch_customer)
        .service(delete_customer);
}
