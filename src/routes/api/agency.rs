use actix_web::{Responder, delete, get, patch, post, put, web};
use serde_json::Value;

use crate::forms::agency::AgencySaleForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_ok};
use crate::services::agency;

#[get("/agency/sales")]
pub async fn list_sales(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(agency::list_sales(repo.get_ref(), &user))
}

#[post("/agency/sales")]
pub async fn create_sale(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AgencySaleForm>,
) -> impl Responder {
    api_created(agency::create_sale(repo.get_ref(), &user, form))
}

#[get("/agency/sales/{id}")]
pub async fn show_sale(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(agency::get_sale(repo.get_ref(), &user, id.into_inner()))
}

#[put("/agency/sales/{id}")]
pub async fn update_sale(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AgencySaleForm>,
) -> impl Responder {
    api_ok(agency::update_sale(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/agency/sales/{id}")]
pub async fn patch_sale(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(agency::patch_sale(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/agency/sales/{id}")]
pub async fn delete_sale(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(agency::delete_sale(repo.get_ref(), &user, id.into_inner()))
}

#[get("/agency/summary")]
pub async fn agency_summary(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(agency::agency_summary(repo.get_ref(), &user))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_sales)
        .service(create_sale)
        .service(show_sale)
        .service(update_sale)
        .service(patch_sale)
        .service(delete_sale)
        .service(agency_summary);
}
