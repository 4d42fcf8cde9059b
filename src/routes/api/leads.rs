use actix_web::{HttpResponse, Responder, delete, get, patch, post, put, web};
use serde_json::{Value, json};

use crate::dto::leads::LeadsQuery;
use crate::forms::leads::{ImportLeadsForm, LeadForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_error, api_ok};
use crate::services::leads;

#[get("/leads")]
pub async fn list_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<LeadsQuery>,
) -> impl Responder {
    api_ok(leads::list_leads(repo.get_ref(), &user, params))
}

#[post("/leads")]
pub async fn create_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<LeadForm>,
) -> impl Responder {
    api_created(leads::create_lead(repo.get_ref(), &user, form))
}

/// Bulk import from CSV text; answers with the number of created leads.
#[post("/leads/import")]
pub async fn import_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ImportLeadsForm>,
) -> impl Responder {
    match leads::import_leads(repo.get_ref(), &user, &form.csv) {
        Ok(created) => HttpResponse::Created().json(json!({ "created": created })),
        Err(err) => api_error(err),
    }
}

#[get("/leads/{id}")]
pub async fn show_lead(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(leads::get_lead(repo.get_ref(), &user, id.into_inner()))
}

#[put("/leads/{id}")]
pub async fn update_lead(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<LeadForm>,
) -> impl Responder {
    api_ok(leads::update_lead(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/leads/{id}")]
pub async fn patch_lead(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(leads::patch_lead(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/leads/{id}")]
pub async fn delete_lead(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(leads::delete_lead(repo.get_ref(), &user, id.into_inner()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_leads)
        .service(create_lead)
        .service(import_leads)
        .service(show_lead)
        .service(update_lead)
        .service(patch_lead)
        .service(delete_lead);
}
