//! Personal calendar memos.

use actix_web::{Responder, delete, get, patch, post, put, web};
use serde_json::Value;

use crate::forms::memos::{MemoForm, MemoRangeQuery};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_ok};
use crate::services::memos;

#[get("/memos")]
pub async fn list_memos(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<MemoRangeQuery>,
) -> impl Responder {
    api_ok(memos::list_memos(repo.get_ref(), &user, params))
}

#[post("/memos")]
pub async fn create_memo(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<MemoForm>,
) -> impl Responder {
    api_created(memos::create_memo(repo.get_ref(), &user, form))
}

#[get("/memos/{id}")]
pub async fn show_memo(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(memos::get_memo(repo.get_ref(), &user, id.into_inner()))
}

#[put("/memos/{id}")]
pub async fn update_memo(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<MemoForm>,
) -> impl Responder {
    api_ok(memos::update_memo(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/memos/{id}")]
pub async fn patch_memo(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(memos::patch_memo(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/memos/{id}")]
pub async fn delete_memo(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(memos::delete_memo(repo.get_ref(), &user, id.into_inner()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_memos)
        .service(create_memo)
        .service(show_memo)
        .service(update_memo)
        .service(patch_memo)
        .service(delete_memo);
}
