//! `/api/users`, executive only.

use actix_web::{Responder, delete, get, patch, post, put, web};
use serde_json::Value;

use crate::forms::users::UserForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_ok};
use crate::services::users;

#[get("/users")]
pub async fn list_users(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(users::list_users(repo.get_ref(), &user))
}

#[post("/users")]
pub async fn create_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UserForm>,
) -> impl Responder {
    api_created(users::create_user(repo.get_ref(), &user, form))
}

#[get("/users/{id}")]
pub async fn show_user(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(users::get_user(repo.get_ref(), &user, id.into_inner()))
}

#[put("/users/{id}")]
pub async fn update_user(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UserForm>,
) -> impl Responder {
    api_ok(users::update_user(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/users/{id}")]
pub async fn patch_user(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(users::patch_user(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/users/{id}")]
pub async fn delete_user(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(users::delete_user(repo.get_ref(), &user, id.into_inner()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_users)
        .service(create_user)
        .service(show_user)
        .service(update_user)
        .service(patch_user)
        .service(delete_user);
}
