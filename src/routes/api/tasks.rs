use actix_web::{Responder, delete, get, patch, post, put, web};
use serde_json::Value;

use crate::forms::tasks::{TaskForm, TaskListParams};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_ok};
use crate::services::tasks;

#[get("/tasks")]
pub async fn list_tasks(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<TaskListParams>,
) -> impl Responder {
    api_ok(tasks::list_tasks(repo.get_ref(), &user, params))
}

#[post("/tasks")]
pub async fn create_task(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<TaskForm>,
) -> impl Responder {
    api_created(tasks::create_task(repo.get_ref(), &user, form))
}

#[get("/tasks/{id}")]
pub async fn show_task(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(tasks::get_task(repo.get_ref(), &user, id.into_inner()))
}

#[put("/tasks/{id}")]
pub async fn update_task(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<TaskForm>,
) -> impl Responder {
    api_ok(tasks::update_task(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/tasks/{id}")]
pub async fn patch_task(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(tasks::patch_task(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/tasks/{id}")]
pub async fn delete_task(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(tasks::delete_task(repo.get_ref(), &user, id.into_inner()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_tasks)
        .service(create_task)
        .service(show_task)
        .service(update_task)
        .service(patch_task)
        .service(delete_task);
}
