use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use serde_json::json;

use crate::forms::notifications::{NotificationForm, NotificationPatch};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_error, api_ok};
use crate::services::notifications;

#[get("/notifications")]
pub async fn list_notifications(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(notifications::list_notifications(repo.get_ref(), &user))
}

#[post("/notifications")]
pub async fn create_notification(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<NotificationForm>,
) -> impl Responder {
    api_created(notifications::create_notification(
        repo.get_ref(),
        &user,
        form,
    ))
}

#[post("/notifications/read-all")]
pub async fn read_all(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match notifications::mark_all_read(repo.get_ref(), &user) {
        Ok(updated) => HttpResponse::Ok().json(json!({ "updated": updated })),
        Err(err) => api_error(err),
    }
}

#[get("/notifications/{id}")]
pub async fn show_notification(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(notifications::get_notification(
        repo.get_ref(),
        &user,
        id.into_inner(),
    ))
}

#[patch("/notifications/{id}")]
pub async fn set_read(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(patch): web::Json<NotificationPatch>,
) -> impl Responder {
    api_ok(notifications::set_read(
        repo.get_ref(),
        &user,
        id.into_inner(),
        patch,
    ))
}

#[delete("/notifications/{id}")]
pub async fn delete_notification(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(notifications::delete_notification(
        repo.get_ref(),
        &user,
        id.into_inner(),
    ))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_notifications)
        .service(create_notification)
        .service(read_all)
        .service(show_notification)
        .service(set_read)
        .service(delete_notification);
}
