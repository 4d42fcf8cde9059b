use actix_web::{HttpResponse, Responder, get, web};

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::api_ok;
use crate::services::dashboard;

/// Sidebar entries for the caller's role.
#[get("/menu")]
pub async fn menu(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(dashboard::menu(&user))
}

#[get("/dashboard")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(dashboard::dashboard(repo.get_ref(), &user))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(menu).service(show_dashboard);
}
