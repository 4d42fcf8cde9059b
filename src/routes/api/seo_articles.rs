use actix_web::{Responder, delete, get, patch, post, put, web};
use serde_json::Value;

use crate::forms::seo_articles::{SeoArticleForm, SeoArticleListQuery};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_ok};
use crate::services::seo_articles;

#[get("/seo-articles")]
pub async fn list_articles(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<SeoArticleListQuery>,
) -> impl Responder {
    api_ok(seo_articles::list_articles(repo.get_ref(), &user, params))
}

#[post("/seo-articles")]
pub async fn create_article(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SeoArticleForm>,
) -> impl Responder {
    api_created(seo_articles::create_article(repo.get_ref(), &user, form))
}

#[get("/seo-articles/{id}")]
pub async fn show_article(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(seo_articles::get_article(repo.get_ref(), &user, id.into_inner()))
}

#[put("/seo-articles/{id}")]
pub async fn update_article(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SeoArticleForm>,
) -> impl Responder {
    api_ok(seo_articles::update_article(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/seo-articles/{id}")]
pub async fn patch_article(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(seo_articles::patch_article(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/seo-articles/{id}")]
pub async fn delete_article(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(seo_articles::delete_article(repo.get_ref(), &user, id.into_inner()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_articles)
        .service(create_article)
        .service(show_article)
        .service(update_article)
        .service(patch_article)
        .service(delete_article);
}
