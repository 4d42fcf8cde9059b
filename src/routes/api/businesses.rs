use actix_web::{Responder, delete, get, patch, post, put, web};
use serde_json::Value;

use crate::forms::businesses::{BusinessDesignFilter, BusinessDesignForm, BusinessForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_ok};
use crate::services::businesses;

#[get("/businesses")]
pub async fn list_businesses(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(businesses::list_businesses(repo.get_ref(), &user))
}

#[post("/businesses")]
pub async fn create_business(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<BusinessForm>,
) -> impl Responder {
    api_created(businesses::create_business(repo.get_ref(), &user, form))
}

#[get("/businesses/{id}")]
pub async fn show_business(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(businesses::get_business(repo.get_ref(), &user, id.into_inner()))
}

#[put("/businesses/{id}")]
pub async fn update_business(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<BusinessForm>,
) -> impl Responder {
    api_ok(businesses::update_business(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/businesses/{id}")]
pub async fn patch_business(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(businesses::patch_business(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/businesses/{id}")]
pub async fn delete_business(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(businesses::delete_business(repo.get_ref(), &user, id.into_inner()))
}

#[get("/business-designs")]
pub async fn list_designs(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<BusinessDesignFilter>,
) -> impl Responder {
    api_ok(businesses::list_designs(repo.get_ref(), &user, params))
}

#[post("/business-designs")]
pub async fn create_design(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<BusinessDesignForm>,
) -> impl Responder {
    api_created(businesses::create_design(repo.get_ref(), &user, form))
}

#[get("/business-designs/{id}")]
pub async fn show_design(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(businesses::get_design(repo.get_ref(), &user, id.into_inner()))
}

#[put("/business-designs/{id}")]
pub async fn update_design(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<BusinessDesignForm>,
) -> impl Responder {
    api_ok(businesses::update_design(repo.get_ref(), &user, id.into_inner(), form))
}

#[patch("/business-designs/{id}")]
pub async fn patch_design(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(businesses::patch_design(repo.get_ref(), &user, id.into_inner(), changes))
}

#[delete("/business-designs/{id}")]
pub async fn delete_design(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(businesses::delete_design(repo.get_ref(), &user, id.into_inner()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_businesses)
        .service(create_business)
        .service(show_business)
        .service(update_business)
        .service(patch_business)
        .service(delete_business)
        .service(list_designs)
        .service(create_design)
        .service(show_design)
        .service(update_design)
        .service(patch_design)
        .service(delete_design);
}
