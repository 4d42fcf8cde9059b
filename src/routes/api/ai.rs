//! Proxies to the AI generators.
//!
//! Requests are checked synchronously, forwarded to the backend and the JSON
//! answer is returned unchanged. Task suggestions are additionally stored when
//! the request sets `save`.

use actix_web::{HttpResponse, Responder, post, web};
use serde::Serialize;
use serde_json::json;

use crate::ai::{AiGateway, AiKind};
use crate::forms::ai::{AiSeoArticleRequest, AiStudyRequest, AiTaskRequest, AiTranslateRequest};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::api_error;
use crate::services::{ServiceError, ServiceResult, ai};

async fn forward<P: Serialize>(
    gateway: &AiGateway,
    kind: AiKind,
    prepared: ServiceResult<P>,
) -> HttpResponse {
    let request = match prepared {
        Ok(request) => request,
        Err(err) => return api_error(err),
    };
    match gateway.generate(kind, &request).await {
        Ok(answer) => HttpResponse::Ok().json(answer),
        Err(err) => api_error(ServiceError::Upstream(err.to_string())),
    }
}

#[post("/ai/tasks")]
pub async fn generate_tasks(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    gateway: web::Data<AiGateway>,
    web::Json(request): web::Json<AiTaskRequest>,
) -> impl Responder {
    let request = match ai::prepare_tasks(&user, request) {
        Ok(request) => request,
        Err(err) => return api_error(err),
    };

    let answer = match gateway.generate(AiKind::Tasks, &request).await {
        Ok(answer) => answer,
        Err(err) => return api_error(ServiceError::Upstream(err.to_string())),
    };
    if !request.save {
        return HttpResponse::Ok().json(answer);
    }

    match ai::save_generated_tasks(repo.get_ref(), &user, request.business_id, &answer) {
        Ok(saved) => HttpResponse::Created().json(json!({ "answer": answer, "saved": saved })),
        Err(err) => api_error(err),
    }
}

#[post("/ai/study")]
pub async fn study(
    user: AuthenticatedUser,
    gateway: web::Data<AiGateway>,
    web::Json(request): web::Json<AiStudyRequest>,
) -> impl Responder {
    forward(&gateway, AiKind::Study, ai::prepare_study(&user, request)).await
}

#[post("/ai/translate")]
pub async fn translate(
    user: AuthenticatedUser,
    gateway: web::Data<AiGateway>,
    web::Json(request): web::Json<AiTranslateRequest>,
) -> impl Responder {
    forward(
        &gateway,
        AiKind::Translate,
        ai::prepare_translation(&user, request),
    )
    .await
}

#[post("/ai/seo-article")]
pub async fn seo_article(
    user: AuthenticatedUser,
    gateway: web::Data<AiGateway>,
    web::Json(request): web::Json<AiSeoArticleRequest>,
) -> impl Responder {
    forward(
        &gateway,
        AiKind::SeoArticle,
        ai::prepare_seo_article(&user, request),
    )
    .await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_tasks)
        .service(study)
        .service(translate)
        .service(seo_article);
}
