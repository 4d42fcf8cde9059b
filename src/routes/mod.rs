//! HTTP layer: JSON handlers under `/api` and the server-rendered pages.
//!
//! Handlers stay thin. They extract the caller and the request body, call a
//! service and translate the outcome into a response.

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpResponse, error};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use serde_json::json;
use tera::{Context, Tera};

use crate::domain::role::menu_for;
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;
use crate::services::{ServiceError, ServiceResult};

pub mod api;
pub mod leads;
pub mod main;

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// 303 redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context shared by every page: alerts, the caller, the role menu and the
/// link back to the auth service.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context.insert("menu", &menu_for(user.role));
    context
}

fn error_body(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": message }))
}

/// Maps a service failure onto the JSON error shape.
pub fn api_error(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => error_body(StatusCode::FORBIDDEN, "権限がありません"),
        ServiceError::NotFound => error_body(StatusCode::NOT_FOUND, "データが見つかりません"),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            error_body(StatusCode::BAD_REQUEST, &message)
        }
        ServiceError::Repository(RepositoryError::ConstraintViolation(message)) => {
            log::warn!("Rejected write: {message}");
            error_body(
                StatusCode::BAD_REQUEST,
                "関連するデータと矛盾するため保存できません",
            )
        }
        ServiceError::Upstream(message) => {
            error_body(StatusCode::BAD_GATEWAY, &message)
        }
        err => {
            log::error!("Request failed: {err}");
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "サーバーエラーが発生しました",
            )
        }
    }
}

pub fn api_ok<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => api_error(err),
    }
}

pub fn api_created<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Created().json(body),
        Err(err) => api_error(err),
    }
}

pub fn api_deleted(result: ServiceResult<()>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => api_error(err),
    }
}

/// Turns malformed JSON bodies, paths and query strings into `{ error }` 400s.
pub fn bad_request(err: impl std::fmt::Display) -> actix_web::Error {
    let message = format!("リクエストの形式が正しくありません: {err}");
    error::InternalError::from_response(
        message.clone(),
        error_body(StatusCode::BAD_REQUEST, &message),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    #[actix_web::test]
    async fn service_errors_map_to_statuses() {
        assert_eq!(api_error(ServiceError::Unauthorized).status(), StatusCode::FORBIDDEN);
        assert_eq!(api_error(ServiceError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            api_error(ServiceError::Upstream("down".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            api_error(ServiceError::Repository(RepositoryError::ConstraintViolation(
                "foreign key".into()
            )))
            .status(),
            StatusCode::BAD_REQUEST
        );

        let response = api_error(ServiceError::Form("会社名を入力してください".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "会社名を入力してください");
    }

    #[test]
    fn delete_answers_no_content() {
        assert_eq!(api_deleted(Ok(())).status(), StatusCode::NO_CONTENT);
    }
}
