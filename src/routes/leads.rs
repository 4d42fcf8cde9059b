use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::leads::LeadsQuery;
use crate::forms::leads::UploadLeadsForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, leads};

#[get("/leads")]
pub async fn show_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Query(params): web::Query<LeadsQuery>,
) -> impl Responder {
    let data = match leads::load_leads_page(repo.get_ref(), &user, params) {
        Ok(data) => data,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::TypeConstraint(message)) | Err(ServiceError::Form(message)) => {
            FlashMessage::warning(message).send();
            return redirect("/leads");
        }
        Err(err) => {
            log::error!("Failed to load leads page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "leads",
        &server_config.auth_service_url,
    );
    context.insert("leads", &data.leads);
    context.insert("total", &data.total);
    if let Some(search_query) = &data.search_query {
        context.insert("search_query", search_query);
    }

    render_template(&tera, "leads/index.html", &context)
}

#[post("/leads/upload")]
pub async fn upload_leads(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadLeadsForm>,
) -> impl Responder {
    let text = match form.read_text() {
        Ok(text) => text,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/leads");
        }
    };

    match leads::import_leads(repo.get_ref(), &user, &text) {
        Ok(0) => {
            FlashMessage::warning("取り込めるリードがありませんでした").send();
        }
        Ok(created) => {
            FlashMessage::success(format!("{created}件のリードを取り込みました")).send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(err) => {
            FlashMessage::error(format!("リードの取り込みに失敗しました: {err}")).send();
        }
    }
    redirect("/leads")
}
