//! Direct and group chat.

use actix_multipart::form::MultipartForm;
use actix_web::{Either, HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::forms::chat::{ChatGroupForm, ConversationQuery, MessageForm, MessageUploadForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_error, api_ok};
use crate::services::chat;

#[get("/chat/users")]
pub async fn chat_users(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(chat::list_chat_users(repo.get_ref(), &user))
}

/// `?with=<user_id>` or `?group=<group_id>`.
#[get("/chat/messages")]
pub async fn list_messages(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(query): web::Query<ConversationQuery>,
) -> impl Responder {
    api_ok(chat::list_messages(repo.get_ref(), &user, query))
}

/// Accepts a JSON body, or multipart when a file is attached.
#[post("/chat/messages")]
pub async fn send_message(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: Either<web::Json<MessageForm>, MultipartForm<MessageUploadForm>>,
) -> impl Responder {
    let form = match body {
        Either::Left(web::Json(form)) => form,
        Either::Right(MultipartForm(upload)) => MessageForm::from(upload),
    };
    api_created(chat::send_message(repo.get_ref(), &user, form))
}

#[get("/chat/unread")]
pub async fn unread(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match chat::unread_total(repo.get_ref(), &user) {
        Ok(count) => HttpResponse::Ok().json(json!({ "unread": count })),
        Err(err) => api_error(err),
    }
}

#[get("/chat/groups")]
pub async fn list_groups(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(chat::list_groups(repo.get_ref(), &user))
}

#[post("/chat/groups")]
pub async fn create_group(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ChatGroupForm>,
) -> impl Responder {
    api_created(chat::create_group(repo.get_ref(), &user, form))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(chat_users)
        .service(list_messages)
        .service(send_message)
        .service(unread)
        .service(list_groups)
        .service(create_group);
}
