use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::Level;
use serde_json::{Value, json};
use tera::Tera;

use sinjapan_manager::ai::AiGateway;
use sinjapan_manager::api_extractor_config;
use sinjapan_manager::domain::role::Role;
use sinjapan_manager::middleware::RedirectUnauthorized;
use sinjapan_manager::models::auth::AuthenticatedUser;
use sinjapan_manager::models::config::ServerConfig;
use sinjapan_manager::routes::alert_level_to_str;
use sinjapan_manager::routes::api;
use sinjapan_manager::routes::main::show_index;

mod common;

const SECRET: &str = "integration-secret";

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".into(),
        address: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        templates_dir: String::new(),
        secret: SECRET.into(),
        auth_service_url: "http://auth.local".into(),
        ai_service_url: "http://127.0.0.1:9".into(),
        ai_api_key: None,
        ai_timeout_secs: 1,
    }
}

fn bearer(user_id: i32, role: Role) -> (header::HeaderName, String) {
    let user = AuthenticatedUser {
        sub: user_id.to_string(),
        email: format!("user{user_id}@sinjapan.jp"),
        name: format!("ユーザー{user_id}"),
        role,
        exp: 4_102_444_800,
    };
    let token = user.to_jwt(SECRET).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

macro_rules! api_app {
    ($db:expr) => {{
        let config = server_config();
        let gateway = AiGateway::from_config(&config).unwrap();
        test::init_service(
            App::new()
                .app_data(web::Data::new($db.repo()))
                .app_data(web::Data::new(config))
                .app_data(web::Data::new(gateway))
                .app_data(web::Data::new(Tera::default()))
                .service(
                    web::scope("/api")
                        .configure(api_extractor_config)
                        .configure(api::configure),
                )
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(show_index),
                ),
        )
        .await
    }};
}

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn missing_identity_is_a_json_401() {
    let db = common::TestDb::new("missing_identity_is_a_json_401.db");
    let app = api_app!(db);

    let req = test::TestRequest::get().uri("/api/customers").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn html_pages_redirect_to_signin() {
    let db = common::TestDb::new("html_pages_redirect_to_signin.db");
    let app = api_app!(db);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/auth/signin");
}

#[actix_web::test]
async fn client_menu_lists_its_four_sections() {
    let db = common::TestDb::new("client_menu_lists_its_four_sections.db");
    let app = api_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/menu")
        .insert_header(bearer(1, Role::Client))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["dashboard", "documents", "chat", "notifications"]);
}

#[actix_web::test]
async fn customer_lifecycle_is_reflected_in_list() {
    let db = common::TestDb::new("customer_lifecycle_is_reflected_in_list.db");
    let manager = common::create_user(&db.repo(), "鈴木", "suzuki@sinjapan.jp", Role::Manager);
    let app = api_app!(db);
    let auth = bearer(manager.id.get(), Role::Manager);

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .insert_header(auth.clone())
        .set_json(json!({ "company_name": "株式会社アクメ", "status": "active" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/customers/{id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "status": "inactive" }))
        .to_request();
    let patched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(patched["status"], "inactive");
    assert_eq!(patched["company_name"], "株式会社アクメ");

    let req = test::TestRequest::get()
        .uri("/api/customers")
        .insert_header(auth.clone())
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["status"], "inactive");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/customers/{id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/customers/{id}"))
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn customer_without_company_name_is_rejected() {
    let db = common::TestDb::new("customer_without_company_name_is_rejected.db");
    let manager = common::create_user(&db.repo(), "鈴木", "suzuki@sinjapan.jp", Role::Manager);
    let app = api_app!(db);
    let auth = bearer(manager.id.get(), Role::Manager);

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .insert_header(auth.clone())
        .set_json(json!({ "contact_name": "山田" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/customers")
        .insert_header(auth)
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn malformed_json_uses_error_shape() {
    let db = common::TestDb::new("malformed_json_uses_error_shape.db");
    let app = api_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .insert_header(bearer(1, Role::Admin))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn staff_cannot_open_customers() {
    let db = common::TestDb::new("staff_cannot_open_customers.db");
    let app = api_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/customers")
        .insert_header(bearer(1, Role::Staff))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn task_status_patch_keeps_other_fields() {
    let db = common::TestDb::new("task_status_patch_keeps_other_fields.db");
    let staff = common::create_user(&db.repo(), "高橋", "takahashi@sinjapan.jp", Role::Staff);
    let app = api_app!(db);
    let auth = bearer(staff.id.get(), Role::Staff);

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(auth.clone())
        .set_json(json!({ "title": "月次報告", "priority": "high" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "status": "done" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{id}"))
        .insert_header(auth)
        .to_request();
    let task: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(task["status"], "done");
    assert_eq!(task["title"], "月次報告");
    assert_eq!(task["priority"], "high");
}

#[actix_web::test]
async fn task_without_title_is_rejected() {
    let db = common::TestDb::new("task_without_title_is_rejected.db");
    let staff = common::create_user(&db.repo(), "高橋", "takahashi@sinjapan.jp", Role::Staff);
    let app = api_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(staff.id.get(), Role::Staff))
        .set_json(json!({ "title": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn csv_import_creates_one_lead() {
    let db = common::TestDb::new("csv_import_creates_one_lead.db");
    let manager = common::create_user(&db.repo(), "鈴木", "suzuki@sinjapan.jp", Role::Manager);
    let app = api_app!(db);
    let auth = bearer(manager.id.get(), Role::Manager);

    let req = test::TestRequest::post()
        .uri("/api/leads/import")
        .insert_header(auth.clone())
        .set_json(json!({ "csv": "名前,会社,電話\n山田太郎,山田商店,03-1234-5678\n,名無し,\n" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["created"], 1);

    let req = test::TestRequest::get()
        .uri("/api/leads")
        .insert_header(auth)
        .to_request();
    let leads: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(leads.as_array().unwrap().len(), 1);
    assert_eq!(leads[0]["name"], "山田太郎");
    assert_eq!(leads[0]["company"], "山田商店");
    assert_eq!(leads[0]["phone"], "+81312345678");
}

#[actix_web::test]
async fn invoice_summary_is_not_taken_for_an_id() {
    let db = common::TestDb::new("invoice_summary_is_not_taken_for_an_id.db");
    let app = api_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/client-invoices/summary")
        .insert_header(bearer(1, Role::Admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn unreachable_ai_backend_is_a_502() {
    let db = common::TestDb::new("unreachable_ai_backend_is_a_502.db");
    let app = api_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/ai/translate")
        .insert_header(bearer(1, Role::Staff))
        .set_json(json!({ "text": "こんにちは", "target_lang": "en" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
