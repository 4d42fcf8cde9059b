use std::time::Duration;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use mockito::{Matcher, Server};
use serde_json::{Value, json};

use sinjapan_manager::ai::{AiError, AiGateway, AiKind};
use sinjapan_manager::api_extractor_config;
use sinjapan_manager::domain::role::Role;
use sinjapan_manager::models::auth::AuthenticatedUser;
use sinjapan_manager::models::config::ServerConfig;
use sinjapan_manager::routes::api;

mod common;

const SECRET: &str = "ai-test-secret";

#[actix_web::test]
async fn generate_posts_payload_with_bearer_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/translate")
        .match_header("authorization", "Bearer ai-key")
        .match_body(Matcher::PartialJson(json!({ "text": "こんにちは" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"translation":"Hello"}"#)
        .create_async()
        .await;

    let gateway =
        AiGateway::new(server.url(), Some("ai-key".into()), Duration::from_secs(5)).unwrap();
    let answer = gateway
        .generate(AiKind::Translate, &json!({ "text": "こんにちは", "target_lang": "en" }))
        .await
        .unwrap();

    assert_eq!(answer["translation"], "Hello");
    mock.assert_async().await;
}

#[actix_web::test]
async fn error_status_carries_backend_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/study")
        .with_status(429)
        .with_body(r#"{"message":"quota exceeded"}"#)
        .create_async()
        .await;

    let gateway = AiGateway::new(server.url(), None, Duration::from_secs(5)).unwrap();
    let err = gateway
        .generate(AiKind::Study, &json!({ "topic": "敬語" }))
        .await
        .unwrap_err();

    match err {
        AiError::Status { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[actix_web::test]
async fn non_json_answer_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/seo-article")
        .with_status(200)
        .with_body("<html>")
        .create_async()
        .await;

    let gateway = AiGateway::new(server.url(), None, Duration::from_secs(5)).unwrap();
    let err = gateway
        .generate(AiKind::SeoArticle, &json!({ "keywords": "東京 観光" }))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Decode(_)));
}

#[actix_web::test]
async fn saved_task_suggestions_become_ai_tasks() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/tasks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "tasks": [
                    { "title": "競合調査", "priority": "high" },
                    { "title": "", "priority": "low" },
                    { "title": "販促計画", "priority": "urgent-ish" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let db = common::TestDb::new("saved_task_suggestions_become_ai_tasks.db");
    let manager = common::create_user(&db.repo(), "鈴木", "suzuki@sinjapan.jp", Role::Manager);

    let config = ServerConfig {
        domain: "localhost".into(),
        address: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        templates_dir: String::new(),
        secret: SECRET.into(),
        auth_service_url: "http://auth.local".into(),
        ai_service_url: server.url(),
        ai_api_key: None,
        ai_timeout_secs: 5,
    };
    let gateway = AiGateway::from_config(&config).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db.repo()))
            .app_data(web::Data::new(config))
            .app_data(web::Data::new(gateway))
            .service(
                web::scope("/api")
                    .configure(api_extractor_config)
                    .configure(api::configure),
            ),
    )
    .await;

    let token = AuthenticatedUser {
        sub: manager.id.get().to_string(),
        email: "suzuki@sinjapan.jp".into(),
        name: "鈴木".into(),
        role: Role::Manager,
        exp: 4_102_444_800,
    }
    .to_jwt(SECRET)
    .unwrap();
    let auth = (header::AUTHORIZATION, format!("Bearer {token}"));

    let req = test::TestRequest::post()
        .uri("/api/ai/tasks")
        .insert_header(auth.clone())
        .set_json(json!({ "prompt": "新店舗の準備", "save": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;

    let saved = body["saved"].as_array().unwrap();
    assert_eq!(saved.len(), 2);
    assert!(saved.iter().all(|task| task["ai_generated"] == true));
    assert_eq!(saved[1]["priority"], "medium");

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(auth)
        .to_request();
    let tasks: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tasks.as_array().unwrap().len(), 2);
}
