//! Captures `log` records to check exactly which calls produce admin access entries.
//! Kept in its own test binary because it installs the global logger.

mod common;

use std::sync::Mutex;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use lazy_static::lazy_static;
use log::{LevelFilter, Metadata, Record};
use serde_json::json;

use common::{init_app, TestContext};
use todo_expert::models::{CommentResponse, TodoSaveResponse, UserRole};

lazy_static! {
    static ref CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target() == "todo_expert::audit"
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            CAPTURED.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

fn audit_lines() -> Vec<String> {
    CAPTURED.lock().unwrap().clone()
}

#[actix_rt::test]
async fn test_admin_access_log_fires_only_on_admin_operations() {
    log::set_boxed_logger(Box::new(CaptureLogger)).unwrap();
    log::set_max_level(LevelFilter::Info);

    let ctx = TestContext::new();
    let admin = ctx.store.insert_user("admin@example.com", UserRole::Admin);
    let member = ctx.store.insert_user("member@example.com", UserRole::User);
    let app = init_app(ctx.state.clone(), ctx.keys.clone()).await;
    let member_token = ctx.bearer(&member);
    let admin_token = ctx.bearer(&admin);

    // Regular operations: no audit entries.
    let req = test::TestRequest::post()
        .uri("/api/todos")
        .append_header((header::AUTHORIZATION, member_token.clone()))
        .set_json(json!({ "title": "Title", "contents": "Contents" }))
        .to_request();
    let todo: TodoSaveResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/todos/{}/comments", todo.id))
        .append_header((header::AUTHORIZATION, member_token.clone()))
        .set_json(json!({ "contents": "Hello" }))
        .to_request();
    let comment: CommentResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", member.id))
        .append_header((header::AUTHORIZATION, admin_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(audit_lines().is_empty());

    // change_user_role
    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/users/{}", member.id))
        .append_header((header::AUTHORIZATION, admin_token.clone()))
        .set_json(json!({ "role": "USER" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // delete_comment
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/comments/{}", comment.id))
        .append_header((header::AUTHORIZATION, admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let lines = audit_lines();
    assert_eq!(lines.len(), 2, "captured: {:?}", lines);

    let expected_user = format!("User ID: {},", admin.id);
    assert!(lines[0].starts_with("Admin Access Log - "));
    assert!(lines[0].contains(&expected_user));
    assert!(lines[0].contains(&format!("Request URL: /api/admin/users/{}", member.id)));
    assert!(lines[0].ends_with("Method: change_user_role"));

    assert!(lines[1].contains(&expected_user));
    assert!(lines[1].contains(&format!("Request URL: /api/admin/comments/{}", comment.id)));
    assert!(lines[1].ends_with("Method: delete_comment"));

    // A rejected non-admin call never reaches the hook.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/comments/{}", comment.id))
        .append_header((header::AUTHORIZATION, member_token))
        .to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.error_response().status(),
    };
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(audit_lines().len(), 2);
}
