//! HTTP API integration tests
//!
//! Builds the app through `configure_app` on top of a temporary SQLite file,
//! the same wiring the server uses.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::App;
use serde_json::{Value, json};
use tempfile::TempDir;

use folio::api::jwt::JwtService;
use folio::api::middleware::TrackingGate;
use folio::api::services::AdminAccess;
use folio::config::TrackingConfig;
use folio::runtime::lifetime::startup::StartupContext;
use folio::runtime::modes::configure_app;
use folio::services::ContactService;
use folio::storage::SeaOrmStorage;
use folio::tracking::InteractionTracker;
use folio::utils::password::hash_password;

const ADMIN_PASSWORD: &str = "correct-horse-battery";

// =============================================================================
// Test Setup
// =============================================================================

async fn create_context(admin_enabled: bool) -> (StartupContext, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        temp_dir.path().join("api_test.db").display()
    );
    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, 2)
            .await
            .expect("Failed to create storage"),
    );

    let tracker = InteractionTracker::from_config(storage.clone(), &TrackingConfig::default())
        .expect("default tracking config is valid");
    let password_hash = if admin_enabled {
        hash_password(ADMIN_PASSWORD).expect("hashing works")
    } else {
        String::new()
    };
    let admin_access = AdminAccess::new(
        password_hash,
        JwtService::new("integration-test-secret", 60),
    );

    let ctx = StartupContext {
        contact_service: Arc::new(ContactService::new(storage.clone())),
        tracker: Arc::new(tracker),
        storage,
        admin_access,
    };
    (ctx, temp_dir)
}

macro_rules! init_app {
    ($ctx:expr) => {{
        let ctx: StartupContext = $ctx;
        test::init_service(
            App::new()
                .wrap(TrackingGate::new(64 * 1024))
                .configure(|cfg| configure_app(cfg, &ctx)),
        )
        .await
    }};
}

fn track_request(body: Value, ip: &str) -> actix_http::Request {
    TestRequest::post()
        .uri("/api/track")
        .insert_header(("x-forwarded-for", ip))
        .set_json(body)
        .to_request()
}

// =============================================================================
// POST /api/track
// =============================================================================

#[actix_rt::test]
async fn test_track_records_view() {
    let (ctx, _dir) = create_context(true).await;
    let storage = ctx.storage.clone();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, track_request(json!({"path": "hero"}), "203.0.113.1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Interaction tracked successfully"}));

    let events = storage.list_interactions().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].section, "Home");
    assert_eq!(events[0].ip, "203.0.113.1");
}

#[actix_rt::test]
async fn test_track_repeated_view_reports_already_tracked() {
    let (ctx, _dir) = create_context(true).await;
    let storage = ctx.storage.clone();
    let app = init_app!(ctx);

    let first = test::call_service(&app, track_request(json!({"path": "projects"}), "203.0.113.2")).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = test::call_service(&app, track_request(json!({"path": "projects"}), "203.0.113.2")).await;
    assert_eq!(second.status(), StatusCode::OK);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body, json!({"message": "View already tracked"}));

    assert_eq!(storage.list_interactions().await.unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_track_clicks_always_recorded() {
    let (ctx, _dir) = create_context(true).await;
    let storage = ctx.storage.clone();
    let app = init_app!(ctx);

    let click = json!({"path": "link_https://shop.vercel.app", "interactionType": "click"});
    for _ in 0..2 {
        let resp = test::call_service(&app, track_request(click.clone(), "203.0.113.3")).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let events = storage.list_interactions().await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].section, "Clicked: Project Demo");
}

#[actix_rt::test]
async fn test_track_without_path_is_no_content() {
    let (ctx, _dir) = create_context(true).await;
    let storage = ctx.storage.clone();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, track_request(json!({"interactionType": "view"}), "203.0.113.4")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let empty = TestRequest::post().uri("/api/track").to_request();
    let resp = test::call_service(&app, empty).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert!(storage.list_interactions().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_track_malformed_body_rejected() {
    let (ctx, _dir) = create_context(true).await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/track")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        track_request(json!({"path": "hero", "interactionType": "hover"}), "203.0.113.5"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn test_track_oversized_forwarded_address_truncated() {
    let (ctx, _dir) = create_context(true).await;
    let storage = ctx.storage.clone();
    let app = init_app!(ctx);

    let forged = "f".repeat(80);
    let resp = test::call_service(&app, track_request(json!({"path": "about"}), &forged)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let events = storage.list_interactions().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].ip, "f".repeat(64));

    // 截断后的地址仍参与去重
    let resp = test::call_service(&app, track_request(json!({"path": "about"}), &forged)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "View already tracked"}));
}

#[actix_rt::test]
async fn test_track_storage_failure_is_server_error() {
    let (ctx, _dir) = create_context(true).await;
    ctx.storage.close().await.unwrap();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, track_request(json!({"path": "hero"}), "203.0.113.6")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Failed to track interaction"}));
}

// =============================================================================
// POST /api/contact
// =============================================================================

#[actix_rt::test]
async fn test_contact_created() {
    let (ctx, _dir) = create_context(true).await;
    let contact_service = ctx.contact_service.clone();
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Grace",
            "email": "grace@example.com",
            "message": "Let's talk compilers."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Message sent successfully"}));

    let messages = contact_service.list_messages().await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].name, "Grace");
}

#[actix_rt::test]
async fn test_contact_validation_error() {
    let (ctx, _dir) = create_context(true).await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({"name": "Grace", "email": "not-an-address", "message": "hi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[actix_rt::test]
async fn test_contact_overlong_email_is_validation_error() {
    let (ctx, _dir) = create_context(true).await;
    let contact_service = ctx.contact_service.clone();
    let app = init_app!(ctx);

    let email = format!("{}@example.com", "g".repeat(318));
    let req = TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({"name": "Grace", "email": email, "message": "hi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("email"));

    assert!(contact_service.list_messages().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_contact_malformed_json_uses_error_body() {
    let (ctx, _dir) = create_context(true).await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/contact")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn test_contact_body_also_tracked_passively_only_outside_api() {
    let (ctx, _dir) = create_context(true).await;
    let storage = ctx.storage.clone();
    let app = init_app!(ctx);

    // /api/contact 不在被动追踪范围内，即使请求体带 path
    let req = TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Grace",
            "email": "grace@example.com",
            "message": "hi",
            "path": "contact"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    assert!(storage.list_interactions().await.unwrap().is_empty());
}

// =============================================================================
// /api/admin
// =============================================================================

async fn login_token<S, B>(app: &S) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let req = TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({"password": ADMIN_PASSWORD}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token in body").to_string()
}

#[actix_rt::test]
async fn test_admin_login_wrong_password() {
    let (ctx, _dir) = create_context(true).await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({"password": "nope"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Invalid password"}));
}

#[actix_rt::test]
async fn test_admin_lists_require_token() {
    let (ctx, _dir) = create_context(true).await;
    let app = init_app!(ctx);

    for uri in ["/api/admin/visitors", "/api/admin/messages"] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let req = TestRequest::get()
        .uri("/api/admin/visitors")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_admin_lists_with_token() {
    let (ctx, _dir) = create_context(true).await;
    let app = init_app!(ctx);

    test::call_service(&app, track_request(json!({"path": "hero"}), "198.51.100.10")).await;
    test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/contact")
            .set_json(json!({"name": "Ada", "email": "ada@example.com", "message": "hello"}))
            .to_request(),
    )
    .await;

    let token = login_token(&app).await;
    let auth = ("Authorization", format!("Bearer {}", token));

    let req = TestRequest::get()
        .uri("/api/admin/visitors")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let visitors: Value = test::read_body_json(resp).await;
    let visitors = visitors.as_array().expect("array of visitors");
    assert_eq!(visitors.len(), 1);
    assert_eq!(visitors[0]["section"], "Home");
    assert_eq!(visitors[0]["interactionType"], "view");
    assert!(visitors[0]["localTime"].is_string());

    let req = TestRequest::get()
        .uri("/api/admin/messages")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let messages: Value = test::read_body_json(resp).await;
    assert_eq!(messages.as_array().map(Vec::len), Some(1));
    assert_eq!(messages[0]["email"], "ada@example.com");
}

#[actix_rt::test]
async fn test_admin_disabled_returns_not_found() {
    let (ctx, _dir) = create_context(false).await;
    let app = init_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({"password": ADMIN_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, TestRequest::get().uri("/api/admin/visitors").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_admin_preflight_allowed_without_token() {
    let (ctx, _dir) = create_context(true).await;
    let app = init_app!(ctx);

    let req = TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/admin/visitors")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
