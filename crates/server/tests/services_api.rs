use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use tower_http::cors::CorsLayer;

use server::{routes, state::ServerState};
use service::auth::repository::{mock::MockAuthRepository, AuthRepository};
use service::auth::service::{hash_password, AuthConfig, AuthService};
use service::auth::domain::LoginInput;
use service::orders::repository::mock::MockOrderStore;
use service::orders::ServiceOrderManager;

struct TestApp {
    app: Router,
    admin_token: String,
    clerk_token: String,
}

async fn test_app() -> TestApp {
    let auth_repo = Arc::new(MockAuthRepository::default());
    let auth = AuthService::new(auth_repo.clone(), AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1 });
    auth.ensure_admin("admin@shop.com", "Administrator", "Passw0rd!").await.unwrap();
    auth_repo
        .create_user("Clerk", "clerk@shop.com", hash_password("Employee1").unwrap(), false)
        .await
        .unwrap();

    let admin_token = auth
        .login(LoginInput { email: "admin@shop.com".into(), password: "Passw0rd!".into() })
        .await
        .unwrap()
        .token;
    let clerk_token = auth
        .login(LoginInput { email: "clerk@shop.com".into(), password: "Employee1".into() })
        .await
        .unwrap()
        .token;

    let orders = ServiceOrderManager::from_store(Arc::new(MockOrderStore::default()));
    let app = routes::build_router(ServerState::new(orders, auth), CorsLayer::very_permissive());
    TestApp { app, admin_token, clerk_token }
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header("authorization", format!("Bearer {}", t));
    }
    let req = match body {
        Some(b) => req.header("content-type", "application/json").body(Body::from(b.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

fn order_body() -> Value {
    json!({
        "clientName": "Maria",
        "description": "notebook repair",
        "items": [
            { "description": "Labor", "price": "100.00" },
            { "description": "Parts", "price": "50.00" }
        ]
    })
}

#[tokio::test]
async fn health_is_public() {
    let t = test_app().await;
    let (status, body) = send(&t.app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn login_returns_token_and_rejects_bad_password() {
    let t = test_app().await;
    let (status, body) = send(&t.app, "POST", "/login", None, Some(json!({"email": "admin@shop.com", "password": "Passw0rd!"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|s| !s.is_empty()));
    assert_eq!(body.as_object().map(|o| o.len()), Some(1));

    let (status, body) = send(&t.app, "POST", "/login", None, Some(json!({"email": "admin@shop.com", "password": "wrong-one"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn mutations_require_an_admin_token() {
    let t = test_app().await;
    let (status, _) = send(&t.app, "POST", "/services", None, Some(order_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&t.app, "POST", "/services", Some("not-a-jwt"), Some(order_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&t.app, "POST", "/services", Some(&t.clerk_token), Some(order_body())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    let (status, _) = send(&t.app, "GET", "/services", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn payment_flow_over_http() {
    let t = test_app().await;
    let token = Some(t.admin_token.as_str());

    let (status, created) = send(&t.app, "POST", "/services", token, Some(order_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["paymentStatus"], "PENDING");
    let id = created["id"].as_i64().unwrap();

    let (status, v) = send(&t.app, "PATCH", &format!("/services/{id}/pay"), token, Some(json!({"value": "50.00", "paymentTypeId": 1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["paymentStatus"], "PARTIAL");
    assert_eq!(v["totalPaid"], "50.00");
    assert_eq!(v["totalPrice"], "150.00");

    let (status, v) = send(&t.app, "PATCH", &format!("/services/{id}/pay"), token, Some(json!({"value": "100.00", "paymentTypeId": 2}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["paymentStatus"], "PAID");
    assert_eq!(v["paymentsHistory"].as_array().unwrap().len(), 2);
    assert_eq!(v["paymentsHistory"][1]["paidValue"], "100.00");

    let (status, err) = send(&t.app, "PATCH", &format!("/services/{id}/pay"), token, Some(json!({"value": "1.00", "paymentTypeId": 1}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"], "CONFLICT");
    assert_eq!(err["message"], "Service has already been paid.");

    let (status, v) = send(&t.app, "GET", &format!("/services/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["totalPaid"], "150.00");
}

#[tokio::test]
async fn overpayment_is_conflict() {
    let t = test_app().await;
    let token = Some(t.admin_token.as_str());
    let (_, created) = send(&t.app, "POST", "/services", token, Some(order_body())).await;
    let id = created["id"].as_i64().unwrap();

    let (status, err) = send(&t.app, "PATCH", &format!("/services/{id}/pay"), token, Some(json!({"value": 150.01, "paymentTypeId": 1}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["message"], "Value invalid.");
}

#[tokio::test]
async fn payment_input_errors_over_http() {
    let t = test_app().await;
    let token = Some(t.admin_token.as_str());
    let (_, created) = send(&t.app, "POST", "/services", token, Some(order_body())).await;
    let id = created["id"].as_i64().unwrap();

    let (status, err) = send(&t.app, "PATCH", &format!("/services/{id}/pay"), token, Some(json!({"value": "79228162514264337593543950335", "paymentTypeId": 1}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["message"], "Value invalid.");

    let (status, _) = send(&t.app, "PATCH", "/services/999/pay", token, Some(json!({"value": "0.001", "paymentTypeId": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, err) = send(&t.app, "PATCH", &format!("/services/{id}/pay"), token, Some(json!({"value": "0.001", "paymentTypeId": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn invalid_create_input_is_bad_request() {
    let t = test_app().await;
    let body = json!({ "clientName": "Maria", "items": [{ "description": "Labor", "price": "-5.00" }] });
    let (status, err) = send(&t.app, "POST", "/services", Some(&t.admin_token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn add_items_then_delete() {
    let t = test_app().await;
    let token = Some(t.admin_token.as_str());
    let (_, created) = send(&t.app, "POST", "/services", token, Some(json!({ "clientName": "Joao" }))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, v) = send(&t.app, "POST", &format!("/services/{id}/items"), token, Some(json!({ "items": [{ "description": "Cable", "price": "15.50" }] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["items"].as_array().unwrap().len(), 1);
    assert_eq!(v["totalPrice"], "15.50");

    let (status, _) = send(&t.app, "POST", "/services/999/items", token, Some(json!({ "items": [{ "description": "x", "price": "1.00" }] }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&t.app, "DELETE", &format!("/services/{id}"), token, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, err) = send(&t.app, "GET", &format!("/services/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["message"], "Service not found.");

    let (status, _) = send(&t.app, "DELETE", &format!("/services/{id}"), token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
