use axum::{
    Json, Router,
    body::Body,
    extract::Extension,
    http::{Request, StatusCode, header},
    middleware,
    routing::{get, post},
};
use backoffice::middleware::{api_key, jwt, validate::SimpleValidatedJson};
use serde::Deserialize;
use shared::{
    config::{AdminClaims, JwtConfig, MemberClaims},
    domain::requests::Actor,
};
use std::sync::Arc;
use tower::ServiceExt;
use validator::Validate;

const ADMIN_SECRET: &str = "admin-secret";
const MEMBER_SECRET: &str = "member-secret";

fn jwt_config() -> Arc<JwtConfig> {
    Arc::new(JwtConfig::new(ADMIN_SECRET, MEMBER_SECRET))
}

fn exp() -> usize {
    (chrono::Utc::now().timestamp() + 3600) as usize
}

fn admin_token() -> String {
    jwt_config()
        .sign_admin(&AdminClaims {
            admin_id: Some(42),
            username: Some("cashier".into()),
            role: Some("admin".into()),
            exp: exp(),
        })
        .unwrap()
}

fn member_token(user_id: i64) -> String {
    jwt_config()
        .sign_member(&MemberClaims {
            user_id,
            exp: exp(),
        })
        .unwrap()
}

async fn whoami(Extension(actor): Extension<Actor>) -> String {
    format!("{}:{}", actor.id, actor.username)
}

async fn member_id(Extension(claims): Extension<MemberClaims>) -> String {
    claims.user_id.to_string()
}

fn admin_router() -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .layer(middleware::from_fn(jwt::admin_auth))
        .layer(Extension(jwt_config()))
}

fn member_router() -> Router {
    Router::new()
        .route("/me", get(member_id))
        .layer(middleware::from_fn(jwt::member_auth))
        .layer(Extension(jwt_config()))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn admin_token_exposes_actor() {
    let response = admin_router()
        .oneshot(
            Request::get("/whoami")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "42:cashier");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let response = admin_router()
        .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_string(response).await.contains("Unauthorized"));
}

#[tokio::test]
async fn member_token_is_rejected_on_admin_routes() {
    let response = admin_router()
        .oneshot(
            Request::get("/whoami")
                .header(header::AUTHORIZATION, format!("Bearer {}", member_token(5)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn member_token_exposes_user_id() {
    let response = member_router()
        .oneshot(
            Request::get("/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", member_token(5)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "5");
}

fn webhook_router() -> Router {
    Router::new()
        .route("/hook", post(|| async { "ok" }))
        .layer(middleware::from_fn(api_key::webhook_auth))
        .layer(Extension(Arc::new("gateway-key".to_string())))
}

#[tokio::test]
async fn webhook_accepts_matching_api_key() {
    let response = webhook_router()
        .oneshot(
            Request::post("/hook")
                .header("apiKey", "gateway-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn webhook_rejects_wrong_or_missing_key() {
    let wrong = webhook_router()
        .oneshot(
            Request::post("/hook")
                .header("x-api-key", "other")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let missing = webhook_router()
        .oneshot(Request::post("/hook").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
}

#[derive(Debug, Deserialize, Validate)]
struct Amount {
    #[validate(range(min = 1.0, message = "must be at least 1"))]
    amount: f64,
}

async fn echo_amount(SimpleValidatedJson(body): SimpleValidatedJson<Amount>) -> Json<f64> {
    Json(body.amount)
}

#[tokio::test]
async fn validated_json_reports_field_errors() {
    let router = Router::new().route("/amount", post(echo_amount));

    let response = router
        .clone()
        .oneshot(
            Request::post("/amount")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"amount": 0}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("amount: must be at least 1"), "{body}");

    let ok = router
        .oneshot(
            Request::post("/amount")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"amount": 12.5}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
}
