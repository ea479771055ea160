//! Integration tests for bearer tokens and role gates.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Json, Router};
use uuid::Uuid;

use userhub_api::router::gated;
use userhub_auth::jwt::JwtEncoder;
use userhub_auth::rbac::RoleSet;
use userhub_core::config::AuthConfig;
use userhub_core::types::AccountId;
use userhub_entity::account::Role;
use userhub_service::context::Identity;

use helpers::TestApp;

fn delete_path() -> String {
    format!("/delete/{}", Uuid::new_v4())
}

#[tokio::test]
async fn test_gate_rejects_missing_token() {
    let app = TestApp::new().await;

    let response = app.request("DELETE", &delete_path(), None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_gate_rejects_malformed_token() {
    let app = TestApp::new().await;

    let response = app
        .request("DELETE", &delete_path(), None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .method("DELETE")
        .uri(delete_path())
        .header("Authorization", "Basic YWxpY2U6cHcxMjM=")
        .body(Body::empty())
        .expect("Failed to build request");
    let basic = TestApp::send_to(app.router.clone(), req).await;
    assert_eq!(basic.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_rejects_expired_token() {
    let app = TestApp::new().await;
    let token = app.expired_token("admin");

    let response = app
        .request("DELETE", &delete_path(), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let message = response.body["message"].as_str().unwrap_or_default();
    assert!(message.to_lowercase().contains("expired"), "{message}");
}

#[tokio::test]
async fn test_gate_rejects_foreign_signature() {
    let app = TestApp::new().await;
    let foreign = JwtEncoder::new(&AuthConfig {
        jwt_secret: "some-other-deployment-secret".to_string(),
        ..app.config.auth.clone()
    });
    let token = foreign
        .issue(AccountId::new(), &Role::admin(), None)
        .expect("issue");

    let response = app
        .request("DELETE", &delete_path(), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_forbids_other_roles() {
    let app = TestApp::new().await;

    for role in ["user", "dev"] {
        let token = app.token_for(role);
        let response = app
            .request("DELETE", &delete_path(), None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "role {role}");
        assert_eq!(response.body["error"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_gate_forwards_admin() {
    let app = TestApp::new().await;
    let token = app.token_for("admin");

    // Reaching the handler is what turns an unknown id into 404.
    let response = app
        .request("DELETE", &delete_path(), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_token_cannot_delete_accounts() {
    let app = TestApp::new().await;
    let victim = app.register("victim", "pw", "north").await;
    let id = victim["id"].as_str().expect("id");

    let login = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "username": "victim", "password": "pw" })),
            None,
        )
        .await;
    let token = login.body["data"]["token"].as_str().expect("token");

    let response = app
        .request("DELETE", &format!("/delete/{id}"), None, Some(token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let still_there = app
        .request("GET", &format!("/users/{id}"), None, None)
        .await;
    assert_eq!(still_there.status, StatusCode::OK);
}

#[tokio::test]
async fn test_configured_list_gate() {
    let mut config = helpers::test_config();
    config.accounts.gates.list = vec!["admin".to_string(), "dev".to_string()];
    let app = TestApp::with_config(config).await;

    let anonymous = app.request("GET", "/users", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let user = app.token_for("user");
    let as_user = app.request("GET", "/users", None, Some(&user)).await;
    assert_eq!(as_user.status, StatusCode::FORBIDDEN);

    let dev = app.token_for("dev");
    let as_dev = app.request("GET", "/users", None, Some(&dev)).await;
    assert_eq!(as_dev.status, StatusCode::OK);

    // Registration and login stay public.
    app.register("open", "pw", "north").await;
}

#[tokio::test]
async fn test_public_update_gate() {
    let mut config = helpers::test_config();
    config.accounts.gates.update = Vec::new();
    let app = TestApp::with_config(config).await;
    let account = app.register("self", "pw", "north").await;
    let id = account["id"].as_str().expect("id");

    let response = app
        .request(
            "PUT",
            &format!("/update/{id}"),
            Some(serde_json::json!({ "region": "south" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["region"], "south");
}

async fn whoami(Extension(identity): Extension<Identity>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "role": identity.role.as_str() }))
}

#[tokio::test]
async fn test_stacked_gates_all_must_pass() {
    let app = TestApp::new().await;
    let decoder = app.state.jwt_decoder.clone();
    let admin_or_dev = RoleSet::from_names(&["admin", "dev"]).expect("roles");
    let admin_only = RoleSet::from_names(&["admin"]).expect("roles");

    let route = gated(
        gated(get(whoami), &admin_or_dev, &decoder),
        &admin_only,
        &decoder,
    );
    let router: Router = Router::new()
        .route("/both", route)
        .with_state(app.state.clone());

    let call = |token: String| {
        let router = router.clone();
        async move {
            let req = Request::builder()
                .uri("/both")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .expect("Failed to build request");
            TestApp::send_to(router, req).await
        }
    };

    let admin = call(app.token_for("admin")).await;
    assert_eq!(admin.status, StatusCode::OK);
    assert_eq!(admin.body["role"], "admin");

    let dev = call(app.token_for("dev")).await;
    assert_eq!(dev.status, StatusCode::FORBIDDEN);

    let user = call(app.token_for("user")).await;
    assert_eq!(user.status, StatusCode::FORBIDDEN);
}
