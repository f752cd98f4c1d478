//! End-to-end flow through the typed wrappers: login stores the session,
//! authenticated reads attach it, a 401 invalidates it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use findash_api::{AccountApi, DebugApi, UserApi};
use findash_client::{ClientConfig, Dispatcher, LogNotice, MemorySessionStore};
use findash_core::FindashError;

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn login(body: String) -> (StatusCode, Json<Value>) {
    let form: HashMap<String, String> = serde_urlencoded::from_str(&body).unwrap_or_default();
    match (form.get("username"), form.get("password")) {
        (Some(username), Some(password)) if password == "Hunter2!" => (
            StatusCode::OK,
            Json(json!({
                "access_token": format!("token-for-{}", username),
                "token_type": "bearer",
                "username": username,
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Incorrect username or password" })),
        ),
    }
}

async fn list_accounts(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match bearer_of(&headers) {
        Some(token) if token.starts_with("token-for-") => (
            StatusCode::OK,
            Json(json!([{
                "institution_code": "0004",
                "account_number": "1234567890123",
                "account_password_enc": "enc",
            }])),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Not authenticated" })),
        ),
    }
}

async fn sync_now(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match bearer_of(&headers) {
        Some(token) if token.starts_with("token-for-") => (
            StatusCode::ACCEPTED,
            Json(json!({
                "detail": "sync_transactions queued",
                "task_id": "9f1b2c3d-aaaa-bbbb-cccc-000000000000",
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Not authenticated" })),
        ),
    }
}

async fn serve() -> Result<SocketAddr> {
    let app = Router::new()
        .route("/api/user/login", post(login))
        .route("/api/account/list", get(list_accounts))
        .route("/api/debug/sync-now", post(sync_now));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(addr)
}

fn dispatcher(addr: SocketAddr) -> Arc<Dispatcher> {
    let config = ClientConfig::new(format!("http://{}", addr)).with_debug(false);
    Arc::new(Dispatcher::new(
        &config,
        Arc::new(MemorySessionStore::new()),
        Arc::new(LogNotice),
    ))
}

#[tokio::test]
async fn login_then_authenticated_read() -> Result<()> {
    let addr = serve().await?;
    let dispatcher = dispatcher(addr);
    let users = UserApi::new(dispatcher.clone());
    let accounts = AccountApi::new(dispatcher.clone());

    // anonymous read is rejected and leaves no session behind
    let err = accounts.list_accounts().await.unwrap_err();
    assert!(matches!(err, FindashError::Auth(_)));

    let token = users.login("alice", "Hunter2!").await?;
    assert_eq!(token.username, "alice");
    assert_eq!(
        dispatcher.session().get().unwrap().access_token,
        "token-for-alice"
    );

    let listed = accounts.list_accounts().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].account_number, "1234567890123");

    users.logout();
    assert!(dispatcher.session().get().is_none());
    Ok(())
}

#[tokio::test]
async fn debug_sync_queues_a_task_for_an_authenticated_user() -> Result<()> {
    let addr = serve().await?;
    let dispatcher = dispatcher(addr);
    let users = UserApi::new(dispatcher.clone());
    let debug = DebugApi::new(dispatcher.clone());

    let err = debug.sync_now().await.unwrap_err();
    assert!(matches!(err, FindashError::Auth(_)));

    users.login("carol", "Hunter2!").await?;
    let ack = debug.sync_now().await?;
    assert_eq!(ack["detail"], "sync_transactions queued");
    assert!(ack["task_id"].is_string());
    Ok(())
}

#[tokio::test]
async fn rejected_login_stores_no_session() -> Result<()> {
    let addr = serve().await?;
    let dispatcher = dispatcher(addr);
    let users = UserApi::new(dispatcher.clone());

    let err = users.login("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, FindashError::Api(_)));
    assert!(dispatcher.session().get().is_none());
    Ok(())
}

#[tokio::test]
async fn expired_token_is_invalidated_by_the_dispatcher() -> Result<()> {
    let addr = serve().await?;
    let dispatcher = dispatcher(addr);
    let users = UserApi::new(dispatcher.clone());
    let accounts = AccountApi::new(dispatcher.clone());

    users.login("bob", "Hunter2!").await?;
    dispatcher
        .session()
        .set(findash_core::Session::new("expired", "bob"));

    let err = accounts.list_accounts().await.unwrap_err();
    assert!(matches!(err, FindashError::Auth(_)));
    // the dispatcher's unauthorized branch cleared the stale session
    assert!(dispatcher.session().get().is_none());
    Ok(())
}
