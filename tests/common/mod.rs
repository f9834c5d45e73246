#![allow(dead_code)]

use async_graphql::{Request, Response, Variables};
use message_board::api::RequestContext;
use message_board::common::axum_ip::IpAddrInfo;
use message_board::common::init;
use message_board::common::state::AppState;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::Ipv4Addr;

/// A private in-memory database. One connection, never recycled, so every
/// query sees the same store.
pub async fn test_state() -> AppState {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    init::run_migrations(&db).await.expect("run migrations");
    AppState::new(db)
}

pub fn request_context(state: &AppState) -> RequestContext {
    RequestContext {
        db: state.db.clone(),
        request_ip: IpAddrInfo {
            ip_addr: Ipv4Addr::LOCALHOST.into(),
        },
        user_agent: Some("message-board-tests".to_owned()),
    }
}

pub async fn execute(state: &AppState, query: &str, variables: Value) -> Response {
    let request = Request::new(query)
        .variables(Variables::from_json(variables))
        .data(request_context(state));
    state.schema.execute(request).await
}

/// Runs `query` and returns `data` as JSON, panicking on GraphQL errors.
pub async fn execute_ok(state: &AppState, query: &str, variables: Value) -> Value {
    let response = execute(state, query, variables).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().expect("data is valid json")
}

/// Runs `query`, expects exactly one error, and returns its message and code.
pub async fn execute_err(state: &AppState, query: &str, variables: Value) -> (String, Value) {
    let response = execute(state, query, variables).await;
    assert_eq!(response.errors.len(), 1, "{:?}", response.errors);
    let error = serde_json::to_value(&response.errors[0]).expect("error serializes");
    let message = error["message"].as_str().unwrap_or_default().to_owned();
    (message, error["extensions"]["code"].clone())
}
