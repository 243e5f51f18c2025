#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use mailing_api::{build_router, ApiState};
use mailing_core::{
    mock::repositories::{MockClientRepo, MockMessageRepo, MockNotificationRepo, MockReferenceRepo},
    services::{client::ClientService, notification::NotificationService},
};
use serde_json::Value;
use tower::ServiceExt;

/// Repository mocks the router under test is wired to.
pub struct TestContext {
    pub client_repo: MockClientRepo,
    pub notification_repo: MockNotificationRepo,
    pub reference_repo: MockReferenceRepo,
    pub message_repo: MockMessageRepo,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            client_repo: MockClientRepo::new(),
            notification_repo: MockNotificationRepo::new(),
            reference_repo: MockReferenceRepo::new(),
            message_repo: MockMessageRepo::new(),
        }
    }

    pub fn into_router(self) -> Router {
        let state = ApiState::new(
            ClientService::new(Arc::new(self.client_repo)),
            NotificationService::new(
                Arc::new(self.notification_repo),
                Arc::new(self.reference_repo),
                Arc::new(self.message_repo),
            ),
        );
        build_router(Arc::new(state))
    }
}

/// Sends one request through the router and returns the status and the
/// decoded JSON body (`Value::Null` for empty bodies).
pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|value| value.to_string()).unwrap_or_default();
    send_raw(app, method, uri, &body).await
}

pub async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
