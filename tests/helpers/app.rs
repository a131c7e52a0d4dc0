use super::test_db::{setup_test_db, teardown_test_db, TestDatabase};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use maildeck::bootstrap::build_app_state_with_transport;
use maildeck::domain::ports::mail_transport::MailTransportFactory;
use maildeck::infrastructure::http::build_router;
use maildeck::infrastructure::providers::MockMailTransport;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub test_db: TestDatabase,
}

/// App wired to a mock transport; the returned handle shares its recorded state
pub async fn spawn_app() -> (TestApp, MockMailTransport) {
    let transport = MockMailTransport::new();
    let app = spawn_app_with(Arc::new(transport.clone())).await;
    (app, transport)
}

pub async fn spawn_app_with(transports: Arc<dyn MailTransportFactory>) -> TestApp {
    let test_db = setup_test_db().await;
    let state = build_app_state_with_transport(test_db.db().clone(), transports);
    TestApp {
        router: build_router(state),
        test_db,
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("Failed to build request"))
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn teardown(self) {
        teardown_test_db(self.test_db).await;
    }
}
