mod helpers;

use axum::http::StatusCode;
use helpers::*;
use maildeck::config::SmtpSettings;
use maildeck::infrastructure::providers::{MockMailTransport, SmtpTransportFactory};
use serde_json::json;
use std::sync::Arc;

async fn seed_list(app: &TestApp) {
    let (status, _) = app
        .post(
            "/contacts/save",
            json!({
                "listName": "A",
                "contacts": [
                    { "name": "Ada", "email": "ada@example.com", "company": "Engines" },
                    { "name": "", "email": "bounce@example.com", "company": "" }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_send_isolates_recipient_failures() {
    let transport = MockMailTransport::new().failing_for("bounce@example.com");
    let app = spawn_app_with(Arc::new(transport.clone())).await;
    seed_list(&app).await;

    let (status, body) = app
        .post(
            "/emails/send",
            json!({ "listName": "A", "subject": "Hi {{name}}", "templateId": "welcome" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sent"], 1);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["listName"], "A");
    assert_eq!(body["failedEmails"][0]["email"], "bounce@example.com");

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Hi Ada");
    assert!(sent[0].html_body.contains("Engines"));

    app.teardown().await;
}

#[tokio::test]
async fn test_send_rejects_empty_list_and_unknown_template() {
    let (app, transport) = spawn_app().await;
    seed_list(&app).await;

    let (status, body) = app
        .post(
            "/emails/send",
            json!({ "listName": "Nobody", "subject": "Hi", "templateId": "welcome" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Nobody"));

    let (status, _) = app
        .post(
            "/emails/send",
            json!({ "listName": "A", "subject": "Hi", "templateId": "does-not-exist" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(transport.connections(), 0);

    app.teardown().await;
}

#[tokio::test]
async fn test_send_reports_missing_fields() {
    let (app, _) = spawn_app().await;

    let (status, body) = app.post("/emails/send", json!({ "listName": "A" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        json!(["subject is required", "templateId is required"])
    );

    app.teardown().await;
}

#[tokio::test]
async fn test_scheduled_send_is_acknowledged_only() {
    let (app, transport) = spawn_app().await;
    seed_list(&app).await;

    let (status, body) = app
        .post(
            "/emails/send",
            json!({
                "listName": "A",
                "subject": "Later",
                "templateId": "newsletter",
                "scheduleDate": "2030-01-01T10:00:00Z"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scheduledFor"], "2030-01-01T10:00:00+00:00");
    assert!(body.get("sent").is_none());
    assert_eq!(transport.send_attempts(), 0);

    app.teardown().await;
}

#[tokio::test]
async fn test_missing_smtp_configuration_is_server_error() {
    let settings = SmtpSettings {
        host: None,
        port: 587,
        username: None,
        password: None,
        from_email: None,
        from_name: "Maildeck".into(),
        use_tls: true,
    };
    let app = spawn_app_with(Arc::new(SmtpTransportFactory::new(settings))).await;
    seed_list(&app).await;

    let (status, body) = app
        .post(
            "/emails/send",
            json!({ "listName": "A", "subject": "Hi", "templateId": "welcome" }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Email configuration missing"));

    app.teardown().await;
}

#[tokio::test]
async fn test_unverifiable_transport_aborts_dispatch() {
    let transport = MockMailTransport::new_unverifiable();
    let app = spawn_app_with(Arc::new(transport.clone())).await;
    seed_list(&app).await;

    let (status, _) = app
        .post(
            "/emails/send",
            json!({ "listName": "A", "subject": "Hi", "templateId": "welcome" }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(transport.send_attempts(), 0);

    app.teardown().await;
}

#[tokio::test]
async fn test_stored_template_is_rendered_and_usage_counted() {
    let (app, transport) = spawn_app().await;
    seed_list(&app).await;

    let (_, created) = app
        .post(
            "/templates",
            json!({
                "name": "Stored",
                "blocks": [
                    { "type": "heading", "content": { "text": "Dear {{name}}" } },
                    { "type": "text", "content": { "text": "Greetings from {{company}}" } }
                ]
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/emails/send",
            json!({ "listName": "A", "subject": "News", "templateId": id.as_str() }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sent"], 2);

    let mut bodies: Vec<_> = transport.sent().into_iter().map(|m| m.html_body).collect();
    bodies.sort();
    assert!(bodies.iter().any(|b| b.contains("Dear Ada") && b.contains("Greetings from Engines")));
    assert!(bodies
        .iter()
        .any(|b| b.contains("Dear User") && b.contains("Greetings from Our Company")));

    let (_, fetched) = app.get(&format!("/templates/{}", id)).await;
    assert_eq!(fetched["metadata"]["usageCount"], 1);

    app.teardown().await;
}
