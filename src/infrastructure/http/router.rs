use crate::infrastructure::http::controllers::{contacts, emails, templates};
use crate::infrastructure::http::middleware::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Contact imports can be large; allow bodies up to 10 MiB
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        // Contacts
        .route("/contacts", get(contacts::list_contacts))
        .route("/contacts/save", post(contacts::save_contacts))
        .route("/contacts/lists", get(contacts::list_contact_lists))
        .route("/contacts/lists/:name", delete(contacts::delete_contact_list))
        // Campaigns
        .route("/emails/send", post(emails::send_campaign))
        // Templates
        .route(
            "/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/templates/:id",
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
