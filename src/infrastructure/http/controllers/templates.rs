use crate::{
    domain::entities::*,
    infrastructure::http::middleware::{ApiResult, AppState},
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

pub async fn list_templates(
    State(state): State<AppState>,
    query: Result<Query<TemplateQuery>, QueryRejection>,
) -> ApiResult<Json<TemplateListResponse>> {
    let Query(query) = query?;
    let response = state.template_service.list_templates(query).await?;
    Ok(Json(response))
}

pub async fn create_template(
    State(state): State<AppState>,
    payload: Result<Json<TemplateInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Template>)> {
    let Json(input) = payload?;
    let template = state.template_service.create_template(input).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Template>> {
    let template = state.template_service.get_template(&id).await?;
    Ok(Json(template))
}

pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TemplateInput>, JsonRejection>,
) -> ApiResult<Json<Template>> {
    let Json(input) = payload?;
    let template = state.template_service.update_template(&id, input).await?;
    Ok(Json(template))
}

pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.template_service.delete_template(&id).await?;
    Ok(Json(json!({
        "message": "Template deleted successfully",
        "id": id,
    })))
}
