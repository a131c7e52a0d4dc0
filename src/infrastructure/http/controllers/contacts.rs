use crate::{
    domain::entities::*,
    infrastructure::http::middleware::{ApiResult, AppState},
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

pub async fn save_contacts(
    State(state): State<AppState>,
    payload: Result<Json<SaveContactsRequest>, JsonRejection>,
) -> ApiResult<Json<SaveContactsResponse>> {
    let Json(request) = payload?;
    let response = state.contact_service.save_contacts(request).await?;
    Ok(Json(response))
}

pub async fn list_contact_lists(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ContactListSummary>>> {
    let lists = state.contact_service.list_summaries().await?;
    Ok(Json(lists))
}

pub async fn list_contacts(
    State(state): State<AppState>,
    query: Result<Query<ContactQuery>, QueryRejection>,
) -> ApiResult<Json<ContactListResponse>> {
    let Query(query) = query?;
    let response = state.contact_service.list_contacts(query).await?;
    Ok(Json(response))
}

pub async fn delete_contact_list(
    State(state): State<AppState>,
    Path(list_name): Path<String>,
) -> ApiResult<Json<DeleteListResponse>> {
    let response = state.contact_service.delete_list(&list_name).await?;
    Ok(Json(response))
}
