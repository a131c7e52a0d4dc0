use crate::{
    domain::entities::*,
    infrastructure::http::middleware::{ApiResult, AppState},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};

/// Run a campaign now, or acknowledge it when a schedule date is given
pub async fn send_campaign(
    State(state): State<AppState>,
    payload: Result<Json<SendCampaignRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload?;

    let response = match state.campaign_dispatcher.dispatch(request).await? {
        DispatchOutcome::Completed { list_name, report } => Json(CampaignSentResponse {
            message: format!("Campaign sent to {} of {} contacts", report.sent, report.attempted()),
            sent: report.sent,
            failed: report.failed,
            failed_emails: report.failed_emails,
            list_name,
        })
        .into_response(),
        DispatchOutcome::Scheduled {
            list_name,
            scheduled_for,
        } => Json(CampaignScheduledResponse {
            message: "Campaign scheduled successfully".to_string(),
            scheduled_for,
            list_name,
        })
        .into_response(),
    };

    Ok(response)
}
