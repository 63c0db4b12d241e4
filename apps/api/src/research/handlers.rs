use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::research::dispatcher::WorkflowReply;
use crate::state::AppState;

/// Both fields are free text and forwarded as typed, empty included.
#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub message: &'static str,
    pub reply: WorkflowReply,
}

/// POST /api/v1/keyword-research
pub async fn handle_keyword_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>, AppError> {
    let reply = state
        .dispatcher
        .dispatch(&request.keyword, &request.country)
        .await?;

    Ok(Json(ResearchResponse {
        message: "Data sent successfully to research workflow",
        reply,
    }))
}
