//! Axum route handlers for the outline and blog tools.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::writing::blog::{generate_blog, BlogBrief, BLOG_DOWNLOAD_NAME};
use crate::writing::outline::{draft_outline, revise_outline, write_meta_descriptions, OutlineDraft};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OutlineRequest {
    pub title: String,
    /// Comma- or line-separated, passed to the model as typed.
    pub keywords: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviseRequest {
    pub instruction: String,
}

#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    pub outline: String,
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub content: String,
    pub download_name: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/outline
///
/// Generates an outline plus meta descriptions and keeps the outline for revision.
///
/// The outline is stored as soon as it exists, so a failed meta call does not
/// cost the user the outline.
pub async fn handle_generate_outline(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<OutlineRequest>,
) -> Result<Json<OutlineDraft>, AppError> {
    if request.title.trim().is_empty() || request.keywords.trim().is_empty() {
        return Err(AppError::Validation(
            "title and keywords are both required".to_string(),
        ));
    }
    state.sessions.with_session(session_id, |_| ()).await?;

    let outline = draft_outline(&state.llm, &request.title, &request.keywords).await?;

    let stored = outline.clone();
    state
        .sessions
        .with_session(session_id, |ctx| ctx.outline = Some(stored))
        .await?;

    let meta = write_meta_descriptions(&state.llm, &request.title).await;

    Ok(Json(OutlineDraft::new(outline, meta)))
}

/// POST /api/v1/sessions/:id/outline/revise
///
/// Applies a free-text edit to the stored outline. On failure the stored
/// outline is left as it was.
pub async fn handle_revise_outline(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ReviseRequest>,
) -> Result<Json<OutlineResponse>, AppError> {
    if request.instruction.trim().is_empty() {
        return Err(AppError::Validation("instruction cannot be empty".to_string()));
    }

    let current = state
        .sessions
        .with_session(session_id, |ctx| ctx.outline.clone())
        .await?
        .ok_or_else(|| AppError::NotFound("No outline to revise; generate one first".to_string()))?;

    let outline = revise_outline(&state.llm, &current, &request.instruction).await?;

    let stored = outline.clone();
    state
        .sessions
        .with_session(session_id, |ctx| ctx.outline = Some(stored))
        .await?;

    Ok(Json(OutlineResponse { outline }))
}

/// POST /api/v1/sessions/:id/blog
pub async fn handle_generate_blog(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(brief): Json<BlogBrief>,
) -> Result<Json<BlogResponse>, AppError> {
    state.sessions.with_session(session_id, |_| ()).await?;

    let content = generate_blog(&state.llm, &brief).await?;

    let stored = content.clone();
    state
        .sessions
        .with_session(session_id, |ctx| ctx.last_blog = Some(stored))
        .await?;

    Ok(Json(BlogResponse {
        content,
        download_name: BLOG_DOWNLOAD_NAME,
    }))
}

/// GET /api/v1/sessions/:id/blog/download
///
/// The last generated blog as a plain-text attachment.
pub async fn handle_download_blog(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let content = state
        .sessions
        .with_session(session_id, |ctx| ctx.last_blog.clone())
        .await?
        .ok_or_else(|| AppError::NotFound("No blog generated in this session".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{BLOG_DOWNLOAD_NAME}\""),
            ),
        ],
        content,
    ))
}
