//! Axum route handlers for the clustering tool.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::keywords::models::{KeywordCandidate, SheetRow};
use crate::keywords::queue::QueueState;
use crate::keywords::ranking::{preview, rank_candidates, PREVIEW_ROWS};
use crate::sessions::ClusteringState;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

/// What the clustering tool shows: the live selection and where the queue stands.
#[derive(Debug, Serialize)]
pub struct ClusteringView {
    pub loaded: bool,
    pub selected: Vec<KeywordCandidate>,
    pub cursor: usize,
    pub total_candidates: usize,
    pub state: QueueState,
}

impl ClusteringView {
    fn of(clustering: &ClusteringState) -> Self {
        Self {
            loaded: clustering.loaded,
            selected: clustering.queue.selected().to_vec(),
            cursor: clustering.queue.cursor(),
            total_candidates: clustering.source.len(),
            state: clustering.queue.state(&clustering.source),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    /// Head of the raw worksheet, before filtering.
    pub preview: Vec<SheetRow>,
    #[serde(flatten)]
    pub view: ClusteringView,
}

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: KeywordCandidate,
    #[serde(flatten)]
    pub view: ClusteringView,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/clustering/load
///
/// Reads the worksheet, ranks it, and fills the session's queue from it.
/// A reload keeps the current selection and cursor.
pub async fn handle_load(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<LoadResponse>, AppError> {
    // Fail fast on unknown sessions before touching the network.
    state.sessions.with_session(session_id, |_| ()).await?;

    let table = state.keywords.fetch().await?;
    let ranked = rank_candidates(&table)?;
    info!(
        "Loaded {} candidates from {}",
        ranked.len(),
        state.keywords.describe()
    );

    let view = state
        .sessions
        .with_session(session_id, |ctx| {
            ctx.clustering.load(ranked);
            ClusteringView::of(&ctx.clustering)
        })
        .await?;

    Ok(Json(LoadResponse {
        preview: preview(&table, PREVIEW_ROWS),
        view,
    }))
}

/// GET /api/v1/sessions/:id/clustering
pub async fn handle_view(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ClusteringView>, AppError> {
    let view = state
        .sessions
        .with_session(session_id, |ctx| ClusteringView::of(&ctx.clustering))
        .await?;
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id/clustering/selected/:index
///
/// Drops one selected keyword; the queue backfills from the ranked list.
pub async fn handle_remove(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
) -> Result<Json<RemoveResponse>, AppError> {
    let (removed, view) = state
        .sessions
        .with_session(session_id, |ctx| {
            let clustering = &mut ctx.clustering;
            let removed = clustering.queue.remove(index, &clustering.source)?;
            Ok::<_, AppError>((removed, ClusteringView::of(clustering)))
        })
        .await??;

    info!("Session {session_id}: removed '{}'", removed.keyword);
    Ok(Json(RemoveResponse { removed, view }))
}

/// POST /api/v1/sessions/:id/clustering/reset
///
/// Empties the queue, rewinds the cursor, and refills from the loaded list.
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ClusteringView>, AppError> {
    let view = state
        .sessions
        .with_session(session_id, |ctx| {
            let clustering = &mut ctx.clustering;
            clustering.queue.reset();
            clustering.queue.fill(&clustering.source);
            ClusteringView::of(clustering)
        })
        .await?;
    Ok(Json(view))
}
