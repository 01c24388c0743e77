use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use match_engine::AnalysisResult;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::reports::markdown::render_markdown;
use crate::reports::pdf::render_pdf;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MarkdownReportResponse {
    pub analysis_id: Uuid,
    pub markdown: String,
}

/// Unknown and malformed ids are both reported as not found.
fn find_analysis(state: &AppState, id: &str) -> Result<(Uuid, AnalysisResult), AppError> {
    let not_found = || AppError::NotFound("Analysis not found".to_string());
    let analysis_id = Uuid::parse_str(id).map_err(|_| not_found())?;
    let result = state.reports.get(&analysis_id).ok_or_else(not_found)?;
    Ok((analysis_id, result))
}

/// GET /api/report/:id/json
pub async fn handle_json_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResult>, AppError> {
    let (_, result) = find_analysis(&state, &id)?;
    Ok(Json(result))
}

/// GET /api/report/:id/markdown
pub async fn handle_markdown_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MarkdownReportResponse>, AppError> {
    let (analysis_id, result) = find_analysis(&state, &id)?;
    Ok(Json(MarkdownReportResponse {
        analysis_id,
        markdown: render_markdown(&result),
    }))
}

/// GET /api/report/:id/pdf
pub async fn handle_pdf_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (analysis_id, result) = find_analysis(&state, &id)?;

    let bytes = tokio::task::spawn_blocking(move || render_pdf(&result, analysis_id))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF report: {e}")))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF rendering failed: {e}")))?;

    tracing::debug!(%analysis_id, bytes = bytes.len(), "PDF report rendered");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"ats_report_{analysis_id}.pdf\""),
            ),
        ],
        bytes,
    ))
}
