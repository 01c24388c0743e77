pub mod handlers;
pub mod settings;

use match_engine::{AnalysisConfig, AnalysisResult, ScoringEngine};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Scores `resume_text` against `jd_text` on the blocking pool and caches the
/// result for the report endpoints.
pub async fn run_analysis(
    state: &AppState,
    resume_text: String,
    jd_text: String,
    config: AnalysisConfig,
) -> Result<(Uuid, AnalysisResult), AppError> {
    let result = tokio::task::spawn_blocking(move || {
        ScoringEngine::new(config).analyze(&resume_text, &jd_text)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}")))?;

    let analysis_id = state.reports.insert(result.clone());
    tracing::info!(
        %analysis_id,
        overall_score = result.overall_score,
        label = %result.label,
        cached = state.reports.len(),
        "Analysis stored"
    );

    Ok((analysis_id, result))
}
