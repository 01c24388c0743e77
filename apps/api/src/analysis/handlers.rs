use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use match_engine::{AnalysisResult, Weights};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::run_analysis;
use crate::analysis::settings::AnalysisSettings;
use crate::errors::AppError;
use crate::extraction::{extract_text, ResumeFormat};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub result: AnalysisResult,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    pub jd_text: String,
    #[serde(default)]
    pub settings: Option<AnalysisSettings>,
}

#[derive(Debug, Serialize)]
pub struct WeightsResponse {
    pub weights: Weights,
}

#[derive(Debug, Serialize)]
pub struct SettingsSavedResponse {
    pub message: &'static str,
    pub settings: AnalysisSettings,
}

/// Fields of the multipart analyze form.
#[derive(Default)]
struct AnalyzeForm {
    jd_text: Option<String>,
    resume_text: Option<String>,
    resume_file: Option<(String, Bytes)>,
    settings: Option<String>,
}

impl AnalyzeForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = AnalyzeForm::default();
        while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "jd_text" => form.jd_text = Some(field.text().await.map_err(invalid_form)?),
                "resume_text" => form.resume_text = Some(field.text().await.map_err(invalid_form)?),
                "settings" => form.settings = Some(field.text().await.map_err(invalid_form)?),
                "resume_file" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(invalid_form)?;
                    form.resume_file = Some((filename, bytes));
                }
                other => tracing::debug!("Ignoring unexpected form field '{other}'"),
            }
        }
        Ok(form)
    }
}

fn invalid_form(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {e}"))
}

fn require_jd(jd_text: Option<String>) -> Result<String, AppError> {
    jd_text
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Job description is required".to_string()))
}

fn require_resume_text(resume_text: String) -> Result<String, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from resume file".to_string(),
        ));
    }
    Ok(resume_text)
}

async fn extract_resume_file(filename: String, bytes: Bytes) -> Result<String, AppError> {
    let format = ResumeFormat::from_filename(&filename)?;
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, format))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
        })??;
    tracing::info!(%filename, chars = text.len(), "Extracted resume text");
    Ok(text)
}

/// POST /api/analyze
/// Multipart form: `jd_text`, `resume_text` or `resume_file`, optional `settings` JSON.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = AnalyzeForm::read(multipart).await?;
    let jd_text = require_jd(form.jd_text)?;

    let resume_text = match (form.resume_text, form.resume_file) {
        (Some(text), _) if !text.is_empty() => text.trim().to_string(),
        (_, Some((filename, bytes))) => extract_resume_file(filename, bytes).await?,
        _ => {
            return Err(AppError::Validation(
                "Either resume_text or resume_file is required".to_string(),
            ))
        }
    };
    let resume_text = require_resume_text(resume_text)?;

    let config = AnalysisSettings::from_form_field(form.settings.as_deref())
        .into_config(state.config.default_strict_mode)?;

    let (analysis_id, result) = run_analysis(&state, resume_text, jd_text, config).await?;
    Ok(Json(AnalyzeResponse {
        analysis_id,
        result,
    }))
}

/// POST /api/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let jd_text = require_jd(Some(req.jd_text))?;
    if req.resume_text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is required".to_string()));
    }
    let config = req
        .settings
        .unwrap_or_default()
        .into_config(state.config.default_strict_mode)?;

    let resume_text = req.resume_text.trim().to_string();
    let (analysis_id, result) = run_analysis(&state, resume_text, jd_text, config).await?;
    Ok(Json(AnalyzeResponse {
        analysis_id,
        result,
    }))
}

/// GET /api/admin/weights
pub async fn handle_default_weights() -> Json<WeightsResponse> {
    Json(WeightsResponse {
        weights: Weights::default(),
    })
}

/// POST /api/admin/settings
/// Validates and echoes the settings; nothing is persisted.
pub async fn handle_save_settings(
    State(state): State<AppState>,
    Json(settings): Json<AnalysisSettings>,
) -> Result<Json<SettingsSavedResponse>, AppError> {
    settings
        .clone()
        .into_config(state.config.default_strict_mode)?;
    Ok(Json(SettingsSavedResponse {
        message: "Settings saved",
        settings,
    }))
}
