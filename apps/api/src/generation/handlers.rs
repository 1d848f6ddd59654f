use axum::{extract::State, Json};
use serde::Deserialize;

use crate::account::usage;
use crate::auth::extractor::AuthUser;
use crate::errors::AppError;
use crate::generation::prompts::{CoverLetterInput, ModifyCoverLetterInput, PolishInput};
use crate::generation::service;
use crate::lang::Lang;
use crate::response::{ok, ApiResponse};
use crate::state::AppState;

const DEFAULT_BULLET_POINTS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum PolishMode {
    #[default]
    #[serde(rename = "without-job")]
    WithoutJob,
    #[serde(rename = "with-job")]
    WithJob,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishRequest {
    #[serde(default)]
    pub mode: PolishMode,
    #[serde(default)]
    pub output_language: Lang,
    pub bullet_points: Option<u8>,
    #[serde(default)]
    pub project_description: String,
    pub target_job_description: Option<String>,
    pub special_requirements: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub job_description: String,
    pub resume_content: Option<String>,
    #[serde(default)]
    pub language: Lang,
    pub special_requirements: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyCoverLetterRequest {
    #[serde(default)]
    pub job_description: String,
    pub resume_content: Option<String>,
    #[serde(default)]
    pub current_cover_letter: String,
    #[serde(default)]
    pub modification_requirement: String,
    #[serde(default)]
    pub language: Lang,
}

/// POST /project/polish
pub async fn handle_polish(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<PolishRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    if req.project_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Project description is required".to_string(),
        ));
    }

    if req.mode == PolishMode::WithJob
        && req
            .target_job_description
            .as_deref()
            .map_or(true, |jd| jd.trim().is_empty())
    {
        return Err(AppError::Validation(
            "Target job description is required for \"with-job\" mode".to_string(),
        ));
    }

    let bullet_points = req.bullet_points.unwrap_or(DEFAULT_BULLET_POINTS);
    if !(2..=5).contains(&bullet_points) {
        return Err(AppError::Validation(
            "Bullet points must be between 2 and 5".to_string(),
        ));
    }

    let input = PolishInput {
        description: &req.project_description,
        target_job_description: match req.mode {
            PolishMode::WithJob => req.target_job_description.as_deref(),
            PolishMode::WithoutJob => None,
        },
        bullet_points,
        special_requirements: req.special_requirements.as_deref(),
    };

    let result = service::polish_project(&state.llm, &input, req.output_language).await?;

    usage::record_project_polished(&state.db, user.id, result.tokens_used).await;

    Ok(ok(result.content))
}

/// POST /cover-letter/generate
pub async fn handle_cover_letter_generate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CoverLetterRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description is required".to_string(),
        ));
    }

    let resume_content = req
        .resume_content
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Resume content is required".to_string()))?;

    let input = CoverLetterInput {
        job_description: req.job_description.trim(),
        resume_content,
        special_requirements: req.special_requirements.as_deref(),
    };

    let result = service::generate_cover_letter(&state.llm, &input, req.language).await?;

    usage::record_cover_letter_generated(&state.db, user.id, result.tokens_used).await;

    Ok(ok(result.content))
}

/// POST /cover-letter/modify
///
/// A modification counts as a generation for usage stats.
pub async fn handle_cover_letter_modify(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ModifyCoverLetterRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description is required".to_string(),
        ));
    }
    if req.current_cover_letter.trim().is_empty() {
        return Err(AppError::Validation(
            "Current cover letter is required".to_string(),
        ));
    }
    if req.modification_requirement.trim().is_empty() {
        return Err(AppError::Validation(
            "Modification requirement is required".to_string(),
        ));
    }

    let resume_content = req
        .resume_content
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Resume content is required".to_string()))?;

    let input = ModifyCoverLetterInput {
        job_description: req.job_description.trim(),
        resume_content,
        current_cover_letter: req.current_cover_letter.trim(),
        modification_requirement: req.modification_requirement.trim(),
    };

    let result = service::modify_cover_letter(&state.llm, &input, req.language).await?;

    usage::record_cover_letter_generated(&state.db, user.id, result.tokens_used).await;

    Ok(ok(result.content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polish_mode_deserializes_kebab_case() {
        assert_eq!(
            serde_json::from_str::<PolishMode>("\"with-job\"").unwrap(),
            PolishMode::WithJob
        );
        assert_eq!(
            serde_json::from_str::<PolishMode>("\"without-job\"").unwrap(),
            PolishMode::WithoutJob
        );
    }

    #[test]
    fn polish_request_defaults() {
        let req: PolishRequest =
            serde_json::from_str("{\"projectDescription\": \"Built a parser\"}").unwrap();
        assert_eq!(req.mode, PolishMode::WithoutJob);
        assert_eq!(req.output_language, Lang::En);
        assert!(req.bullet_points.is_none());
    }
}
