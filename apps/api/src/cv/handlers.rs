use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::account::usage;
use crate::auth::extractor::AuthUser;
use crate::cv::extraction::extract_module;
use crate::cv::models::{CompletenessCheck, CvModule, ModuleData};
use crate::cv::validation::check_completeness;
use crate::errors::AppError;
use crate::export::layout::layout_modules;
use crate::export::pdf::render_pdf;
use crate::export::word::render_docx;
use crate::lang::Lang;
use crate::response::{ok, ApiResponse};
use crate::state::AppState;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractModuleRequest {
    pub module_type: CvModule,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub language: Lang,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractModuleResponse {
    pub data: ModuleData,
    pub completeness: CompletenessCheck,
    pub tokens_used: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckCompletenessRequest {
    pub module_type: CvModule,
    pub data: serde_json::Value,
    #[serde(default)]
    pub language: Lang,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckCompletenessResponse {
    pub completeness: CompletenessCheck,
    pub tokens_used: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentRequest {
    /// Module data keyed by tag; basic info renders first, the rest follow
    /// in tag order.
    #[serde(default)]
    pub modules: BTreeMap<CvModule, serde_json::Value>,
    #[serde(default)]
    pub language: Lang,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResume {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// POST /cv/extract-module
pub async fn handle_extract_module(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ExtractModuleRequest>,
) -> Result<Json<ApiResponse<ExtractModuleResponse>>, AppError> {
    if req.raw_text.trim().is_empty() {
        return Err(AppError::Validation("Raw text is required".to_string()));
    }

    if state.config.is_development() {
        tracing::debug!(
            module = ?req.module_type,
            text_len = req.raw_text.len(),
            "extract-module request"
        );
    }

    let result = extract_module(&state.llm, req.module_type, &req.raw_text, req.language).await?;

    usage::record_cv_edited(&state.db, user.id, result.tokens_used).await;

    Ok(ok(ExtractModuleResponse {
        data: result.data,
        completeness: result.completeness,
        tokens_used: result.tokens_used,
    }))
}

/// POST /cv/check-completeness
///
/// Purely programmatic: no model call, zero tokens.
pub async fn handle_check_completeness(
    _user: AuthUser,
    Json(req): Json<CheckCompletenessRequest>,
) -> Result<Json<ApiResponse<CheckCompletenessResponse>>, AppError> {
    let data = ModuleData::from_tagged(req.module_type, req.data).map_err(|_| {
        AppError::Validation("Module data does not match its declared type".to_string())
    })?;

    Ok(ok(CheckCompletenessResponse {
        completeness: check_completeness(&data, req.language),
        tokens_used: 0,
    }))
}

/// POST /cv/generate-word
pub async fn handle_generate_word(
    user: AuthUser,
    Json(req): Json<GenerateDocumentRequest>,
) -> Result<Response, AppError> {
    let modules = assemble_modules(req.modules)?;
    let blocks = layout_modules(&modules, req.language);
    let bytes = render_docx(&blocks).map_err(|e| AppError::Document(e.to_string()))?;

    tracing::info!(user_id = %user.id, modules = modules.len(), "generated Word CV");

    Ok(attachment(bytes, DOCX_CONTENT_TYPE, "cv.docx"))
}

/// POST /cv/generate-pdf
pub async fn handle_generate_pdf(
    user: AuthUser,
    Json(req): Json<GenerateDocumentRequest>,
) -> Result<Response, AppError> {
    let modules = assemble_modules(req.modules)?;
    let blocks = layout_modules(&modules, req.language);
    let bytes = render_pdf(&blocks).map_err(|e| AppError::Document(e.to_string()))?;

    tracing::info!(user_id = %user.id, modules = modules.len(), "generated PDF CV");

    Ok(attachment(bytes, PDF_CONTENT_TYPE, "cv.pdf"))
}

/// GET /cv/list
///
/// Saved-resume persistence is outside this system's visible scope, so the
/// listing is always empty.
pub async fn handle_list(
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<SavedResume>>>, AppError> {
    Ok(ok(Vec::new()))
}

fn assemble_modules(
    map: BTreeMap<CvModule, serde_json::Value>,
) -> Result<Vec<(CvModule, ModuleData)>, AppError> {
    map.into_iter()
        .map(|(module, value)| {
            ModuleData::from_tagged(module, value)
                .map(|data| (module, data))
                .map_err(|_| {
                    AppError::Validation(format!(
                        "Module data for {module:?} does not match its declared type"
                    ))
                })
        })
        .collect()
}

fn attachment(bytes: Vec<u8>, content_type: &'static str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assemble_orders_basic_info_first() {
        let mut map = BTreeMap::new();
        map.insert(
            CvModule::Skills,
            json!({"languages": "English", "skills": "Rust", "interests": "Hiking"}),
        );
        map.insert(
            CvModule::BasicInfo,
            json!({"name": "Robert", "phone": "5950 4201", "email": "r@x.com"}),
        );
        let modules = assemble_modules(map).unwrap();
        assert_eq!(modules[0].0, CvModule::BasicInfo);
        assert_eq!(modules[1].0, CvModule::Skills);
    }

    #[test]
    fn assemble_rejects_shape_mismatch() {
        let mut map = BTreeMap::new();
        map.insert(CvModule::Education, json!({"items": "not-a-list"}));
        assert!(assemble_modules(map).is_err());
    }

    #[test]
    fn module_map_keys_deserialize_from_tags() {
        let req: GenerateDocumentRequest = serde_json::from_value(json!({
            "modules": {
                "basicInfo": {"name": "Robert", "phone": "1", "email": "r@x.com"},
                "education": {"items": []}
            },
            "language": "en"
        }))
        .unwrap();
        assert_eq!(req.modules.len(), 2);
        assert!(req.modules.contains_key(&CvModule::BasicInfo));
    }
}
