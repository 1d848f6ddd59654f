use axum::{extract::Multipart, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::response::{ok, ApiResponse};
use crate::upload::extract::{extract_resume_text, file_extension};

/// Multipart field name the client uploads under.
const FILE_FIELD: &str = "resumeFile";

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub text: String,
    pub filename: String,
}

/// POST /resume/extract-text
///
/// Accepts a single multipart file (10 MB cap enforced by the route body
/// limit), extracts plain text from PDF or DOCX uploads.
pub async fn handle_extract_text(
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ExtractTextResponse>>, AppError> {
    let mut upload: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(ToString::to_string)
            .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((filename, data));
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    match file_extension(&filename).as_deref() {
        Some(".pdf") | Some(".docx") => {}
        Some(".doc") => {
            return Err(AppError::Validation(
                "DOC format is not supported. Please convert to DOCX or PDF.".to_string(),
            ))
        }
        _ => {
            return Err(AppError::Validation(
                "Invalid file type. Please upload a PDF or Word document.".to_string(),
            ))
        }
    }

    let text =
        extract_resume_text(&data, &filename).map_err(|e| AppError::Document(e.to_string()))?;

    Ok(ok(ExtractTextResponse { text, filename }))
}
