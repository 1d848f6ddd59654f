//! Structured extraction: module prompt → model call → parse → validate.

use serde_json::Value;

use crate::cv::models::{CompletenessCheck, CvModule, ModuleData};
use crate::cv::prompts::extraction_prompts;
use crate::cv::validation::check_completeness;
use crate::errors::AppError;
use crate::lang::Lang;
use crate::llm_client::{strip_json_fences, LlmClient, TEMP_EXTRACTION};

#[derive(Debug)]
pub struct ExtractionResult {
    pub data: ModuleData,
    pub completeness: CompletenessCheck,
    pub tokens_used: u32,
}

fn parse_failure(lang: Lang) -> AppError {
    AppError::ModelOutput(
        lang.pick(
            "Failed to parse the AI response as JSON. The AI may have returned an invalid format. Please try again.",
            "AI返回的内容无法解析为JSON格式，请重试。",
        )
        .to_string(),
    )
}

/// Runs the full extraction pipeline for one module.
///
/// The model is called at low temperature to bias toward deterministic
/// structure; the response is fence-stripped, parsed, minimally repaired and
/// validated. Validation itself always succeeds — incompleteness comes back
/// as data in the result.
pub async fn extract_module(
    llm: &LlmClient,
    module: CvModule,
    raw_text: &str,
    lang: Lang,
) -> Result<ExtractionResult, AppError> {
    let (system, user) = extraction_prompts(module, raw_text, lang);

    let output = llm.chat(&system, &user, TEMP_EXTRACTION).await?;

    let data = parse_module_payload(module, &output.content, lang)?;
    let completeness = check_completeness(&data, lang);

    Ok(ExtractionResult {
        data,
        completeness,
        tokens_used: output.tokens_used,
    })
}

/// Parses raw model output into the module's shape.
///
/// Exactly one repair is attempted: a list-shaped module that came back as a
/// bare JSON array is wrapped into `{ "items": [...] }` — a documented model
/// failure mode. Every other shape mismatch is surfaced as a parse failure
/// for the caller to retry, never silently coerced.
pub fn parse_module_payload(
    module: CvModule,
    model_output: &str,
    lang: Lang,
) -> Result<ModuleData, AppError> {
    let cleaned = strip_json_fences(model_output);

    let value: Value = serde_json::from_str(cleaned).map_err(|_| parse_failure(lang))?;

    let value = match value {
        Value::Array(entries) if module.is_list() => {
            serde_json::json!({ "items": entries })
        }
        other => other,
    };

    ModuleData::from_tagged(module, value).map_err(|_| parse_failure(lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json_object() {
        let out = r#"{"items": [{"degree": "BSc", "school": "CUHK", "major": "CS",
                       "period": "2019 - 2023", "location": "Hong Kong"}]}"#;
        let data = parse_module_payload(CvModule::Education, out, Lang::En).unwrap();
        assert!(check_completeness(&data, Lang::En).is_complete);
    }

    #[test]
    fn strips_markdown_fences_before_parsing() {
        let out = "```json\n{\"name\": \"Robert\", \"phone\": \"5950 4201\", \"email\": \"r@x.com\"}\n```";
        let data = parse_module_payload(CvModule::BasicInfo, out, Lang::En).unwrap();
        assert!(check_completeness(&data, Lang::En).is_complete);
    }

    #[test]
    fn wraps_bare_array_for_list_modules() {
        let out = r#"[{"title": "A Study", "authors": ["Jiang"], "year": "2023"}]"#;
        let data = parse_module_payload(CvModule::Publications, out, Lang::En).unwrap();
        match &data {
            ModuleData::Publications(p) => assert_eq!(p.items.len(), 1),
            other => panic!("wrong variant: {other:?}"),
        }
        assert!(check_completeness(&data, Lang::En).is_complete);
    }

    #[test]
    fn bare_array_is_not_wrapped_for_flat_modules() {
        let out = r#"[{"name": "Robert"}]"#;
        assert!(parse_module_payload(CvModule::BasicInfo, out, Lang::En).is_err());
    }

    #[test]
    fn invalid_json_reports_retryable_parse_failure() {
        let err = parse_module_payload(CvModule::Education, "not json at all", Lang::En)
            .unwrap_err();
        match err {
            AppError::ModelOutput(msg) => assert!(msg.contains("try again")),
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn type_mismatch_is_a_parse_failure_not_a_coercion() {
        let out = r#"{"items": "two degrees"}"#;
        assert!(parse_module_payload(CvModule::Education, out, Lang::En).is_err());
    }

    #[test]
    fn parse_failure_message_localizes() {
        let err = parse_module_payload(CvModule::Education, "{oops", Lang::Zh).unwrap_err();
        match err {
            AppError::ModelOutput(msg) => assert!(msg.contains("请重试")),
            other => panic!("wrong error: {other:?}"),
        }
    }

    /// Two entries separated by "---" in the source text come back from the
    /// model as two items; each is then required-field-validated on its own.
    #[test]
    fn two_entry_payload_validates_each_item_independently() {
        let out = r#"{"items": [
            {"degree": "BSc", "school": "CUHK", "major": "CS",
             "period": "2019 - 2023", "location": "Hong Kong"},
            {"degree": "MSc", "school": "HKUST", "major": "",
             "period": "2023 - 2025", "location": "Hong Kong"}
        ]}"#;
        let data = parse_module_payload(CvModule::Education, out, Lang::En).unwrap();
        match &data {
            ModuleData::Education(e) => assert_eq!(e.items.len(), 2),
            other => panic!("wrong variant: {other:?}"),
        }
        let check = check_completeness(&data, Lang::En);
        assert!(!check.is_complete);
        assert_eq!(check.missing_fields.len(), 1);
        assert_eq!(check.missing_fields[0].field, "items[1].major");
    }
}
