//! Free-text generation services: one LLM call each, no retries.

use crate::generation::prompts::{
    cover_letter_prompts, modify_cover_letter_prompts, polish_prompts, CoverLetterInput,
    ModifyCoverLetterInput, PolishInput,
};
use crate::lang::Lang;
use crate::llm_client::{LlmClient, LlmError, LlmOutput, TEMP_GENERATION};

pub async fn polish_project(
    llm: &LlmClient,
    input: &PolishInput<'_>,
    lang: Lang,
) -> Result<LlmOutput, LlmError> {
    let (system, user) = polish_prompts(input, lang);
    llm.chat(&system, &user, TEMP_GENERATION).await
}

pub async fn generate_cover_letter(
    llm: &LlmClient,
    input: &CoverLetterInput<'_>,
    lang: Lang,
) -> Result<LlmOutput, LlmError> {
    let (system, user) = cover_letter_prompts(input, lang);
    llm.chat(&system, &user, TEMP_GENERATION).await
}

pub async fn modify_cover_letter(
    llm: &LlmClient,
    input: &ModifyCoverLetterInput<'_>,
    lang: Lang,
) -> Result<LlmOutput, LlmError> {
    let (system, user) = modify_cover_letter_prompts(input, lang);
    llm.chat(&system, &user, TEMP_GENERATION).await
}
