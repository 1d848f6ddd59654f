/// LLM client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: no other module may call the hosted model API
/// directly. All LLM interactions MUST go through this module.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
pub const DEFAULT_MODEL: &str = "qwen-plus";
const MAX_TOKENS: u32 = 4096;

/// Low temperature biases structured-extraction tasks toward deterministic JSON.
pub const TEMP_EXTRACTION: f32 = 0.3;
/// Higher temperature for free-text generation tasks.
pub const TEMP_GENERATION: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM API is not configured. Please set LLM_API_KEY in environment variables.")]
    NotConfigured,

    #[error("API Key is invalid or unauthorized. Please check your LLM_API_KEY.")]
    Unauthorized,

    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Network error. Please check your internet connection: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No response from LLM API")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Generated text plus the token usage the provider reported for the call.
#[derive(Debug, Clone)]
pub struct LlmOutput {
    pub content: String,
    pub tokens_used: u32,
}

/// Wraps an OpenAI-compatible chat-completions API. A call either succeeds
/// or the whole request fails: no retry, backoff, or circuit breaking —
/// re-submitting is left to the human user.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: Option<String>, base_url: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
            model,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes a single chat-completion call with a system and a user message.
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<LlmOutput, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let request_body = ChatRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Unauthorized,
                429 => LlmError::RateLimited,
                code => {
                    // Try to surface the provider's own error message.
                    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                        .map(|e| e.error.message)
                        .unwrap_or(body);
                    LlmError::Api {
                        status: code,
                        message,
                    }
                }
            });
        }

        let chat: ChatResponse = response.json().await?;

        let tokens_used = chat.usage.map(|u| u.total_tokens).unwrap_or(0);
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::EmptyContent)?;

        debug!(tokens_used, "LLM call succeeded");

        Ok(LlmOutput {
            content,
            tokens_used,
        })
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn unconfigured_client_fails_fast() {
        let client = LlmClient::new(None, DEFAULT_BASE_URL.into(), DEFAULT_MODEL.into());
        assert!(!client.is_configured());
        let err = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(client.chat("s", "u", TEMP_EXTRACTION))
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }
}
