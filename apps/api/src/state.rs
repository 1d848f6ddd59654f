use sqlx::PgPool;

use crate::auth::captcha::CaptchaStore;
use crate::auth::tokens::SessionKeys;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// In-process single-use captcha challenges. Not shared across instances.
    pub captcha: CaptchaStore,
    pub session_keys: SessionKeys,
    pub config: Config,
}
