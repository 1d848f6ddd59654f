//! Best-effort usage accounting.
//!
//! Counter updates are a billing/analytics side effect: a failure here is
//! logged and swallowed so it never fails the user-facing operation.

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::account::repo;

pub async fn record_project_polished(pool: &PgPool, user_id: Uuid, tokens: u32) {
    if let Err(e) = repo::increment_projects_polished(pool, user_id).await {
        warn!(%user_id, "failed to increment projects_polished: {e}");
    }
    record_tokens(pool, user_id, tokens).await;
}

pub async fn record_cv_edited(pool: &PgPool, user_id: Uuid, tokens: u32) {
    if let Err(e) = repo::increment_cvs_edited(pool, user_id).await {
        warn!(%user_id, "failed to increment cvs_edited: {e}");
    }
    record_tokens(pool, user_id, tokens).await;
}

pub async fn record_cover_letter_generated(pool: &PgPool, user_id: Uuid, tokens: u32) {
    if let Err(e) = repo::increment_cover_letters_generated(pool, user_id).await {
        warn!(%user_id, "failed to increment cover_letters_generated: {e}");
    }
    record_tokens(pool, user_id, tokens).await;
}

async fn record_tokens(pool: &PgPool, user_id: Uuid, tokens: u32) {
    if let Err(e) = repo::add_tokens_used(pool, user_id, tokens).await {
        warn!(%user_id, tokens, "failed to add tokens_used: {e}");
    }
}
