pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::account::handlers as account_handlers;
use crate::auth::handlers as auth_handlers;
use crate::cv::handlers as cv_handlers;
use crate::generation::handlers as generation_handlers;
use crate::state::AppState;
use crate::upload::handlers as upload_handlers;

/// Uploaded resume files are capped at 10 MB.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/auth/captcha", get(auth_handlers::handle_captcha))
        .route("/auth/register", post(auth_handlers::handle_register))
        .route("/auth/login", post(auth_handlers::handle_login))
        // User profile & usage stats
        .route(
            "/user/me",
            get(account_handlers::handle_get_me).put(account_handlers::handle_update_me),
        )
        // CV extraction, completeness and export
        .route(
            "/cv/extract-module",
            post(cv_handlers::handle_extract_module),
        )
        .route(
            "/cv/check-completeness",
            post(cv_handlers::handle_check_completeness),
        )
        .route("/cv/generate-word", post(cv_handlers::handle_generate_word))
        .route("/cv/generate-pdf", post(cv_handlers::handle_generate_pdf))
        .route("/cv/list", get(cv_handlers::handle_list))
        // Generation
        .route("/project/polish", post(generation_handlers::handle_polish))
        .route(
            "/cover-letter/generate",
            post(generation_handlers::handle_cover_letter_generate),
        )
        .route(
            "/cover-letter/modify",
            post(generation_handlers::handle_cover_letter_modify),
        )
        // Resume upload
        .route(
            "/resume/extract-text",
            post(upload_handlers::handle_extract_text)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(state)
}
