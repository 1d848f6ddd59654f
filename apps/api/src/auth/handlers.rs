use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::account::repo;
use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::response::{ok, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub captcha_id: String,
    #[serde(default)]
    pub captcha_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub captcha_id: String,
    #[serde(default)]
    pub captcha_code: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

/// GET /auth/captcha
pub async fn handle_captcha(
    State(state): State<AppState>,
) -> Json<ApiResponse<serde_json::Value>> {
    let challenge = state.captcha.issue();
    ok(json!({
        "captchaId": challenge.id,
        "captchaSvg": challenge.svg,
    }))
}

/// POST /auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    if req.email.is_empty()
        || req.username.is_empty()
        || req.password.is_empty()
        || req.confirm_password.is_empty()
        || req.captcha_id.is_empty()
        || req.captcha_code.is_empty()
    {
        return Err(AppError::Validation(
            "Please fill in all required fields".to_string(),
        ));
    }

    if !is_valid_email(&req.email) {
        return Err(AppError::Validation(
            "Please provide a valid email address".to_string(),
        ));
    }

    let username_len = req.username.chars().count();
    if !(2..=20).contains(&username_len) {
        return Err(AppError::Validation(
            "Username must be between 2 and 20 characters".to_string(),
        ));
    }

    if req.password.chars().count() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if req.password != req.confirm_password {
        return Err(AppError::Validation(
            "The two passwords do not match".to_string(),
        ));
    }

    if !state.captcha.verify(&req.captcha_id, &req.captcha_code) {
        return Err(AppError::Validation(
            "Incorrect or expired captcha".to_string(),
        ));
    }

    if repo::email_exists(&state.db, &req.email).await? {
        return Err(AppError::Validation(
            "This email is already registered".to_string(),
        ));
    }

    if repo::username_exists(&state.db, &req.username).await? {
        return Err(AppError::Validation(
            "This username is already taken".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;
    // The check-then-insert is not atomic; the unique constraints on email
    // and username are the real guard against a concurrent duplicate.
    let user = repo::create_user(&state.db, &req.email, &req.username, &password_hash).await?;

    let token = state.session_keys.issue(user.id, &user.email)?;

    Ok(ok(SessionResponse {
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
            username: user.username,
        },
    }))
}

/// POST /auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    if req.email.is_empty()
        || req.password.is_empty()
        || req.captcha_id.is_empty()
        || req.captcha_code.is_empty()
    {
        return Err(AppError::Validation(
            "Please fill in all required fields".to_string(),
        ));
    }

    if !state.captcha.verify(&req.captcha_id, &req.captcha_code) {
        return Err(AppError::Validation(
            "Incorrect or expired captcha".to_string(),
        ));
    }

    // Unknown email and wrong password produce the same message.
    let user = repo::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Incorrect email or password".to_string()))?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Incorrect email or password".to_string(),
        ));
    }

    let token = state.session_keys.issue(user.id, &user.email)?;

    Ok(ok(SessionResponse {
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
            username: user.username,
        },
    }))
}

/// Minimal shape check: one `@`, non-empty local part, a dot in the domain.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !local.contains(char::is_whitespace)
                && domain.len() >= 3
                && !domain.contains(char::is_whitespace)
                && domain.split('.').count() >= 2
                && domain.split('.').all(|label| !label.is_empty())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("1155215100@link.cuhk.edu.hk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@exam ple.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("user@.com"));
    }
}
