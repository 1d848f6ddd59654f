use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::account::repo::{self, UserStats};
use crate::auth::extractor::AuthUser;
use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::response::{ok, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: ProfileUser,
    pub stats: UserStats,
}

#[derive(Debug, Serialize)]
pub struct UpdateMeResponse {
    pub user: ProfileUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeRequest {
    pub username: Option<String>,
    /// Current password; required when `new_password` is set.
    pub password: Option<String>,
    pub new_password: Option<String>,
}

/// GET /user/me
pub async fn handle_get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<MeResponse>>, AppError> {
    let record = repo::find_by_id(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let stats = repo::get_stats(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User stats not found".to_string()))?;

    Ok(ok(MeResponse {
        user: ProfileUser {
            id: record.id,
            email: record.email,
            username: record.username,
            created_at: record.created_at,
        },
        stats,
    }))
}

/// PUT /user/me
pub async fn handle_update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<UpdateMeRequest>,
) -> Result<Json<ApiResponse<UpdateMeResponse>>, AppError> {
    if req.username.is_none() && req.password.is_none() && req.new_password.is_none() {
        return Err(AppError::Validation(
            "Please provide a field to update".to_string(),
        ));
    }

    if let Some(username) = &req.username {
        let len = username.chars().count();
        if !(2..=20).contains(&len) {
            return Err(AppError::Validation(
                "Username must be between 2 and 20 characters".to_string(),
            ));
        }
        if repo::username_exists_for_other_user(&state.db, username, user.id).await? {
            return Err(AppError::Validation(
                "This username is already taken".to_string(),
            ));
        }
    }

    let mut new_hash = None;
    if let Some(new_password) = &req.new_password {
        let current = req.password.as_deref().ok_or_else(|| {
            AppError::Validation("Please provide your current password".to_string())
        })?;

        if new_password.chars().count() < 6 {
            return Err(AppError::Validation(
                "New password must be at least 6 characters".to_string(),
            ));
        }

        let record = repo::find_by_id(&state.db, user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let with_hash = repo::find_by_email(&state.db, &record.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(current, &with_hash.password_hash)? {
            return Err(AppError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        new_hash = Some(hash_password(new_password)?);
    }

    let updated = repo::update_user(
        &state.db,
        user.id,
        req.username.as_deref(),
        new_hash.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(ok(UpdateMeResponse {
        user: ProfileUser {
            id: updated.id,
            email: updated.email,
            username: updated.username,
            created_at: updated.created_at,
        },
    }))
}
