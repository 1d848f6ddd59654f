use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// A user row without the credential hash — the shape handed to handlers.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user row including the password hash, for login and password changes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CredentialRecord {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Usage counters, mutated best-effort after each generation call.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub projects_polished: i32,
    pub cvs_edited: i32,
    pub cover_letters_generated: i32,
    pub total_tokens_used: i64,
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<CredentialRecord>, sqlx::Error> {
    let user = sqlx::query_as::<_, CredentialRecord>(
        "SELECT id, email, username, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
    let user = sqlx::query_as::<_, UserRecord>(
        "SELECT id, email, username, created_at, updated_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn create_user(
    pool: &PgPool,
    email: &str,
    username: &str,
    password_hash: &str,
) -> Result<UserRecord, sqlx::Error> {
    let user = sqlx::query_as::<_, UserRecord>(
        "INSERT INTO users (email, username, password_hash) VALUES ($1, $2, $3) \
         RETURNING id, email, username, created_at, updated_at",
    )
    .bind(email)
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn username_exists_for_other_user(
    pool: &PgPool,
    username: &str,
    exclude_user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i32,)> =
        sqlx::query_as("SELECT 1 FROM users WHERE username = $1 AND id != $2")
            .bind(username)
            .bind(exclude_user_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

/// Updates username and/or password hash; absent fields are left untouched.
pub async fn update_user(
    pool: &PgPool,
    user_id: Uuid,
    username: Option<&str>,
    password_hash: Option<&str>,
) -> Result<Option<UserRecord>, sqlx::Error> {
    let user = sqlx::query_as::<_, UserRecord>(
        "UPDATE users SET \
             username = COALESCE($1, username), \
             password_hash = COALESCE($2, password_hash), \
             updated_at = CURRENT_TIMESTAMP \
         WHERE id = $3 \
         RETURNING id, email, username, created_at, updated_at",
    )
    .bind(username)
    .bind(password_hash)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn get_stats(pool: &PgPool, user_id: Uuid) -> Result<Option<UserStats>, sqlx::Error> {
    let stats = sqlx::query_as::<_, UserStats>(
        "SELECT projects_polished, cvs_edited, cover_letters_generated, total_tokens_used \
         FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(stats)
}

pub async fn increment_projects_polished(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET projects_polished = projects_polished + 1, \
         updated_at = CURRENT_TIMESTAMP WHERE id = $1",
    )
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn increment_cvs_edited(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET cvs_edited = cvs_edited + 1, \
         updated_at = CURRENT_TIMESTAMP WHERE id = $1",
    )
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn increment_cover_letters_generated(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET cover_letters_generated = cover_letters_generated + 1, \
         updated_at = CURRENT_TIMESTAMP WHERE id = $1",
    )
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn add_tokens_used(pool: &PgPool, user_id: Uuid, tokens: u32) -> Result<(), sqlx::Error> {
    if tokens == 0 {
        return Ok(());
    }
    sqlx::query(
        "UPDATE users SET total_tokens_used = total_tokens_used + $1, \
         updated_at = CURRENT_TIMESTAMP WHERE id = $2",
    )
    .bind(tokens as i64)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}
