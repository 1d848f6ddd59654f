use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sessions are stateless: the signed token is the only record. Fixed
/// seven-day validity window.
const SESSION_TTL_DAYS: i64 = 7;

/// The self-contained session claim presented on every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// Signs and verifies session tokens. The server holds no session table;
/// verification failure of any kind collapses to "unauthenticated".
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String> {
        self.issue_with_ttl(user_id, email, chrono::Duration::days(SESSION_TTL_DAYS))
    }

    fn issue_with_ttl(&self, user_id: Uuid, email: &str, ttl: chrono::Duration) -> Result<String> {
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Returns the embedded claims, or `None` for expired, tampered or
    /// otherwise malformed tokens — callers never learn which.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify_roundtrip() {
        let keys = SessionKeys::new("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id, "user@example.com").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn expired_token_rejected() {
        let keys = SessionKeys::new("dev-secret");
        let token = keys
            .issue_with_ttl(
                Uuid::new_v4(),
                "user@example.com",
                chrono::Duration::seconds(-120),
            )
            .expect("sign");
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn tampered_token_rejected() {
        let keys = SessionKeys::new("dev-secret");
        let token = keys.issue(Uuid::new_v4(), "user@example.com").expect("sign");
        let mut tampered = token.clone();
        // Flip a character in the payload segment.
        let dot = tampered.find('.').unwrap() + 1;
        let replacement = if tampered.as_bytes()[dot] == b'A' { "B" } else { "A" };
        tampered.replace_range(dot..dot + 1, replacement);
        assert!(keys.verify(&tampered).is_none());
    }

    #[test]
    fn wrong_secret_rejected() {
        let keys = SessionKeys::new("dev-secret");
        let other = SessionKeys::new("another-secret");
        let token = keys.issue(Uuid::new_v4(), "user@example.com").expect("sign");
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn garbage_token_rejected() {
        let keys = SessionKeys::new("dev-secret");
        assert!(keys.verify("not-a-jwt").is_none());
    }
}
