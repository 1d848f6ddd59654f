use anyhow::Result;

/// Fixed bcrypt work factor, matching the deployment's interactive-login
/// latency budget.
const BCRYPT_COST: u32 = 10;

pub fn hash_password(plain: &str) -> Result<String> {
    Ok(bcrypt::hash(plain, BCRYPT_COST)?)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(plain, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("s3cret-enough").expect("hashing should succeed");
        assert!(verify_password("s3cret-enough", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse").expect("hashing should succeed");
        assert!(!verify_password("battery-staple", &hash).unwrap());
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
