use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Argon2id with the crate's default parameters; the digest carries its salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` on mismatch, `Err` only when the stored digest is malformed.
/// bcrypt digests (`$2a$`, `$2b$`, `$2y$`) from the legacy user table are still accepted.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    if hash.starts_with("$2") {
        return bcrypt::verify(plain, hash).map_err(|e| {
            error!(error = %e, "bcrypt verify error");
            anyhow::anyhow!(e.to_string())
        });
    }
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Runs [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain)).await?
}

/// Runs [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_digests_are_salted_argon2id() {
        let a = hash_password("p1").unwrap();
        let b = hash_password("p1").unwrap();
        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, b);
        assert!(verify_password("p1", &a).unwrap());
        assert!(verify_password("p1", &b).unwrap());
        assert!(!verify_password("p2", &a).unwrap());
    }

    #[test]
    fn empty_password_is_hashable() {
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash).unwrap());
        assert!(!verify_password(" ", &hash).unwrap());
    }

    #[test]
    fn legacy_bcrypt_digests_verify() {
        let legacy = bcrypt::hash("p1", 4).unwrap();
        assert!(verify_password("p1", &legacy).unwrap());
        assert!(!verify_password("p2", &legacy).unwrap());
    }

    #[test]
    fn unparseable_digests_are_errors_not_mismatches() {
        assert!(verify_password("p1", "plaintext-from-an-old-dump").is_err());
        assert!(verify_password("p1", "$2b$10$short").is_err());
    }

    #[tokio::test]
    async fn blocking_wrappers_agree() {
        let hash = hash_password_blocking("s3cret".into()).await.unwrap();
        assert!(verify_password_blocking("s3cret".into(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_blocking("nope".into(), hash).await.unwrap());
    }
}
