use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
#[cfg(test)]
use argon2::password_hash::{PasswordHash, PasswordVerifier};

use crate::error::{CatalogError, CatalogResult};

/// Argon2id hash in PHC string form
pub fn hash_password(password: &str) -> CatalogResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CatalogError::PasswordHash(e.to_string()))
}

#[cfg(test)]
pub(crate) fn verify_password(password: &str, hash: &str) -> CatalogResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| CatalogError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_roundtrip() {
        let hash = hash_password("catalog-123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("catalog-123", &hash).unwrap());
        assert!(!verify_password("catalog-124", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("x", "not-a-hash").is_err());
    }
}
