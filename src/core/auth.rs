//! Admin gate: one shared credential, compared by SHA-256 digest so the
//! plaintext never has to live in the config file.

use crate::errors::{AppError, AppResult};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredential {
    digest: Option<[u8; 32]>,
}

impl AdminCredential {
    pub fn from_plaintext(password: &str) -> Self {
        Self {
            digest: Some(Sha256::digest(password.as_bytes()).into()),
        }
    }

    pub fn from_sha256_hex(digest_hex: &str) -> AppResult<Self> {
        let bytes = hex::decode(digest_hex.trim())
            .map_err(|e| AppError::Config(format!("admin_password_sha256 is not valid hex: {e}")))?;
        let digest = <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
            AppError::Config("admin_password_sha256 must be 64 hex characters".into())
        })?;

        Ok(Self {
            digest: Some(digest),
        })
    }

    /// No credential configured: every attempt is rejected.
    pub fn disabled() -> Self {
        Self { digest: None }
    }

    pub fn is_configured(&self) -> bool {
        self.digest.is_some()
    }

    pub fn verify(&self, password: &str) -> bool {
        match &self.digest {
            Some(expected) => {
                let got: [u8; 32] = Sha256::digest(password.as_bytes()).into();
                got == *expected
            }
            None => false,
        }
    }
}

/// Lowercase hex SHA-256, the format stored in `admin_password_sha256`.
pub fn sha256_hex(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_and_hex_forms_agree() {
        let a = AdminCredential::from_plaintext("net@2025");
        let b = AdminCredential::from_sha256_hex(&sha256_hex("net@2025")).unwrap();
        assert_eq!(a, b);
        assert!(b.verify("net@2025"));
        assert!(!b.verify("net@2026"));
        assert!(!b.verify(""));
    }

    #[test]
    fn disabled_rejects_everything() {
        let c = AdminCredential::disabled();
        assert!(!c.is_configured());
        assert!(!c.verify(""));
    }

    #[test]
    fn malformed_hex_is_a_config_error() {
        assert!(AdminCredential::from_sha256_hex("abc").is_err());
        assert!(AdminCredential::from_sha256_hex(&"zz".repeat(32)).is_err());
        assert!(AdminCredential::from_sha256_hex(&"ab".repeat(31)).is_err());
    }

    #[test]
    fn hex_digest_accepts_uppercase_and_whitespace() {
        let lower = sha256_hex("abc");
        assert_eq!(
            lower,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        let c = AdminCredential::from_sha256_hex(&format!(" {} ", lower.to_uppercase())).unwrap();
        assert!(c.verify("abc"));
    }
}
