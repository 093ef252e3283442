//! # xo-auth-simple
//!
//! Argon2-based implementation of `AdminAuth`.
//! The staff password never leaves the server: clients send it with the
//! request and it is checked against a PHC hash from configuration.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use xo_core::traits::AdminAuth;

pub struct SimpleAdminAuth {
    /// PHC-formatted Argon2 hash, e.g. `$argon2id$v=19$...`
    password_hash: Option<SecretString>,
}

impl SimpleAdminAuth {
    /// `None` disables the check entirely.
    pub fn new(password_hash: Option<SecretString>) -> Self {
        if password_hash.is_none() {
            log::warn!("no admin password hash configured; bulk chat clear is open to everyone");
        }
        Self { password_hash }
    }
}

/// Produces a PHC string suitable for `admin.password_hash`.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

#[async_trait]
impl AdminAuth for SimpleAdminAuth {
    fn is_enabled(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Verifies if a provided password matches the stored Argon2 hash.
    async fn verify_admin_password(&self, password: &str) -> bool {
        let Some(hash) = &self.password_hash else {
            return false;
        };
        let parsed_hash = match PasswordHash::new(hash.expose_secret()) {
            Ok(p) => p,
            Err(e) => {
                log::error!("configured admin password hash is not a valid PHC string: {e}");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
