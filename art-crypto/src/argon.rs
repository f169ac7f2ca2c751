use crate::{SingerCrypto, VerifyCrypto};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::io::Read;

#[derive(Default, Clone, Copy)]
pub struct Argon;

impl SingerCrypto for Argon {
    fn sign(&self, data: &mut dyn Read) -> anyhow::Result<String> {
        let mut password = Vec::new();
        data.read_to_end(&mut password)?;
        if password.is_empty() {
            anyhow::bail!("password is empty");
        }
        let salt = SaltString::generate(&mut OsRng);
        // $argon2id$v=19$...
        Argon2::default()
            .hash_password(password.as_slice(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow::anyhow!(e.to_string()))
    }
}

impl VerifyCrypto for Argon {
    fn verify(&self, sig: &[u8], data: &mut dyn Read) -> anyhow::Result<bool> {
        let mut password = Vec::new();
        data.read_to_end(&mut password)?;
        let stored_hash = std::str::from_utf8(sig)?;
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|e| anyhow::anyhow!("invalid hash format: {}", e))?;
        Ok(Argon2::default()
            .verify_password(&password, &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use crate::{hash_password, verify_password};

    #[test]
    fn test_argon_round() {
        let hash = hash_password("devpassword").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hash, "devpassword").unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn test_argon_rejects_empty_and_garbage() {
        assert!(hash_password("").is_err());
        assert!(verify_password("not-a-hash", "devpassword").is_err());
    }
}
