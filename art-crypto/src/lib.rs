//! password hashing for accounts the service keeps credentials for

use std::io::Read;

mod argon;

pub use argon::Argon;

pub trait SingerCrypto {
    fn sign(&self, data: &mut dyn Read) -> anyhow::Result<String>;
}

pub trait VerifyCrypto {
    fn verify(&self, sig: &[u8], data: &mut dyn Read) -> anyhow::Result<bool>;
}

/// Hashes a plain password into a PHC string.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    Argon.sign(&mut password.as_bytes())
}

pub fn verify_password(hash: &str, password: &str) -> anyhow::Result<bool> {
    Argon.verify(hash.as_bytes(), &mut password.as_bytes())
}
