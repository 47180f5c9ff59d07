use anyhow::{Result, anyhow};
use getrandom::fill;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<()> {
    fill(buf).map_err(|_| anyhow!("OS random generator unavailable"))
}

/// Generate a random salt of the configured length
pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    secure_random(&mut salt)?;
    Ok(salt)
}

/// Generate a fresh random IV
pub fn generate_iv(len: usize) -> Result<Vec<u8>> {
    let mut iv = vec![0u8; len];
    secure_random(&mut iv)?;
    Ok(iv)
}
