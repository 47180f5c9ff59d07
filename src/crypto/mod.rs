//! Key derivation and randomness.
//!
//! Parameter ranges live here so the options layer and any configuration
//! surface agree on what is accepted.

pub mod kdf;
pub mod random;

pub use kdf::{HashSpec, Kdf, KeyMaterial, derive};
pub use random::{generate_iv, generate_salt};

/// Maximum user-configurable salt length in bytes.
pub const SALT_MAX: usize = 512;
/// bcrypt accepts exactly this much salt.
pub const BCRYPT_SALT_LEN: usize = 16;
/// PBKDF2 iteration range and default.
pub const PBKDF2_ITER_MIN: u32 = 1;
pub const PBKDF2_ITER_MAX: u32 = 10_000_000;
pub const PBKDF2_ITER_DEFAULT: u32 = 1000;
/// bcrypt cost exponent (rounds = 2^cost).
pub const BCRYPT_COST_MIN: u32 = 4;
pub const BCRYPT_COST_MAX: u32 = 24;
pub const BCRYPT_COST_DEFAULT: u32 = 8;
/// scrypt parameter ranges; N must additionally be a power of two.
pub const SCRYPT_N_MIN: u32 = 2;
pub const SCRYPT_N_MAX: u32 = 1 << 25;
pub const SCRYPT_N_DEFAULT: u32 = 16384;
pub const SCRYPT_R_MIN: u32 = 1;
pub const SCRYPT_R_MAX: u32 = 256;
pub const SCRYPT_R_DEFAULT: u32 = 8;
pub const SCRYPT_P_MIN: u32 = 1;
pub const SCRYPT_P_MAX: u32 = 256;
pub const SCRYPT_P_DEFAULT: u32 = 1;
/// Line-wrap length limit for encoded output.
pub const LINE_LENGTH_MAX: usize = 9999;
/// HMAC preset keys are fixed-size (see presets module).
pub const PRESET_KEY_LEN: usize = 16;
