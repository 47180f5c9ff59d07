use crate::catalog::{Cipher, HashAlgo, Mode};
use crate::encoding::Encoding;
use std::fmt;

/// An options combination that violates a catalog invariant or a KDF
/// parameter range. Raised before any cryptographic work begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedMode { cipher: Cipher, mode: Mode },
    UnsupportedKeyLength { cipher: Cipher, length: usize },
    SaltOutOfRange(usize),
    BcryptSaltLength(usize),
    UnsupportedDigestLength { hash: HashAlgo, length: usize },
    NotHmacCapable(HashAlgo),
    Pbkdf2Iterations(u32),
    BcryptCost(u32),
    ScryptParam { name: &'static str, value: u32 },
    IvLength { length: usize, required: usize },
    LineLength(usize),
    EmptyHmacKey,
    AsciiUnavailable,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedMode { cipher, mode } => {
                write!(f, "cipher '{}' does not support {} mode", cipher.name(), mode.name())
            }
            ConfigError::UnsupportedKeyLength { cipher, length } => {
                write!(f, "cipher '{}' does not support {length}-byte keys", cipher.name())
            }
            ConfigError::SaltOutOfRange(n) => write!(f, "salt length {n} out of range"),
            ConfigError::BcryptSaltLength(n) => {
                write!(f, "bcrypt requires exactly 16 bytes of salt, got {n}")
            }
            ConfigError::UnsupportedDigestLength { hash, length } => {
                write!(f, "hash '{}' has no {length}-byte digest", hash.name())
            }
            ConfigError::NotHmacCapable(h) => {
                write!(f, "hash '{}' cannot be used as an HMAC/PBKDF2 PRF", h.name())
            }
            ConfigError::Pbkdf2Iterations(n) => write!(f, "pbkdf2 iteration count {n} out of range"),
            ConfigError::BcryptCost(n) => write!(f, "bcrypt cost factor {n} out of range"),
            ConfigError::ScryptParam { name, value } => {
                write!(f, "invalid scrypt parameter {name} = {value}")
            }
            ConfigError::IvLength { length, required } => {
                write!(f, "custom IV must be {required} bytes, got {length}")
            }
            ConfigError::LineLength(n) => write!(f, "line length {n} out of range"),
            ConfigError::EmptyHmacKey => write!(f, "custom HMAC key is empty"),
            ConfigError::AsciiUnavailable => {
                write!(f, "ascii output is not available for wide-character buffers")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Text-codec input outside the target alphabet or with broken padding.
/// Distinct from "decoded fine but the byte count is wrong", which the
/// validators report as a plain validity flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    InvalidCharacter(Encoding),
    InvalidPadding(Encoding),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidCharacter(e) => {
                write!(f, "input contains characters outside the {} alphabet", e.name())
            }
            CodecError::InvalidPadding(e) => write!(f, "malformed {} input", e.name()),
        }
    }
}

impl std::error::Error for CodecError {}
