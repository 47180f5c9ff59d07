//! Zeroized secret buffers and the validation of user-entered secret text.
//!
//! Validation failure here is routine interactive feedback, not a fault:
//! the functions report a validity flag plus the attempted decode and never
//! raise on malformed encoding input (which simply decodes to nothing).

use crate::encoding::{self, Encoding, Eol, TextFormat};
use zeroize::{Zeroize, Zeroizing};

/// An owned secret byte buffer, zeroized on drop.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SecretBytes(Zeroizing<Vec<u8>>);

impl SecretBytes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(Zeroizing::new(bytes.to_vec()))
    }

    /// Decode user-entered text per its input encoding. ASCII takes the raw
    /// bytes of the text; base-N input that fails to decode yields an empty
    /// buffer, which the validators treat as invalid.
    pub fn decode_text(text: &str, enc: Encoding) -> Self {
        match encoding::decode(text.as_bytes(), enc) {
            Ok(bytes) => Self(Zeroizing::new(bytes)),
            Err(_) => Self::new(),
        }
    }

    /// Canonical text form of the buffer in a base-N encoding; None for
    /// ASCII, which has no canonical re-encoding.
    pub fn reencode(&self, enc: Encoding) -> Option<String> {
        if enc == Encoding::Ascii {
            return None;
        }
        let fmt = TextFormat {
            enc,
            linebreaks: false,
            eol: Eol::Unix,
            uppercase: true,
            linelength: 0,
        };
        Some(String::from_utf8_lossy(&encoding::encode(&self.0, &fmt)).into_owned())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.zeroize();
        self.0.clear();
    }
}

/// Result of validating one secret input: the flag, the attempted decode,
/// and (for valid base-N input) the canonical re-encoding a caller may use
/// to normalize displayed text.
#[derive(Debug)]
pub struct Validated {
    pub valid: bool,
    pub bytes: SecretBytes,
    pub normalized: Option<String>,
}

fn validated(valid: bool, bytes: SecretBytes, enc: Encoding) -> Validated {
    let normalized = if valid { bytes.reencode(enc) } else { None };
    Validated { valid, bytes, normalized }
}

/// Custom IV check: valid iff the decoded byte count matches exactly.
pub fn validate_fixed_length(input: &str, enc: Encoding, required: usize) -> Validated {
    let bytes = SecretBytes::decode_text(input, enc);
    let valid = bytes.len() == required;
    validated(valid, bytes, enc)
}

/// Custom HMAC key check: anything non-empty after decoding.
pub fn validate_non_empty(input: &str, enc: Encoding) -> Validated {
    let bytes = SecretBytes::decode_text(input, enc);
    let valid = !bytes.is_empty();
    validated(valid, bytes, enc)
}

/// Password check. Non-strict mode tolerates an empty field (the user is
/// still typing); strict mode is the commit-time rule. Text that is present
/// but decodes to nothing is invalid in both modes.
pub fn validate_password(input: &str, enc: Encoding, strict: bool) -> Validated {
    let bytes = SecretBytes::decode_text(input, enc);
    let valid = !bytes.is_empty() || (input.is_empty() && !strict);
    validated(valid, bytes, enc)
}
