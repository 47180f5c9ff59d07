//! Text representations of raw bytes.
//!
//! Base16/32/64 use the standard alphabets with padding. ASCII is the
//! identity transform for 8-bit-clean buffers and carries no character-set
//! guarantee, so it gets an advisory instead of a hard error. Decoding
//! tolerates embedded line breaks of either style, whatever the encode-time
//! settings were.

use crate::error::CodecError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use data_encoding::BASE32;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    Ascii,
    Base16,
    Base32,
    Base64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eol {
    Windows,
    Unix,
}

/// Write-side formatting for encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormat {
    pub enc: Encoding,
    pub linebreaks: bool,
    pub eol: Eol,
    pub uppercase: bool,
    pub linelength: usize,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            enc: Encoding::Base64,
            linebreaks: true,
            eol: Eol::Windows,
            uppercase: true,
            linelength: 64,
        }
    }
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Base16 => "base16",
            Encoding::Base32 => "base32",
            Encoding::Base64 => "base64",
        }
    }

    /// One-line description a configuration surface can show as a tooltip.
    pub fn info(&self) -> &'static str {
        match self {
            Encoding::Ascii => "raw bytes, no transformation",
            Encoding::Base16 => "hexadecimal, two characters per byte",
            Encoding::Base32 => "RFC 4648 base32 with padding",
            Encoding::Base64 => "RFC 4648 base64 with padding",
        }
    }

    /// Informational warning for encodings without a safe character set.
    pub fn advisory(&self) -> Option<&'static str> {
        match self {
            Encoding::Ascii => {
                Some("raw bytes as text: no character-set guarantee, output may be unreadable")
            }
            _ => None,
        }
    }

    /// The uppercase flag only changes base16 output; base64 mixes case
    /// meaningfully and base32 is uppercase by definition.
    pub fn case_configurable(&self) -> bool {
        matches!(self, Encoding::Base16)
    }
}

impl Eol {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Eol::Windows => b"\r\n",
            Eol::Unix => b"\n",
        }
    }
}

/// Encode `input` for display or storage according to `fmt`.
pub fn encode(input: &[u8], fmt: &TextFormat) -> Vec<u8> {
    let text = match fmt.enc {
        Encoding::Ascii => return input.to_vec(),
        Encoding::Base16 => {
            if fmt.uppercase {
                hex::encode_upper(input)
            } else {
                hex::encode(input)
            }
        }
        Encoding::Base32 => BASE32.encode(input),
        Encoding::Base64 => BASE64.encode(input),
    };
    if fmt.linebreaks && fmt.linelength > 0 {
        wrap(text.into_bytes(), fmt.eol.as_bytes(), fmt.linelength)
    } else {
        text.into_bytes()
    }
}

/// Decode text back into raw bytes, rejecting input outside the target
/// alphabet. CR/LF are stripped from base-N input first; ASCII passes
/// through untouched.
pub fn decode(input: &[u8], enc: Encoding) -> Result<Vec<u8>, CodecError> {
    if enc == Encoding::Ascii {
        return Ok(input.to_vec());
    }
    let stripped: Vec<u8> = input
        .iter()
        .copied()
        .filter(|b| *b != b'\r' && *b != b'\n')
        .collect();
    match enc {
        Encoding::Ascii => unreachable!(),
        Encoding::Base16 => hex::decode(&stripped).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { .. } => {
                CodecError::InvalidCharacter(Encoding::Base16)
            }
            _ => CodecError::InvalidPadding(Encoding::Base16),
        }),
        Encoding::Base32 => BASE32.decode(&stripped).map_err(|e| match e.kind {
            data_encoding::DecodeKind::Symbol => CodecError::InvalidCharacter(Encoding::Base32),
            _ => CodecError::InvalidPadding(Encoding::Base32),
        }),
        Encoding::Base64 => BASE64.decode(&stripped).map_err(|e| match e {
            base64::DecodeError::InvalidByte(..) => CodecError::InvalidCharacter(Encoding::Base64),
            _ => CodecError::InvalidPadding(Encoding::Base64),
        }),
    }
}

fn wrap(text: Vec<u8>, eol: &[u8], linelength: usize) -> Vec<u8> {
    let lines = text.len().div_ceil(linelength);
    let mut out = Vec::with_capacity(text.len() + lines * eol.len());
    for (i, chunk) in text.chunks(linelength).enumerate() {
        if i > 0 {
            out.extend_from_slice(eol);
        }
        out.extend_from_slice(chunk);
    }
    out
}
