//! Static algorithm compatibility tables.
//!
//! Pure, stateless lookups: which modes and key lengths a cipher supports,
//! which digest lengths a hash offers, and the index↔enum translation a
//! position-based selection surface (combo boxes and the like) needs.
//! Out-of-range indices fall back to the first element instead of failing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Block,
    Stream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cipher {
    Aes,
    Camellia,
    Serpent,
    Twofish,
    TripleDes,
    Blowfish,
    ChaCha20,
    XChaCha20,
    Salsa20,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Cbc,
    Cfb,
    Ofb,
    Ctr,
    Ecb,
    Gcm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgo {
    Sha1,
    Sha2,
    Sha3,
    Blake2b,
}

const CATEGORIES: [Category; 2] = [Category::Block, Category::Stream];

const BLOCK_CIPHERS: [Cipher; 6] = [
    Cipher::Aes,
    Cipher::Camellia,
    Cipher::Serpent,
    Cipher::Twofish,
    Cipher::TripleDes,
    Cipher::Blowfish,
];

const STREAM_CIPHERS: [Cipher; 3] = [Cipher::ChaCha20, Cipher::XChaCha20, Cipher::Salsa20];

const MODES_FULL: [Mode; 6] = [Mode::Cbc, Mode::Cfb, Mode::Ofb, Mode::Ctr, Mode::Ecb, Mode::Gcm];
const MODES_NO_GCM: [Mode; 5] = [Mode::Cbc, Mode::Cfb, Mode::Ofb, Mode::Ctr, Mode::Ecb];
const MODES_64BIT: [Mode; 4] = [Mode::Cbc, Mode::Cfb, Mode::Ofb, Mode::Ecb];

const KEYLENGTHS_STANDARD: [usize; 3] = [16, 24, 32];
const KEYLENGTHS_3DES: [usize; 1] = [24];
const KEYLENGTHS_256: [usize; 1] = [32];
const KEYLENGTHS_SALSA: [usize; 2] = [16, 32];

const HASHES_ALL: [HashAlgo; 4] = [HashAlgo::Sha1, HashAlgo::Sha2, HashAlgo::Sha3, HashAlgo::Blake2b];
const HASHES_HMAC: [HashAlgo; 3] = [HashAlgo::Sha1, HashAlgo::Sha2, HashAlgo::Sha3];

const DIGESTS_SHA1: [usize; 1] = [20];
const DIGESTS_FAMILY: [usize; 4] = [28, 32, 48, 64];
const DIGESTS_BLAKE2B: [usize; 2] = [32, 64];

pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

pub fn ciphers(category: Category) -> &'static [Cipher] {
    match category {
        Category::Block => &BLOCK_CIPHERS,
        Category::Stream => &STREAM_CIPHERS,
    }
}

pub fn modes_for(cipher: Cipher) -> &'static [Mode] {
    match cipher {
        Cipher::Aes => &MODES_FULL,
        Cipher::Camellia | Cipher::Serpent | Cipher::Twofish => &MODES_NO_GCM,
        Cipher::TripleDes | Cipher::Blowfish => &MODES_64BIT,
        Cipher::ChaCha20 | Cipher::XChaCha20 | Cipher::Salsa20 => &[],
    }
}

pub fn keylengths_for(cipher: Cipher) -> &'static [usize] {
    match cipher {
        Cipher::Aes | Cipher::Camellia | Cipher::Serpent | Cipher::Twofish | Cipher::Blowfish => {
            &KEYLENGTHS_STANDARD
        }
        Cipher::TripleDes => &KEYLENGTHS_3DES,
        Cipher::ChaCha20 | Cipher::XChaCha20 => &KEYLENGTHS_256,
        Cipher::Salsa20 => &KEYLENGTHS_SALSA,
    }
}

pub fn category_of(cipher: Cipher) -> Category {
    match cipher {
        Cipher::ChaCha20 | Cipher::XChaCha20 | Cipher::Salsa20 => Category::Stream,
        _ => Category::Block,
    }
}

pub fn hashes(hmac_only: bool) -> &'static [HashAlgo] {
    if hmac_only { &HASHES_HMAC } else { &HASHES_ALL }
}

pub fn digest_lengths_for(hash: HashAlgo) -> &'static [usize] {
    match hash {
        HashAlgo::Sha1 => &DIGESTS_SHA1,
        HashAlgo::Sha2 | HashAlgo::Sha3 => &DIGESTS_FAMILY,
        HashAlgo::Blake2b => &DIGESTS_BLAKE2B,
    }
}

/// Block size in bytes; 0 for stream ciphers.
pub fn block_size(cipher: Cipher) -> usize {
    match cipher {
        Cipher::Aes | Cipher::Camellia | Cipher::Serpent | Cipher::Twofish => 16,
        Cipher::TripleDes | Cipher::Blowfish => 8,
        Cipher::ChaCha20 | Cipher::XChaCha20 | Cipher::Salsa20 => 0,
    }
}

/// Required IV length in bytes for a cipher/mode combination.
///
/// ECB needs no IV. Stream ciphers use their fixed nonce length and ignore
/// the mode entirely.
pub fn iv_length(cipher: Cipher, mode: Mode) -> usize {
    match cipher {
        Cipher::ChaCha20 => 12,
        Cipher::XChaCha20 => 24,
        Cipher::Salsa20 => 8,
        _ => match mode {
            Mode::Ecb => 0,
            Mode::Gcm => 12,
            _ => block_size(cipher),
        },
    }
}

pub fn category_index(category: Category) -> usize {
    CATEGORIES.iter().position(|c| *c == category).unwrap_or(0)
}

pub fn category_by_index(index: usize) -> Category {
    *CATEGORIES.get(index).unwrap_or(&CATEGORIES[0])
}

/// Position of `cipher` within its category's ordered list.
pub fn cipher_index(cipher: Cipher) -> usize {
    ciphers(category_of(cipher))
        .iter()
        .position(|c| *c == cipher)
        .unwrap_or(0)
}

pub fn cipher_by_index(category: Category, index: usize) -> Cipher {
    let list = ciphers(category);
    *list.get(index).unwrap_or(&list[0])
}

/// Position of `mode` in the cipher's mode list, or None if unsupported.
pub fn mode_index(cipher: Cipher, mode: Mode) -> Option<usize> {
    modes_for(cipher).iter().position(|m| *m == mode)
}

/// Mode at `index` for this cipher; None for mode-less (stream) ciphers.
pub fn mode_by_index(cipher: Cipher, index: usize) -> Option<Mode> {
    let list = modes_for(cipher);
    list.get(index).or_else(|| list.first()).copied()
}

pub fn keylength_index(cipher: Cipher, length: usize) -> Option<usize> {
    keylengths_for(cipher).iter().position(|l| *l == length)
}

pub fn keylength_by_index(cipher: Cipher, index: usize) -> usize {
    let list = keylengths_for(cipher);
    *list.get(index).unwrap_or(&list[0])
}

pub fn hash_index(hash: HashAlgo, hmac_only: bool) -> usize {
    hashes(hmac_only).iter().position(|h| *h == hash).unwrap_or(0)
}

pub fn hash_by_index(index: usize, hmac_only: bool) -> HashAlgo {
    let list = hashes(hmac_only);
    *list.get(index).unwrap_or(&list[0])
}

pub fn digest_index(hash: HashAlgo, length: usize) -> Option<usize> {
    digest_lengths_for(hash).iter().position(|l| *l == length)
}

pub fn digest_by_index(hash: HashAlgo, index: usize) -> usize {
    let list = digest_lengths_for(hash);
    *list.get(index).unwrap_or(&list[0])
}

impl Cipher {
    pub fn name(&self) -> &'static str {
        match self {
            Cipher::Aes => "aes",
            Cipher::Camellia => "camellia",
            Cipher::Serpent => "serpent",
            Cipher::Twofish => "twofish",
            Cipher::TripleDes => "3des",
            Cipher::Blowfish => "blowfish",
            Cipher::ChaCha20 => "chacha20",
            Cipher::XChaCha20 => "xchacha20",
            Cipher::Salsa20 => "salsa20",
        }
    }

    /// 64-bit block ciphers get a warning marker in any listing UI.
    pub fn is_weak(&self) -> bool {
        matches!(self, Cipher::TripleDes | Cipher::Blowfish)
    }
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Cbc => "cbc",
            Mode::Cfb => "cfb",
            Mode::Ofb => "ofb",
            Mode::Ctr => "ctr",
            Mode::Ecb => "ecb",
            Mode::Gcm => "gcm",
        }
    }

    pub fn requires_iv(&self) -> bool {
        !matches!(self, Mode::Ecb)
    }

    /// ECB leaks plaintext block patterns.
    pub fn is_weak(&self) -> bool {
        matches!(self, Mode::Ecb)
    }
}

impl HashAlgo {
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgo::Sha1 => "sha1",
            HashAlgo::Sha2 => "sha2",
            HashAlgo::Sha3 => "sha3",
            HashAlgo::Blake2b => "blake2b",
        }
    }

    /// Blake2b is keyed natively and is excluded from the HMAC/PBKDF2 lists.
    pub fn hmac_capable(&self) -> bool {
        !matches!(self, HashAlgo::Blake2b)
    }
}
