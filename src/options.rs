//! The configuration aggregate one encrypt or decrypt operation runs under.
//!
//! A `CryptoOptions` is built once per operation, populated through the
//! validated setters, consumed by the pipeline, then its secrets are
//! cleared. It is exclusively owned by that operation: one options value,
//! one operation, one thread, start to finish.

use crate::catalog::{self, Cipher, Mode};
use crate::crypto::{
    self, BCRYPT_SALT_LEN, HashSpec, Kdf, KeyMaterial, LINE_LENGTH_MAX, SALT_MAX,
};
use crate::encoding::{Encoding, TextFormat};
use crate::error::ConfigError;
use crate::presets::KeyPresetStore;
use crate::secret::SecretBytes;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IvStrategy {
    Random,
    KeyDerived,
    Zero,
    Custom,
}

impl IvStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            IvStrategy::Random => "random",
            IvStrategy::KeyDerived => "keyderivation",
            IvStrategy::Zero => "zero",
            IvStrategy::Custom => "custom",
        }
    }

    /// One-line description a configuration surface can show as a tooltip.
    pub fn info(&self) -> &'static str {
        match self {
            IvStrategy::Random => "fresh random IV, written alongside the ciphertext",
            IvStrategy::KeyDerived => "IV derived from password and salt in the same pass as the key",
            IvStrategy::Zero => "all-zero IV; only safe if every key is used once",
            IvStrategy::Custom => "user-supplied IV of exactly the required length",
        }
    }
}

/// Key sizing and derivation settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KeyOptions {
    length: usize,
    algorithm: Kdf,
    salt_bytes: usize,
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            length: 32,
            algorithm: Kdf::default(),
            salt_bytes: 16,
        }
    }
}

impl KeyOptions {
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn algorithm(&self) -> &Kdf {
        &self.algorithm
    }

    pub fn salt_bytes(&self) -> usize {
        self.salt_bytes
    }
}

/// Optional keyed-hash authentication over header and ciphertext
/// (encryption only).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HmacOptions {
    enable: bool,
    hash: HashSpec,
    #[serde(skip)]
    key: SecretBytes,
    keypreset_id: i32,
}

impl HmacOptions {
    pub fn enabled(&self) -> bool {
        self.enable
    }

    pub fn hash(&self) -> HashSpec {
        self.hash
    }

    pub fn key(&self) -> &SecretBytes {
        &self.key
    }

    /// Index into the host's preset store, or -1 for a custom key.
    pub fn keypreset_id(&self) -> i32 {
        self.keypreset_id
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CryptoOptions {
    cipher: Cipher,
    mode: Mode,
    key: KeyOptions,
    iv: IvStrategy,
    #[serde(skip)]
    custom_iv: SecretBytes,
    encoding: TextFormat,
    #[serde(skip)]
    password: SecretBytes,
    password_encoding: Encoding,
    hmac: HmacOptions,
    // salt length the user had before bcrypt pinned it to 16
    #[serde(skip)]
    saved_salt_bytes: Option<usize>,
    #[serde(skip)]
    wide_destination: bool,
}

impl Default for CryptoOptions {
    fn default() -> Self {
        Self {
            cipher: Cipher::Aes,
            mode: Mode::Cbc,
            key: KeyOptions::default(),
            iv: IvStrategy::Random,
            custom_iv: SecretBytes::new(),
            encoding: TextFormat::default(),
            password: SecretBytes::new(),
            password_encoding: Encoding::Ascii,
            hmac: HmacOptions::default(),
            saved_salt_bytes: None,
            wide_destination: false,
        }
    }
}

impl CryptoOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cipher(&self) -> Cipher {
        self.cipher
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn key(&self) -> &KeyOptions {
        &self.key
    }

    pub fn iv_strategy(&self) -> IvStrategy {
        self.iv
    }

    pub fn custom_iv(&self) -> &SecretBytes {
        &self.custom_iv
    }

    pub fn text_format(&self) -> &TextFormat {
        &self.encoding
    }

    pub fn hmac(&self) -> &HmacOptions {
        &self.hmac
    }

    pub fn password_encoding(&self) -> Encoding {
        self.password_encoding
    }

    /// Select a cipher. An unsupported current mode or key length is
    /// coerced to the new cipher's first mode / first key length; this is
    /// the documented policy for the cipher-change cascade, while direct
    /// `set_mode`/`set_key_length` calls reject instead.
    pub fn set_cipher(&mut self, cipher: Cipher) {
        self.cipher = cipher;
        let modes = catalog::modes_for(cipher);
        if !modes.is_empty() && !modes.contains(&self.mode) {
            self.mode = modes[0];
        }
        let lengths = catalog::keylengths_for(cipher);
        if !lengths.contains(&self.key.length) {
            self.key.length = lengths[0];
        }
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), ConfigError> {
        if catalog::mode_index(self.cipher, mode).is_none() {
            return Err(ConfigError::UnsupportedMode { cipher: self.cipher, mode });
        }
        self.mode = mode;
        Ok(())
    }

    pub fn set_key_length(&mut self, length: usize) -> Result<(), ConfigError> {
        if catalog::keylength_index(self.cipher, length).is_none() {
            return Err(ConfigError::UnsupportedKeyLength { cipher: self.cipher, length });
        }
        self.key.length = length;
        Ok(())
    }

    /// Switch the key derivation algorithm. Entering bcrypt pins the salt
    /// to 16 bytes and remembers the previous setting; leaving bcrypt
    /// restores it.
    pub fn set_kdf(&mut self, kdf: Kdf) -> Result<(), ConfigError> {
        kdf.validate()?;
        let was_bcrypt = matches!(self.key.algorithm, Kdf::Bcrypt { .. });
        let is_bcrypt = matches!(kdf, Kdf::Bcrypt { .. });
        if is_bcrypt && !was_bcrypt {
            self.saved_salt_bytes = Some(self.key.salt_bytes);
            self.key.salt_bytes = BCRYPT_SALT_LEN;
        } else if !is_bcrypt && was_bcrypt {
            self.key.salt_bytes = self.saved_salt_bytes.take().unwrap_or(BCRYPT_SALT_LEN);
        }
        self.key.algorithm = kdf;
        Ok(())
    }

    /// Salt length in bytes; 0 disables salting. Fixed while bcrypt is
    /// selected.
    pub fn set_salt_bytes(&mut self, bytes: usize) -> Result<(), ConfigError> {
        if !self.salt_editable() && bytes != BCRYPT_SALT_LEN {
            return Err(ConfigError::BcryptSaltLength(bytes));
        }
        if bytes > SALT_MAX {
            return Err(ConfigError::SaltOutOfRange(bytes));
        }
        self.key.salt_bytes = bytes;
        Ok(())
    }

    pub fn set_iv_strategy(&mut self, strategy: IvStrategy) {
        self.iv = strategy;
    }

    /// Store a custom IV. The exact-length check applies only while an IV
    /// is required; under ECB the value is accepted unvalidated and unused.
    pub fn set_custom_iv(&mut self, iv: SecretBytes) -> Result<(), ConfigError> {
        let required = self.required_iv_length();
        if required > 0 && iv.len() != required {
            return Err(ConfigError::IvLength { length: iv.len(), required });
        }
        self.custom_iv = iv;
        Ok(())
    }

    pub fn set_text_format(&mut self, fmt: TextFormat) -> Result<(), ConfigError> {
        if fmt.linelength < 1 || fmt.linelength > LINE_LENGTH_MAX {
            return Err(ConfigError::LineLength(fmt.linelength));
        }
        if self.wide_destination && fmt.enc == Encoding::Ascii {
            return Err(ConfigError::AsciiUnavailable);
        }
        self.encoding = fmt;
        Ok(())
    }

    /// The destination buffer is not 8-bit-clean: ASCII output becomes
    /// unavailable, and a current ASCII selection is retargeted to base16.
    pub fn restrict_to_wide_buffer(&mut self) {
        self.wide_destination = true;
        if self.encoding.enc == Encoding::Ascii {
            self.encoding.enc = Encoding::Base16;
        }
    }

    pub fn set_password(&mut self, password: SecretBytes, enc: Encoding) {
        self.password = password;
        self.password_encoding = enc;
    }

    pub fn set_hmac_enabled(&mut self, enable: bool) {
        self.hmac.enable = enable;
    }

    pub fn set_hmac_hash(&mut self, hash: HashSpec) -> Result<(), ConfigError> {
        hash.validate_hmac()?;
        self.hmac.hash = hash;
        Ok(())
    }

    /// Use a custom HMAC key instead of a preset.
    pub fn set_hmac_custom_key(&mut self, key: SecretBytes) -> Result<(), ConfigError> {
        if key.is_empty() {
            return Err(ConfigError::EmptyHmacKey);
        }
        self.hmac.key = key;
        self.hmac.keypreset_id = -1;
        Ok(())
    }

    /// Select an HMAC key from the host's preset store. Out-of-range ids
    /// (including anything below -1) are clamped to the first preset; -1
    /// keeps the custom key.
    pub fn apply_hmac_preset(&mut self, store: &dyn KeyPresetStore, id: i32) {
        let id = if id >= store.key_num() as i32 || id < -1 { 0 } else { id };
        if id >= 0 {
            if let Some(key) = store.key(id as usize) {
                self.hmac.key = SecretBytes::from_bytes(&key);
            }
        }
        self.hmac.keypreset_id = id;
    }

    /// Whether the current cipher/mode combination consumes an IV at all.
    pub fn iv_required(&self) -> bool {
        self.required_iv_length() > 0
    }

    pub fn required_iv_length(&self) -> usize {
        catalog::iv_length(self.cipher, self.mode)
    }

    pub fn salt_editable(&self) -> bool {
        self.key.algorithm.salt_editable()
    }

    /// Random IVs cannot be chosen when decrypting; the IV has to come
    /// from the stored header or the user.
    pub fn random_iv_selectable(&self, operation: Operation) -> bool {
        operation == Operation::Encrypt
    }

    pub fn uppercase_applicable(&self) -> bool {
        self.encoding.enc.case_configurable()
    }

    /// Re-check every invariant before the pipeline consumes the options.
    /// Nothing is mutated; the first violation is returned.
    pub fn validate(&self, operation: Operation) -> Result<(), ConfigError> {
        let modes = catalog::modes_for(self.cipher);
        if !modes.is_empty() && !modes.contains(&self.mode) {
            return Err(ConfigError::UnsupportedMode { cipher: self.cipher, mode: self.mode });
        }
        if catalog::keylength_index(self.cipher, self.key.length).is_none() {
            return Err(ConfigError::UnsupportedKeyLength {
                cipher: self.cipher,
                length: self.key.length,
            });
        }
        self.key.algorithm.validate()?;
        if !self.key.algorithm.salt_editable() {
            if self.key.salt_bytes != BCRYPT_SALT_LEN {
                return Err(ConfigError::BcryptSaltLength(self.key.salt_bytes));
            }
        } else if self.key.salt_bytes > SALT_MAX {
            return Err(ConfigError::SaltOutOfRange(self.key.salt_bytes));
        }
        if self.iv_required() && self.iv == IvStrategy::Custom {
            let required = self.required_iv_length();
            if self.custom_iv.len() != required {
                return Err(ConfigError::IvLength { length: self.custom_iv.len(), required });
            }
        }
        if operation == Operation::Encrypt && self.hmac.enable {
            self.hmac.hash.validate_hmac()?;
            if self.hmac.keypreset_id < 0 && self.hmac.key.is_empty() {
                return Err(ConfigError::EmptyHmacKey);
            }
        }
        if self.encoding.linelength < 1 || self.encoding.linelength > LINE_LENGTH_MAX {
            return Err(ConfigError::LineLength(self.encoding.linelength));
        }
        if self.wide_destination && self.encoding.enc == Encoding::Ascii {
            return Err(ConfigError::AsciiUnavailable);
        }
        Ok(())
    }

    /// Derive the key (and, for the key-derived IV strategy, the IV) for
    /// this operation. Validates first; the committed password must have
    /// been moved in via `set_password`.
    pub fn key_material(&self, operation: Operation, salt: &[u8]) -> Result<KeyMaterial> {
        self.validate(operation)?;
        let iv_len = if self.iv == IvStrategy::KeyDerived {
            self.required_iv_length()
        } else {
            0
        };
        crypto::derive(
            &self.key.algorithm,
            self.password.as_bytes(),
            salt,
            self.key.length,
            iv_len,
        )
        .context("failed to derive key material")
    }

    /// Resolve the IV strategy to concrete bytes. `material` is consulted
    /// for the key-derived strategy and must come from `key_material`.
    pub fn initialization_vector(&self, material: &KeyMaterial) -> Result<Zeroizing<Vec<u8>>> {
        let len = self.required_iv_length();
        if len == 0 {
            return Ok(Zeroizing::new(Vec::new()));
        }
        match self.iv {
            IvStrategy::Random => Ok(Zeroizing::new(crypto::generate_iv(len)?)),
            IvStrategy::Zero => Ok(Zeroizing::new(vec![0u8; len])),
            IvStrategy::KeyDerived => {
                if material.iv.len() != len {
                    bail!("derivation produced no IV bytes; derive with the key-derived strategy set");
                }
                Ok(Zeroizing::new(material.iv.to_vec()))
            }
            IvStrategy::Custom => {
                if self.custom_iv.len() != len {
                    return Err(ConfigError::IvLength {
                        length: self.custom_iv.len(),
                        required: len,
                    }
                    .into());
                }
                Ok(Zeroizing::new(self.custom_iv.as_bytes().to_vec()))
            }
        }
    }

    /// Drop all secret material after the single consuming operation.
    pub fn clear_secrets(&mut self) {
        self.password.clear();
        self.custom_iv.clear();
        self.hmac.key.clear();
    }
}
