//! Configuration engine for password-based text encryption.
//!
//! The crate models everything that happens between "the user wants to
//! encrypt this text" and "the cipher runs": the catalog of supported
//! ciphers, modes and hashes; key derivation from a password and salt;
//! text encodings for ciphertext output; validation of user-entered
//! secrets; the confirm-twice password flow; and the [`CryptoOptions`]
//! aggregate that ties it all together. It performs no bulk encryption
//! itself; the host supplies the cipher implementations and feeds them
//! the key and IV produced here.

pub mod catalog;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod options;
pub mod password;
pub mod presets;
pub mod secret;

pub use crate::crypto::{HashSpec, Kdf, KeyMaterial};
pub use crate::encoding::{Encoding, Eol, TextFormat};
pub use crate::error::{CodecError, ConfigError};
pub use crate::options::{CryptoOptions, IvStrategy, Operation};
pub use crate::password::{ConfirmState, PasswordSession, Submit};
pub use crate::presets::KeyPresetStore;
pub use crate::secret::SecretBytes;
