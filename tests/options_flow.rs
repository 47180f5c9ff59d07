//! End-to-end flow over the public API: configure options, collect and
//! confirm a password, derive key material, resolve an IV, encode the
//! result for text output, and get the same bytes back on the decrypt side.

use textcrypt::catalog::{self, Cipher, Mode};
use textcrypt::crypto::{self, BCRYPT_COST_DEFAULT};
use textcrypt::presets::StaticPresets;
use textcrypt::{
    ConfigError, CryptoOptions, Encoding, IvStrategy, Kdf, Operation, PasswordSession,
    SecretBytes, Submit, TextFormat,
};

#[test]
fn encrypt_side_configuration_produces_key_iv_and_text() {
    let mut opts = CryptoOptions::new();
    opts.set_cipher(Cipher::Twofish);
    opts.set_mode(Mode::Ctr).unwrap();
    opts.set_key_length(24).unwrap();
    opts.set_salt_bytes(32).unwrap();
    opts.set_iv_strategy(IvStrategy::Random);

    let mut session = PasswordSession::new(Operation::Encrypt);
    assert_eq!(
        session.submit("hunter2", Encoding::Ascii),
        Submit::NeedsConfirmation { display: None }
    );
    assert_eq!(session.submit("hunter2", Encoding::Ascii), Submit::Committed);
    opts.set_password(session.take_password().unwrap(), Encoding::Ascii);

    let salt = crypto::generate_salt(opts.key().salt_bytes()).unwrap();
    assert_eq!(salt.len(), 32);

    let material = opts.key_material(Operation::Encrypt, &salt).unwrap();
    assert_eq!(material.key.len(), 24);
    assert!(material.iv.is_empty());

    let iv = opts.initialization_vector(&material).unwrap();
    assert_eq!(iv.len(), catalog::iv_length(Cipher::Twofish, Mode::Ctr));

    // pretend the cipher ran; the output side encodes whatever it produced
    let ciphertext = vec![0x5au8; 100];
    let text = textcrypt::encoding::encode(&ciphertext, opts.text_format());
    assert_eq!(
        textcrypt::encoding::decode(&text, opts.text_format().enc).unwrap(),
        ciphertext
    );

    opts.clear_secrets();
}

#[test]
fn decrypt_side_reproduces_the_derived_key_and_iv() {
    let salt = b"0123456789abcdef";

    let derive_both = |operation: Operation| {
        let mut opts = CryptoOptions::new();
        opts.set_iv_strategy(IvStrategy::KeyDerived);
        opts.set_password(SecretBytes::from_bytes(b"shared"), Encoding::Ascii);
        let material = opts.key_material(operation, salt).unwrap();
        let iv = opts.initialization_vector(&material).unwrap();
        (material, iv)
    };

    let (enc_material, enc_iv) = derive_both(Operation::Encrypt);
    let (dec_material, dec_iv) = derive_both(Operation::Decrypt);
    assert_eq!(*enc_material.key, *dec_material.key);
    assert_eq!(*enc_iv, *dec_iv);
}

#[test]
fn base16_password_entry_confirms_against_its_canonical_form() {
    let mut session = PasswordSession::new(Operation::Encrypt);
    let display = match session.submit("c0ffee", Encoding::Base16) {
        Submit::NeedsConfirmation { display } => display.unwrap(),
        other => panic!("expected NeedsConfirmation, got: {other:?}"),
    };
    assert_eq!(display, "C0FFEE");
    assert_eq!(session.submit(&display, Encoding::Base16), Submit::Committed);
    assert_eq!(session.take_password().unwrap().as_bytes(), &[0xc0, 0xff, 0xee]);
}

#[test]
fn bcrypt_configuration_carries_its_pinned_salt_through_derivation() {
    let mut opts = CryptoOptions::new();
    opts.set_kdf(Kdf::Bcrypt { cost: BCRYPT_COST_DEFAULT }).unwrap();
    opts.set_password(SecretBytes::from_bytes(b"pw"), Encoding::Ascii);

    let salt = crypto::generate_salt(opts.key().salt_bytes()).unwrap();
    assert_eq!(salt.len(), 16);
    let material = opts.key_material(Operation::Encrypt, &salt).unwrap();
    assert_eq!(material.key.len(), 32);

    // a salt of any other length is refused for bcrypt
    let err = opts.key_material(Operation::Encrypt, &salt[..8]).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::BcryptSaltLength(8))
    );
}

#[test]
fn hmac_preset_key_flows_into_a_valid_encrypt_configuration() {
    let mut store = StaticPresets::new();
    store.push("team key", [0x42u8; 16]);

    let mut opts = CryptoOptions::new();
    opts.set_hmac_enabled(true);
    opts.apply_hmac_preset(&store, 0);
    opts.set_password(SecretBytes::from_bytes(b"pw"), Encoding::Ascii);

    assert!(opts.validate(Operation::Encrypt).is_ok());
    assert_eq!(opts.hmac().key().as_bytes(), &[0x42u8; 16]);
}

#[test]
fn stream_cipher_selection_drops_the_mode_axis() {
    let mut opts = CryptoOptions::new();
    opts.set_cipher(Cipher::ChaCha20);
    assert!(catalog::modes_for(Cipher::ChaCha20).is_empty());
    assert_eq!(opts.key().length(), 32);
    assert_eq!(opts.required_iv_length(), 12);

    opts.set_password(SecretBytes::from_bytes(b"pw"), Encoding::Ascii);
    assert!(opts.validate(Operation::Encrypt).is_ok());

    opts.set_cipher(Cipher::XChaCha20);
    assert_eq!(opts.required_iv_length(), 24);
    opts.set_cipher(Cipher::Salsa20);
    assert_eq!(opts.required_iv_length(), 8);
    assert!(opts.set_key_length(16).is_ok());
}

#[test]
fn serialized_options_restore_into_the_same_configuration() {
    let mut opts = CryptoOptions::new();
    opts.set_cipher(Cipher::Serpent);
    opts.set_mode(Mode::Ofb).unwrap();
    opts.set_salt_bytes(64).unwrap();
    let mut fmt = TextFormat::default();
    fmt.enc = Encoding::Base32;
    fmt.linelength = 76;
    opts.set_text_format(fmt).unwrap();

    let json = serde_json::to_string(&opts).unwrap();
    let restored: CryptoOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.cipher(), Cipher::Serpent);
    assert_eq!(restored.mode(), Mode::Ofb);
    assert_eq!(restored.key().salt_bytes(), 64);
    assert_eq!(restored.text_format().enc, Encoding::Base32);
    assert!(restored.validate(Operation::Decrypt).is_ok());
}
