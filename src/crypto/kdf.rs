use super::{
    BCRYPT_COST_MAX, BCRYPT_COST_MIN, BCRYPT_SALT_LEN, PBKDF2_ITER_DEFAULT, PBKDF2_ITER_MAX,
    PBKDF2_ITER_MIN, SCRYPT_N_MAX, SCRYPT_N_MIN, SCRYPT_P_MAX, SCRYPT_P_MIN, SCRYPT_R_MAX,
    SCRYPT_R_MIN,
};
use crate::catalog::{self, HashAlgo};
use crate::error::ConfigError;
use anyhow::{Context, Result};
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// A hash algorithm plus the digest length that selects the concrete
/// family member (Sha2/48 is SHA-384 and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashSpec {
    pub algorithm: HashAlgo,
    pub digest_length: usize,
}

impl Default for HashSpec {
    fn default() -> Self {
        Self {
            algorithm: HashAlgo::Sha2,
            digest_length: 32,
        }
    }
}

impl HashSpec {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if catalog::digest_index(self.algorithm, self.digest_length).is_none() {
            return Err(ConfigError::UnsupportedDigestLength {
                hash: self.algorithm,
                length: self.digest_length,
            });
        }
        Ok(())
    }

    /// HMAC/PBKDF2 use requires an HMAC-capable hash on top of `validate`.
    pub fn validate_hmac(&self) -> Result<(), ConfigError> {
        if !self.algorithm.hmac_capable() {
            return Err(ConfigError::NotHmacCapable(self.algorithm));
        }
        self.validate()
    }
}

/// Key derivation algorithm with its tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kdf {
    Pbkdf2 { hash: HashSpec, iterations: u32 },
    Bcrypt { cost: u32 },
    Scrypt { n: u32, r: u32, p: u32 },
}

impl Default for Kdf {
    fn default() -> Self {
        Kdf::Pbkdf2 {
            hash: HashSpec::default(),
            iterations: PBKDF2_ITER_DEFAULT,
        }
    }
}

impl Kdf {
    pub fn name(&self) -> &'static str {
        match self {
            Kdf::Pbkdf2 { .. } => "pbkdf2",
            Kdf::Bcrypt { .. } => "bcrypt",
            Kdf::Scrypt { .. } => "scrypt",
        }
    }

    /// bcrypt pins the salt to 16 bytes; the other algorithms leave it to
    /// the user.
    pub fn salt_editable(&self) -> bool {
        !matches!(self, Kdf::Bcrypt { .. })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Kdf::Pbkdf2 { hash, iterations } => {
                hash.validate_hmac()?;
                if !(PBKDF2_ITER_MIN..=PBKDF2_ITER_MAX).contains(&iterations) {
                    return Err(ConfigError::Pbkdf2Iterations(iterations));
                }
            }
            Kdf::Bcrypt { cost } => {
                if !(BCRYPT_COST_MIN..=BCRYPT_COST_MAX).contains(&cost) {
                    return Err(ConfigError::BcryptCost(cost));
                }
            }
            Kdf::Scrypt { n, r, p } => {
                if !(SCRYPT_N_MIN..=SCRYPT_N_MAX).contains(&n) || !n.is_power_of_two() {
                    return Err(ConfigError::ScryptParam { name: "N", value: n });
                }
                if !(SCRYPT_R_MIN..=SCRYPT_R_MAX).contains(&r) {
                    return Err(ConfigError::ScryptParam { name: "r", value: r });
                }
                if !(SCRYPT_P_MIN..=SCRYPT_P_MAX).contains(&p) {
                    return Err(ConfigError::ScryptParam { name: "p", value: p });
                }
            }
        }
        Ok(())
    }
}

/// Output of a derivation pass. The IV slice is empty unless IV bytes were
/// requested; both buffers are zeroized on drop.
#[derive(Debug)]
pub struct KeyMaterial {
    pub key: Zeroizing<Vec<u8>>,
    pub iv: Zeroizing<Vec<u8>>,
}

/// Derive `key_length` key bytes plus `iv_length` IV bytes from a password
/// and salt.
///
/// Key and IV come from a single expanded derivation of
/// `key_length + iv_length` bytes, split into disjoint slices. Interoperating
/// implementations must do the same to reproduce the IV bit-for-bit.
pub fn derive(
    kdf: &Kdf,
    password: &[u8],
    salt: &[u8],
    key_length: usize,
    iv_length: usize,
) -> Result<KeyMaterial> {
    kdf.validate()?;
    if matches!(kdf, Kdf::Bcrypt { .. }) && salt.len() != BCRYPT_SALT_LEN {
        return Err(ConfigError::BcryptSaltLength(salt.len()).into());
    }

    let mut buf = Zeroizing::new(vec![0u8; key_length + iv_length]);
    match *kdf {
        Kdf::Pbkdf2 { hash, iterations } => {
            pbkdf2_fill(hash, password, salt, iterations, &mut buf)?;
        }
        Kdf::Bcrypt { cost } => {
            bcrypt_pbkdf::bcrypt_pbkdf(password, salt, 1u32 << cost, &mut buf)
                .context("bcrypt key derivation failed")?;
        }
        Kdf::Scrypt { n, r, p } => {
            let log_n = n.trailing_zeros() as u8;
            let params = scrypt::Params::new(log_n, r, p, buf.len())
                .map_err(|e| anyhow::anyhow!("failed to construct scrypt params: {e}"))?;
            scrypt::scrypt(password, salt, &params, &mut buf)
                .map_err(|e| anyhow::anyhow!("scrypt key derivation failed: {e}"))?;
        }
    }

    let iv = Zeroizing::new(buf[key_length..].to_vec());
    let mut key = buf;
    key.truncate(key_length);
    Ok(KeyMaterial { key, iv })
}

fn pbkdf2_fill(
    hash: HashSpec,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<(), ConfigError> {
    match (hash.algorithm, hash.digest_length) {
        (HashAlgo::Sha1, 20) => pbkdf2_hmac::<sha1::Sha1>(password, salt, iterations, out),
        (HashAlgo::Sha2, 28) => pbkdf2_hmac::<sha2::Sha224>(password, salt, iterations, out),
        (HashAlgo::Sha2, 32) => pbkdf2_hmac::<sha2::Sha256>(password, salt, iterations, out),
        (HashAlgo::Sha2, 48) => pbkdf2_hmac::<sha2::Sha384>(password, salt, iterations, out),
        (HashAlgo::Sha2, 64) => pbkdf2_hmac::<sha2::Sha512>(password, salt, iterations, out),
        (HashAlgo::Sha3, 28) => pbkdf2_hmac::<sha3::Sha3_224>(password, salt, iterations, out),
        (HashAlgo::Sha3, 32) => pbkdf2_hmac::<sha3::Sha3_256>(password, salt, iterations, out),
        (HashAlgo::Sha3, 48) => pbkdf2_hmac::<sha3::Sha3_384>(password, salt, iterations, out),
        (HashAlgo::Sha3, 64) => pbkdf2_hmac::<sha3::Sha3_512>(password, salt, iterations, out),
        (HashAlgo::Blake2b, _) => return Err(ConfigError::NotHmacCapable(HashAlgo::Blake2b)),
        _ => {
            return Err(ConfigError::UnsupportedDigestLength {
                hash: hash.algorithm,
                length: hash.digest_length,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pbkdf2_sha1_rfc6070_vector() {
        let kdf = Kdf::Pbkdf2 {
            hash: HashSpec { algorithm: HashAlgo::Sha1, digest_length: 20 },
            iterations: 1,
        };
        let material = derive(&kdf, b"password", b"salt", 20, 0).unwrap();
        assert_eq!(
            hex::encode(&*material.key),
            "0c60c80f961f0e71f3a9b524af6012062fe037a6"
        );
        assert!(material.iv.is_empty());
    }

    #[test]
    fn pbkdf2_sha256_test_vector() {
        let kdf = Kdf::Pbkdf2 {
            hash: HashSpec { algorithm: HashAlgo::Sha2, digest_length: 32 },
            iterations: 1,
        };
        let material = derive(&kdf, b"password", b"salt", 32, 0).unwrap();
        assert_eq!(
            hex::encode(&*material.key),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn scrypt_rfc7914_vector() {
        let kdf = Kdf::Scrypt { n: 16, r: 1, p: 1 };
        let material = derive(&kdf, b"", b"", 64, 0).unwrap();
        assert_eq!(
            hex::encode(&*material.key),
            "77d6576238657b203b19ca42c18a0497f16b4844e3074ae8dfdffa3fede21442\
             fcd0069ded0948f8326a753a0fc81f17e8d3e0fb2e0d3628cf35e20c38d18906"
        );
    }

    #[test]
    fn bcrypt_is_deterministic_and_cost_sensitive() {
        let salt = [7u8; 16];
        let a = derive(&Kdf::Bcrypt { cost: 4 }, b"pw", &salt, 32, 0).unwrap();
        let b = derive(&Kdf::Bcrypt { cost: 4 }, b"pw", &salt, 32, 0).unwrap();
        let c = derive(&Kdf::Bcrypt { cost: 5 }, b"pw", &salt, 32, 0).unwrap();
        assert_eq!(*a.key, *b.key);
        assert_ne!(*a.key, *c.key);
    }

    #[test]
    fn bcrypt_rejects_wrong_salt_length() {
        let err = derive(&Kdf::Bcrypt { cost: 4 }, b"pw", &[0u8; 8], 32, 0).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::BcryptSaltLength(8))
        );
    }

    #[test]
    fn derived_iv_is_the_tail_of_one_expanded_pass() {
        let kdf = Kdf::Pbkdf2 {
            hash: HashSpec::default(),
            iterations: 2,
        };
        let split = derive(&kdf, b"pw", b"0123456789abcdef", 32, 16).unwrap();
        let flat = derive(&kdf, b"pw", b"0123456789abcdef", 48, 0).unwrap();
        assert_eq!(split.key.len(), 32);
        assert_eq!(split.iv.len(), 16);
        assert_eq!(&flat.key[..32], &split.key[..]);
        assert_eq!(&flat.key[32..], &split.iv[..]);
    }

    #[test]
    fn scrypt_n_must_be_a_power_of_two() {
        let err = Kdf::Scrypt { n: 1000, r: 8, p: 1 }.validate().unwrap_err();
        assert_eq!(err, ConfigError::ScryptParam { name: "N", value: 1000 });
        assert!(Kdf::Scrypt { n: 1024, r: 8, p: 1 }.validate().is_ok());
    }

    #[test]
    fn out_of_range_parameters_fail_before_any_work() {
        assert!(Kdf::Pbkdf2 { hash: HashSpec::default(), iterations: 0 }.validate().is_err());
        assert!(Kdf::Bcrypt { cost: 3 }.validate().is_err());
        assert!(Kdf::Bcrypt { cost: 25 }.validate().is_err());
        assert!(Kdf::Scrypt { n: 16384, r: 0, p: 1 }.validate().is_err());
        assert!(Kdf::Scrypt { n: 16384, r: 8, p: 300 }.validate().is_err());
        let bad_digest = HashSpec { algorithm: HashAlgo::Sha2, digest_length: 20 };
        assert!(Kdf::Pbkdf2 { hash: bad_digest, iterations: 1000 }.validate().is_err());
        let blake = HashSpec { algorithm: HashAlgo::Blake2b, digest_length: 64 };
        assert!(Kdf::Pbkdf2 { hash: blake, iterations: 1000 }.validate().is_err());
    }

    #[test]
    fn salt_editable_only_outside_bcrypt() {
        assert!(Kdf::default().salt_editable());
        assert!(!Kdf::Bcrypt { cost: 8 }.salt_editable());
        assert!(Kdf::Scrypt { n: 2, r: 1, p: 1 }.salt_editable());
    }
}
