//!
//! Public key derivation backends.
//!
//! Two interchangeable secp256k1 implementations are supported: the
//! accelerated C library and a pure-Rust fallback. The choice is made
//! once, at construction, from an explicit preference plus a self-test
//! of the accelerated backend; nothing is probed again afterwards.
//!

use crate::error::Error;
use crate::privkey::PrivateKey;
use crate::pubkey::PublicKey;
use crate::result::Result;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a private key maps to a public key.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PubkeyScheme {
    /// secp256k1 point multiplication.
    Standard,
    /// No public key exists; the private key passes through to the
    /// z-address hasher.
    ZcashZ,
}

impl fmt::Display for PubkeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PubkeyScheme::Standard => "standard",
            PubkeyScheme::ZcashZ => "zcash_z",
        })
    }
}

/// The backend actually in use after resolution.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Backend {
    /// Accelerated C implementation (libsecp256k1).
    Native,
    /// Pure-Rust arithmetic.
    Pure,
}

/// Caller preference for backend resolution.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BackendPreference {
    /// Use the accelerated backend if it passes its self-test.
    #[default]
    Auto,
    Native,
    Pure,
}

/// Compressed generator point, used as the self-test vector.
const GENERATOR_COMPRESSED: [u8; 33] = [
    0x02, 0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb,
    0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];

fn native_self_test() -> bool {
    let mut one = [0u8; 32];
    one[31] = 1;
    match secp256k1::SecretKey::from_slice(&one) {
        Ok(sk) => secp256k1::PublicKey::from_secret_key_global(&sk).serialize() == GENERATOR_COMPRESSED,
        Err(_) => false,
    }
}

/// Derives public keys under one scheme with one resolved backend.
pub struct KeyGenerator {
    scheme: PubkeyScheme,
    backend: Backend,
}

impl KeyGenerator {
    pub fn new(scheme: PubkeyScheme, preference: BackendPreference) -> Self {
        let backend = match preference {
            BackendPreference::Native => Backend::Native,
            BackendPreference::Pure => Backend::Pure,
            BackendPreference::Auto => {
                if native_self_test() {
                    Backend::Native
                } else {
                    log::warn!("accelerated secp256k1 backend failed its self-test, falling back to pure-Rust arithmetic");
                    Backend::Pure
                }
            }
        };
        log::debug!("key generator: scheme {}, backend {:?}", scheme, backend);
        KeyGenerator { scheme, backend }
    }

    pub fn scheme(&self) -> PubkeyScheme {
        self.scheme
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Serialize the public key of `key`, compressed or not according
    /// to the key's own flag.
    pub fn public_key(&self, key: &PrivateKey) -> Result<PublicKey> {
        if key.scheme() != self.scheme {
            return Err(Error::SchemeMismatch(key.scheme(), self.scheme));
        }
        match self.scheme {
            PubkeyScheme::ZcashZ => Ok(PublicKey::passthrough(key)),
            PubkeyScheme::Standard => match self.backend {
                Backend::Native => native_public_key(key),
                Backend::Pure => pure_public_key(key),
            },
        }
    }
}

fn native_public_key(key: &PrivateKey) -> Result<PublicKey> {
    let sk = secp256k1::SecretKey::from_slice(key.as_bytes())?;
    let pk = secp256k1::PublicKey::from_secret_key_global(&sk);
    if key.compressed() {
        PublicKey::from_slice(&pk.serialize())
    } else {
        PublicKey::from_slice(&pk.serialize_uncompressed())
    }
}

fn pure_public_key(key: &PrivateKey) -> Result<PublicKey> {
    let sk = k256::SecretKey::from_slice(key.as_bytes())?;
    let point = sk.public_key().to_encoded_point(key.compressed());
    PublicKey::from_slice(point.as_bytes())
}
