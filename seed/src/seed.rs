//!
//! Master seed and seed identifier types.
//!

use crate::error::Error;
use crate::result::Result;
use crate::scramble::sha256d;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

/// Supported seed lengths in bits.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum SeedLength {
    Bits128,
    Bits192,
    Bits256,
}

impl SeedLength {
    pub fn bits(self) -> usize {
        match self {
            SeedLength::Bits128 => 128,
            SeedLength::Bits192 => 192,
            SeedLength::Bits256 => 256,
        }
    }

    pub fn byte_len(self) -> usize {
        self.bits() / 8
    }

    pub fn from_byte_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(SeedLength::Bits128),
            24 => Ok(SeedLength::Bits192),
            32 => Ok(SeedLength::Bits256),
            _ => Err(Error::SeedLength(len * 8)),
        }
    }
}

/// Public, non-secret fingerprint of a seed: the first 32 bits of
/// SHA-256d over the seed data, displayed as 8 uppercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeedId(u32);

impl SeedId {
    pub fn of(data: &[u8]) -> Self {
        let digest = sha256d(data);
        SeedId(u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]))
    }
}

impl fmt::Display for SeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl fmt::Debug for SeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedId({:08X})", self.0)
    }
}

impl FromStr for SeedId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidSeedId(s.to_string()));
        }
        u32::from_str_radix(s, 16).map(SeedId).map_err(|_| Error::InvalidSeedId(s.to_string()))
    }
}

/// A master or derived seed: immutable secret bytes plus the
/// [`SeedId`] computed from them. The buffer is wiped on drop.
#[derive(Clone)]
pub struct Seed {
    data: Vec<u8>,
    id: SeedId,
}

impl Seed {
    pub fn new(data: Vec<u8>) -> Result<Self> {
        SeedLength::from_byte_len(data.len())?;
        let id = SeedId::of(&data);
        Ok(Seed { data, id })
    }

    /// Generate a fresh seed from OS randomness. The raw entropy is
    /// whitened through SHA-256 before truncation to the target length.
    pub fn random(length: SeedLength) -> Self {
        let mut entropy = [0u8; 64];
        OsRng.fill_bytes(&mut entropy);
        let digest: [u8; 32] = Sha256::digest(entropy).into();
        entropy.zeroize();
        let data = digest[..length.byte_len()].to_vec();
        let id = SeedId::of(&data);
        Seed { data, id }
    }

    pub fn id(&self) -> SeedId {
        self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    pub fn length(&self) -> SeedLength {
        // Enforced by every constructor.
        SeedLength::from_byte_len(self.data.len()).expect("seed length validated on construction")
    }
}

/// Two seeds are the same wallet iff their IDs match.
impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Seed {}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed {{ id: {}, bits: {} }}", self.id, self.data.len() * 8)
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faster_hex::hex_decode_fallback;

    macro_rules! hex {
        ($str: literal) => {{
            let len = $str.as_bytes().len() / 2;
            let mut dst = vec![0; len];
            dst.resize(len, 0);
            hex_decode_fallback($str.as_bytes(), &mut dst);
            dst
        }};
    }

    #[test]
    fn seed_id_vectors() {
        let seed256 = Seed::new(hex!("00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff")).unwrap();
        let seed128 = Seed::new(hex!("00112233445566778899aabbccddeeff")).unwrap();
        assert_eq!(seed256.id().to_string(), "E54A22F6");
        assert_eq!(seed128.id().to_string(), "C2979480");
        assert_eq!("E54A22F6".parse::<SeedId>().unwrap(), seed256.id());
    }

    #[test]
    fn seed_length_validation() {
        assert_eq!(Seed::new(vec![0u8; 17]).unwrap_err(), Error::SeedLength(136));
        assert_eq!(Seed::new(vec![]).unwrap_err(), Error::SeedLength(0));
        for len in [16, 24, 32] {
            assert_eq!(Seed::new(vec![7u8; len]).unwrap().byte_len(), len);
        }
    }

    #[test]
    fn random_seed_lengths() {
        for length in [SeedLength::Bits128, SeedLength::Bits192, SeedLength::Bits256] {
            let seed = Seed::random(length);
            assert_eq!(seed.byte_len(), length.byte_len());
            assert_eq!(seed.length(), length);
        }
    }

    #[test]
    fn seed_identity_is_the_id() {
        let a = Seed::new(vec![1u8; 16]).unwrap();
        let b = Seed::new(vec![1u8; 16]).unwrap();
        let c = Seed::new(vec![2u8; 16]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn bad_seed_id_specs() {
        assert!("E54A22F".parse::<SeedId>().is_err());
        assert!("E54A22F6X".parse::<SeedId>().is_err());
        assert!("E54A22GG".parse::<SeedId>().is_err());
    }
}
