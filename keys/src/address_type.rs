//!
//! Address types selectable per generated list.
//!

use crate::keygen::PubkeyScheme;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The address encodings a protocol may offer. Each type fixes both the
/// public key form fed into hashing and the final address encoding.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    /// Pay-to-pubkey-hash of an uncompressed public key.
    Legacy,
    /// Pay-to-pubkey-hash of a compressed public key.
    Compressed,
    /// P2SH-wrapped segwit (the compatibility form).
    Segwit,
    /// Native segwit v0.
    Bech32,
    /// Ethereum account address.
    Ethereum,
    /// Zcash shielded (z-address).
    ZcashZ,
}

impl AddressType {
    pub fn name(self) -> &'static str {
        match self {
            AddressType::Legacy => "legacy",
            AddressType::Compressed => "compressed",
            AddressType::Segwit => "segwit",
            AddressType::Bech32 => "bech32",
            AddressType::Ethereum => "ethereum",
            AddressType::ZcashZ => "zcash_z",
        }
    }

    /// One-letter code used in list IDs and filenames.
    pub fn code(self) -> char {
        match self {
            AddressType::Legacy => 'L',
            AddressType::Compressed => 'C',
            AddressType::Segwit => 'S',
            AddressType::Bech32 => 'B',
            AddressType::Ethereum => 'E',
            AddressType::ZcashZ => 'Z',
        }
    }

    /// Whether keys of this type use the compressed public key form.
    pub fn is_compressed(self) -> bool {
        matches!(self, AddressType::Compressed | AddressType::Segwit | AddressType::Bech32)
    }

    pub fn pubkey_scheme(self) -> PubkeyScheme {
        match self {
            AddressType::ZcashZ => PubkeyScheme::ZcashZ,
            _ => PubkeyScheme::Standard,
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either the full name (`"segwit"`) or the one-letter code
/// (`"S"`).
impl FromStr for AddressType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" | "L" => Ok(AddressType::Legacy),
            "compressed" | "C" => Ok(AddressType::Compressed),
            "segwit" | "S" => Ok(AddressType::Segwit),
            "bech32" | "B" => Ok(AddressType::Bech32),
            "ethereum" | "E" => Ok(AddressType::Ethereum),
            "zcash_z" | "Z" => Ok(AddressType::ZcashZ),
            _ => Err(format!("unrecognized address type {s:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_codes_round_trip() {
        for at in [
            AddressType::Legacy,
            AddressType::Compressed,
            AddressType::Segwit,
            AddressType::Bech32,
            AddressType::Ethereum,
            AddressType::ZcashZ,
        ] {
            assert_eq!(at.name().parse::<AddressType>().unwrap(), at);
            assert_eq!(at.code().to_string().parse::<AddressType>().unwrap(), at);
        }
        assert!("p2pkh".parse::<AddressType>().is_err());
    }

    #[test]
    fn compression_rules() {
        assert!(!AddressType::Legacy.is_compressed());
        assert!(!AddressType::Ethereum.is_compressed());
        assert!(AddressType::Segwit.is_compressed());
        assert_eq!(AddressType::ZcashZ.pubkey_scheme(), PubkeyScheme::ZcashZ);
        assert_eq!(AddressType::Legacy.pubkey_scheme(), PubkeyScheme::Standard);
    }
}
