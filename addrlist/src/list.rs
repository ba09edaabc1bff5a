//!
//! Address and key-address list generation.
//!

use crate::chain::{cook_seed, HashChain};
use crate::chksum::list_checksum;
use crate::idx::AddrIdxList;
use crate::result::Result;
use coldgen_keys::Error as KeysError;
use coldgen_keys::{AddrGenerator, AddressType, BackendPreference, CoinAddr, CoinProtocol, KeyGenerator, PrivateKey};
use coldgen_seed::{Seed, SeedId};
use std::fmt;

/// What a generated list carries per index.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GenMode {
    /// Addresses only (the watch-only list).
    Address,
    /// Private keys only. Key-only lists carry no checksum.
    Key,
    /// Address plus private key pairs.
    KeyAddress,
}

/// One generated list entry.
pub struct AddrListEntry {
    idx: u32,
    addr: Option<CoinAddr>,
    sec: Option<PrivateKey>,
    wif: Option<String>,
}

impl AddrListEntry {
    pub fn idx(&self) -> u32 {
        self.idx
    }

    pub fn addr(&self) -> Option<&CoinAddr> {
        self.addr.as_ref()
    }

    pub fn sec(&self) -> Option<&PrivateKey> {
        self.sec.as_ref()
    }

    /// Wallet import string: WIF where the protocol defines it, plain
    /// hex otherwise (Ethereum family, shielded Zcash keys).
    pub fn wif(&self) -> Option<&str> {
        self.wif.as_deref()
    }
}

/// A deterministic list of addresses and/or keys for one master seed,
/// one protocol and one address type.
pub struct AddrList {
    proto: CoinProtocol,
    addr_type: AddressType,
    seed_id: SeedId,
    mode: GenMode,
    entries: Vec<AddrListEntry>,
    chksum: Option<String>,
}

impl AddrList {
    /// Generate entries for every index in `idxs`, in one ascending
    /// pass over the key chain.
    pub fn generate(
        seed: &Seed,
        proto: &CoinProtocol,
        addr_type: AddressType,
        idxs: &AddrIdxList,
        mode: GenMode,
        preference: BackendPreference,
    ) -> Result<Self> {
        let addrgen = AddrGenerator::new(proto.clone(), addr_type)?;
        let keygen = KeyGenerator::new(addr_type.pubkey_scheme(), preference);
        let mut chain = HashChain::new(cook_seed(seed.data(), proto, addr_type));
        let mut entries = Vec::with_capacity(idxs.len());
        for &idx in idxs.iter() {
            let sec = PrivateKey::from_slice(&chain.key_at(idx), addr_type.is_compressed(), addr_type.pubkey_scheme())?;
            let addr = match mode {
                GenMode::Key => None,
                GenMode::Address | GenMode::KeyAddress => Some(addrgen.address(&keygen.public_key(&sec)?)?),
            };
            let (sec, wif) = match mode {
                GenMode::Address => (None, None),
                GenMode::Key | GenMode::KeyAddress => {
                    let wif = match sec.to_wif(proto) {
                        Ok(wif) => wif,
                        Err(KeysError::WifUnsupported(_)) => sec.to_hex(),
                        Err(e) => return Err(e.into()),
                    };
                    (Some(sec), Some(wif))
                }
            };
            log::debug!("generated entry {} for {}:{}", idx, proto.name(), addr_type);
            entries.push(AddrListEntry { idx, addr, sec, wif });
        }
        let mut list = AddrList { proto: proto.clone(), addr_type, seed_id: seed.id(), mode, entries, chksum: None };
        list.chksum = list.compute_chksum();
        Ok(list)
    }

    fn compute_chksum(&self) -> Option<String> {
        let records = match self.mode {
            GenMode::Key => return None,
            GenMode::Address => self
                .entries
                .iter()
                .map(|e| format!("{} {}", e.idx, e.addr.as_ref().map(|a| a.as_str()).unwrap_or_default()))
                .collect::<Vec<_>>(),
            GenMode::KeyAddress => self
                .entries
                .iter()
                .map(|e| {
                    format!(
                        "{} {} {}",
                        e.idx,
                        e.addr.as_ref().map(|a| a.as_str()).unwrap_or_default(),
                        e.wif.as_deref().unwrap_or_default()
                    )
                })
                .collect::<Vec<_>>(),
        };
        Some(list_checksum(records))
    }

    pub fn proto(&self) -> &CoinProtocol {
        &self.proto
    }

    pub fn addr_type(&self) -> AddressType {
        self.addr_type
    }

    pub fn seed_id(&self) -> SeedId {
        self.seed_id
    }

    pub fn mode(&self) -> GenMode {
        self.mode
    }

    pub fn entries(&self) -> &[AddrListEntry] {
        &self.entries
    }

    pub fn chksum(&self) -> Option<&str> {
        self.chksum.as_deref()
    }

    /// List identifier: seed ID, coin (omitted for BTC), type code
    /// (omitted for the default legacy/ethereum types) and the index
    /// ranges, e.g. `E54A22F6-LTC-S[1-3,5]`.
    pub fn id_str(&self) -> String {
        let coin = if self.proto.is_eth_family() { self.proto.name().to_uppercase() } else { self.proto.base().name().to_string() };
        let mut s = self.seed_id.to_string();
        if coin != "BTC" {
            s.push('-');
            s.push_str(&coin);
        }
        if !matches!(self.addr_type, AddressType::Legacy | AddressType::Ethereum) {
            s.push('-');
            s.push(self.addr_type.code());
        }
        let idxs: Vec<u32> = self.entries.iter().map(|e| e.idx).collect();
        s.push('[');
        s.push_str(&crate::idx::format_ranges(&idxs));
        s.push(']');
        s
    }
}

impl fmt::Debug for AddrList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddrList {{ id: {}, mode: {:?}, entries: {} }}", self.id_str(), self.mode, self.entries.len())
    }
}
