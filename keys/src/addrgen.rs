//!
//! Address generation.
//!
//! An [`AddrGenerator`] binds one [`AddressType`] to one
//! [`CoinProtocol`] and turns public keys into payment addresses. The
//! pairing is validated at construction, so a generator can never emit
//! an address its protocol does not support.
//!

use crate::address_type::AddressType;
use crate::error::Error;
use crate::protocol::CoinProtocol;
use crate::pubkey::PublicKey;
use crate::result::Result;
use crate::zcash;
use bech32::Hrp;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;
use std::fmt;

/// A rendered payment address.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct CoinAddr {
    text: String,
}

impl CoinAddr {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for CoinAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// RIPEMD-160 over SHA-256, the standard pubkey/script hash.
fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

/// Generates addresses of one type under one protocol.
pub struct AddrGenerator {
    addr_type: AddressType,
    proto: CoinProtocol,
}

impl AddrGenerator {
    pub fn new(proto: CoinProtocol, addr_type: AddressType) -> Result<Self> {
        if !proto.supports(addr_type) {
            return Err(Error::UnsupportedAddressType(addr_type, proto.name()));
        }
        Ok(AddrGenerator { addr_type, proto })
    }

    pub fn addr_type(&self) -> AddressType {
        self.addr_type
    }

    pub fn proto(&self) -> &CoinProtocol {
        &self.proto
    }

    pub fn address(&self, pubkey: &PublicKey) -> Result<CoinAddr> {
        match self.addr_type {
            AddressType::Legacy | AddressType::Compressed => self.p2pkh(pubkey),
            AddressType::Segwit => self.p2sh_p2wpkh(pubkey),
            AddressType::Bech32 => self.segwit_v0(pubkey),
            AddressType::Ethereum => self.ethereum(pubkey),
            AddressType::ZcashZ => self.zcash_z(pubkey),
        }
    }

    /// The P2SH redeem script for a wrapped-segwit address. Rejected
    /// for every other address type.
    pub fn redeem_script(&self, pubkey: &PublicKey) -> Result<Vec<u8>> {
        if self.addr_type != AddressType::Segwit {
            return Err(Error::RedeemScriptUnsupported(self.addr_type));
        }
        let mut script = vec![0x00, 0x14];
        script.extend_from_slice(&hash160(self.require_compressed(pubkey)?));
        Ok(script)
    }

    fn require_compressed<'a>(&self, pubkey: &'a PublicKey) -> Result<&'a [u8]> {
        if !pubkey.is_compressed() {
            return Err(Error::CompressedKeyRequired(self.addr_type));
        }
        Ok(pubkey.as_bytes())
    }

    fn base58check(&self, version: &[u8], payload: &[u8]) -> CoinAddr {
        let mut data = version.to_vec();
        data.extend_from_slice(payload);
        CoinAddr { text: bs58::encode(data).with_check().into_string() }
    }

    fn p2pkh(&self, pubkey: &PublicKey) -> Result<CoinAddr> {
        Ok(self.base58check(self.proto.p2pkh_version(), &hash160(pubkey.as_bytes())))
    }

    fn p2sh_p2wpkh(&self, pubkey: &PublicKey) -> Result<CoinAddr> {
        let script = self.redeem_script(pubkey)?;
        Ok(self.base58check(self.proto.p2sh_version(), &hash160(&script)))
    }

    fn segwit_v0(&self, pubkey: &PublicKey) -> Result<CoinAddr> {
        let program = hash160(self.require_compressed(pubkey)?);
        // Guaranteed by the protocol constructors for every
        // bech32-capable coin.
        let hrp = Hrp::parse(self.proto.bech32_hrp().unwrap_or_default())?;
        let text = bech32::segwit::encode_v0(hrp, &program)?;
        Ok(CoinAddr { text })
    }

    fn ethereum(&self, pubkey: &PublicKey) -> Result<CoinAddr> {
        if pubkey.is_compressed() {
            return Err(Error::UncompressedKeyRequired(self.addr_type));
        }
        // Drop the 0x04 tag, keccak the 64-byte point, keep the low 20
        // bytes.
        let digest: [u8; 32] = Keccak256::digest(&pubkey.as_bytes()[1..]).into();
        Ok(CoinAddr { text: faster_hex::hex_string(&digest[12..]) })
    }

    fn zcash_z(&self, pubkey: &PublicKey) -> Result<CoinAddr> {
        let key: &[u8; 32] = pubkey.as_bytes().try_into().map_err(|_| Error::PublicKeyForm)?;
        let mut payload = self.proto.zaddr_version().to_vec();
        payload.extend_from_slice(&zcash::zhash256(key, 0));
        payload.extend_from_slice(&zcash::x25519_base(zcash::zhash256(key, 1)));
        let addr = CoinAddr { text: bs58::encode(payload).with_check().into_string() };
        if addr.as_str().len() != self.proto.zaddr_width() {
            return Err(Error::AddressWidth(addr.as_str().len(), self.proto.zaddr_width()));
        }
        Ok(addr)
    }
}
