//!
//! Raw private keys as produced by the deterministic hash chain.
//!

use crate::error::Error;
use crate::keygen::PubkeyScheme;
use crate::protocol::CoinProtocol;
use crate::result::Result;
use std::fmt;
use zeroize::Zeroize;

/// Private key length in bytes.
pub const KEY_BYTES: usize = 32;

/// A 32-byte private key plus the attributes that determine how it is
/// rendered: the public key scheme and the compressed flag. Wiped on
/// drop.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    bytes: [u8; KEY_BYTES],
    compressed: bool,
    scheme: PubkeyScheme,
}

impl PrivateKey {
    pub fn from_slice(bytes: &[u8], compressed: bool, scheme: PubkeyScheme) -> Result<Self> {
        let bytes: [u8; KEY_BYTES] = bytes.try_into().map_err(|_| Error::PrivateKeyLength(bytes.len()))?;
        Ok(PrivateKey { bytes, compressed, scheme })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_BYTES] {
        &self.bytes
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub fn scheme(&self) -> PubkeyScheme {
        self.scheme
    }

    pub fn to_hex(&self) -> String {
        faster_hex::hex_string(&self.bytes)
    }

    /// Wallet import format: base58check over the protocol's WIF
    /// version bytes, the key, and a trailing 0x01 for compressed keys.
    /// Only keys of the standard scheme on protocols with WIF version
    /// bytes can be exported this way.
    pub fn to_wif(&self, proto: &CoinProtocol) -> Result<String> {
        if self.scheme != PubkeyScheme::Standard || proto.wif_version().is_empty() {
            return Err(Error::WifUnsupported(proto.name()));
        }
        let mut payload = proto.wif_version().to_vec();
        payload.extend_from_slice(&self.bytes);
        if self.compressed {
            payload.push(0x01);
        }
        let wif = bs58::encode(&payload).with_check().into_string();
        payload.zeroize();
        Ok(wif)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey {{ scheme: {}, compressed: {} }}", self.scheme, self.compressed)
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn wif_vectors() {
        let btc = CoinProtocol::btc();
        let uncomp =
            PrivateKey::from_slice(&hex!("57db517fe2a5d0def4208e622cf1d6b4ec357d9a82ba350d8f1bc41f962b190c"), false, PubkeyScheme::Standard)
                .unwrap();
        assert_eq!(uncomp.to_wif(&btc).unwrap(), "5JUymE2Xddd8GBNw6pQAe4kajXhmSAsHdFmJhTdPEiUnjpuJdJU");

        let comp =
            PrivateKey::from_slice(&hex!("8f51f71631613c2265b362aa5ea444cb6d2a8b77d6133e4137044efd73621bdb"), true, PubkeyScheme::Standard)
                .unwrap();
        assert_eq!(comp.to_wif(&btc).unwrap(), "L22JjaLRUXxTakpxHW5kodVMzQ7DTEyvCuW1RSQCebdwcSeXJhAX");
    }

    #[test]
    fn wif_classic_vector() {
        // The canonical k = 1 example from the WIF documentation.
        let mut bytes = [0u8; KEY_BYTES];
        bytes[31] = 1;
        let key = PrivateKey::from_slice(&bytes, false, PubkeyScheme::Standard).unwrap();
        assert_eq!(key.to_wif(&CoinProtocol::btc()).unwrap(), "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf");
    }

    #[test]
    fn wif_requires_standard_scheme_and_version_bytes() {
        let key = PrivateKey::from_slice(&[7u8; KEY_BYTES], false, PubkeyScheme::ZcashZ).unwrap();
        assert!(matches!(key.to_wif(&CoinProtocol::zec()), Err(Error::WifUnsupported("zec"))));
        let key = PrivateKey::from_slice(&[7u8; KEY_BYTES], false, PubkeyScheme::Standard).unwrap();
        assert!(matches!(key.to_wif(&CoinProtocol::eth()), Err(Error::WifUnsupported("eth"))));
    }

    #[test]
    fn length_validation() {
        assert!(matches!(PrivateKey::from_slice(&[0u8; 31], true, PubkeyScheme::Standard), Err(Error::PrivateKeyLength(31))));
        assert!(matches!(PrivateKey::from_slice(&[0u8; 33], true, PubkeyScheme::Standard), Err(Error::PrivateKeyLength(33))));
    }
}
