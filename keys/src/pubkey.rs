//!
//! SEC1-encoded public keys.
//!

use crate::error::Error;
use crate::privkey::PrivateKey;
use crate::result::Result;
use smallvec::SmallVec;
use std::fmt;

/// A serialized public key: 33 bytes compressed (`02`/`03` tag) or
/// 65 bytes uncompressed (`04` tag). For the z-address dummy scheme the
/// payload is the private key itself and must be treated as secret.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    bytes: SmallVec<[u8; 65]>,
}

impl PublicKey {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        match (bytes.len(), bytes.first()) {
            (33, Some(0x02 | 0x03)) | (65, Some(0x04)) => Ok(PublicKey { bytes: SmallVec::from_slice(bytes) }),
            _ => Err(Error::PublicKeyForm),
        }
    }

    /// The z-address scheme has no real public key; the private key
    /// passes through unchanged.
    pub(crate) fn passthrough(key: &PrivateKey) -> Self {
        PublicKey { bytes: SmallVec::from_slice(key.as_bytes()) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_compressed(&self) -> bool {
        self.bytes.len() == 33
    }

    pub fn to_hex(&self) -> String {
        faster_hex::hex_string(&self.bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey {{ len: {} }}", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn encoding_validation() {
        let comp = hex!("028ba3d773e49f97d13a723854d3ecc664bfbfce02b627af4dfc87a38703dd650e");
        assert!(PublicKey::from_slice(&comp).unwrap().is_compressed());
        let uncomp = hex!(
            "048ba3d773e49f97d13a723854d3ecc664bfbfce02b627af4dfc87a38703dd650e\
             bf3f81ae244a12ec2e99e55aeecf0ff9e4f29fb982a37c512c3ea75024fac89e"
        );
        assert!(!PublicKey::from_slice(&uncomp).unwrap().is_compressed());

        assert!(PublicKey::from_slice(&comp[..32]).is_err());
        let mut bad_tag = uncomp;
        bad_tag[0] = 0x05;
        assert!(PublicKey::from_slice(&bad_tag).is_err());
    }
}
