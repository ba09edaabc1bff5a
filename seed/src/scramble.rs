//!
//! The keyed scramble transform underlying every derivation.
//!

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Number of unkeyed hash rounds applied after the keyed step.
pub const SCRAMBLE_ROUNDS: usize = 10;

/// Scramble a seed with a domain-separation key.
///
/// The seed bytes are the HMAC *key* and the domain key is the message,
/// so distinct derivation contexts can never be collapsed by choosing
/// pathological seed data. The HMAC output is then rehashed
/// [`SCRAMBLE_ROUNDS`] times with plain SHA-256. Always returns the full
/// 32-byte digest; callers truncate to the length they need.
pub fn scramble_seed(seed: &[u8], key: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(seed).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(key);
    let mut buf: [u8; 32] = mac.finalize().into_bytes().into();
    for _ in 0..SCRAMBLE_ROUNDS {
        buf = Sha256::digest(buf).into();
    }
    buf
}

/// Double SHA-256, used for seed IDs, private keys and list checksums.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use faster_hex::hex_decode_fallback;

    macro_rules! hex {
        ($str: expr) => {{
            let len = $str.as_bytes().len() / 2;
            let mut dst = vec![0; len];
            dst.resize(len, 0);
            hex_decode_fallback($str.as_bytes(), &mut dst);
            dst
        }};
    }

    const SEED256: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";
    const SEED128: &str = "00112233445566778899aabbccddeeff";

    #[test]
    fn scramble_vectors() {
        let seed256 = hex!(SEED256);
        let seed128 = hex!(SEED128);
        assert_eq!(scramble_seed(&seed256, b"").to_vec(), hex!("394c1fa53048cc7380818fa02f8008a536e4a86a6e58c16edf4fa16700925ebd"));
        assert_eq!(scramble_seed(&seed256, b"foo:bar").to_vec(), hex!("656607f3b1304585a39f86ba7795892aaa946c3728197d7c00dff889eba7153b"));
        assert_eq!(scramble_seed(&seed128, b"segwit").to_vec(), hex!("6ea854fa1b4d24a774d5bfacb556670e2c69720af7a8262b8684286c4987f672"));
    }

    #[test]
    fn scramble_key_separation() {
        let seed = hex!(SEED256);
        assert_ne!(scramble_seed(&seed, b"a"), scramble_seed(&seed, b"b"));
        assert_ne!(scramble_seed(&seed, b""), scramble_seed(&seed[..16], b""));
    }

    #[test]
    fn sha256d_vector() {
        // SHA-256d of the empty string, a widely published constant.
        assert_eq!(sha256d(b"").to_vec(), hex!("5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"));
    }
}
