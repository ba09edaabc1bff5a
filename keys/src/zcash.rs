//!
//! Zcash shielded address key hashing.
//!
//! The viewing-key halves of a z-address are produced by one raw
//! application of the SHA-256 compression function (no padding) over a
//! 64-byte block holding the spending key with its top two bits forced
//! on and a domain byte at offset 32.
//!

use curve25519_dalek::MontgomeryPoint;
use sha2::compress256;
use sha2::digest::generic_array::GenericArray;
use zeroize::Zeroize;

/// SHA-256 initial state.
const H256: [u32; 8] = [0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19];

/// One unpadded SHA-256 compression over the prepared key block.
pub(crate) fn zhash256(key: &[u8; 32], t: u8) -> [u8; 32] {
    let mut block = [0u8; 64];
    block[..32].copy_from_slice(key);
    block[0] |= 0xc0;
    block[32] = t;
    let mut state = H256;
    compress256(&mut state, &[*GenericArray::from_slice(&block)]);
    block.zeroize();
    let mut out = [0u8; 32];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// X25519 base-point multiplication (with the standard clamping), for
/// the second z-address half.
pub(crate) fn x25519_base(scalar: [u8; 32]) -> [u8; 32] {
    MontgomeryPoint::mul_base_clamped(scalar).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn zhash_vectors() {
        let key = hex!("e09dcd0d5b1e73928f6f46679be7cea8710f87b92eaf52b7d62759e435dea3eb");
        assert_eq!(zhash256(&key, 0), hex!("6c035e259942635be8410993732a6a01285c264c4bfacf9e2a6b2aa5208984fc"));
        assert_eq!(zhash256(&key, 1), hex!("64e7c770e59843da4b236c77852206c09504d9528111f5aa4025872c25f3bb72"));
    }

    #[test]
    fn x25519_vectors() {
        assert_eq!(
            x25519_base(hex!("64e7c770e59843da4b236c77852206c09504d9528111f5aa4025872c25f3bb72")),
            hex!("3b6379936287c02f68f9cc6485f1efbea4bbd56ee1804a78cc50b192b80c055d")
        );
        // RFC 7748 style sanity check: base mult of the clamped scalar 1.
        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(x25519_base(one), hex!("a4e09292b651c278b9772c569f5fa9bb13d906b46ab68c9df9dc2b4409f8a209"));
    }
}
