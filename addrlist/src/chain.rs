//!
//! Seed cooking and the SHA-512 key chain.
//!

use coldgen_keys::{AddressType, CoinProtocol};
use coldgen_seed::{scramble_seed, sha256d};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

/// Scramble the master seed into the per-list chain seed.
///
/// The scramble key separates every (coin, address type) wallet from
/// every other. Two deliberate compatibility exceptions: BTC-family
/// legacy lists use the seed untouched, and Ethereum-family lists key
/// on the coin name alone since they have a single address type.
pub fn cook_seed(seed: &[u8], proto: &CoinProtocol, addr_type: AddressType) -> Vec<u8> {
    if proto.is_btc_fork() && addr_type == AddressType::Legacy {
        log::debug!("scramble key: (none)");
        return seed.to_vec();
    }
    let key = if proto.is_eth_family() {
        proto.name().to_string()
    } else if proto.is_btc_fork() {
        addr_type.name().to_string()
    } else {
        format!("{}:{}", proto.name(), addr_type.name())
    };
    log::debug!("scramble key: {}", key);
    scramble_seed(seed, key.as_bytes()).to_vec()
}

/// The deterministic key chain: each round rehashes the running state
/// with SHA-512, and the private key of round n is the double SHA-256
/// of the state after n rounds. Strictly forward-only; there are no
/// shortcuts into the chain.
pub(crate) struct HashChain {
    state: Vec<u8>,
    round: u32,
}

impl HashChain {
    pub fn new(cooked_seed: Vec<u8>) -> Self {
        HashChain { state: cooked_seed, round: 0 }
    }

    /// Advance to round `idx` and return that round's private key
    /// bytes. Indices must be requested in ascending order (repeating
    /// the current round is allowed): earlier states are destroyed as
    /// the chain advances, so a regressed index cannot be served.
    /// Every caller iterates a sorted [`crate::idx::AddrIdxList`],
    /// which guarantees the ordering; debug builds assert it.
    pub fn key_at(&mut self, idx: u32) -> [u8; 32] {
        debug_assert!(idx >= 1 && idx >= self.round);
        while self.round < idx {
            let next = Sha512::digest(&self.state);
            self.state.zeroize();
            self.state = next.to_vec();
            self.round += 1;
        }
        sha256d(&self.state)
    }
}

impl Drop for HashChain {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const SEED256: [u8; 32] = hex!("00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff");
    const SEED128: [u8; 16] = hex!("00112233445566778899aabbccddeeff");

    #[test]
    fn cook_seed_exceptions() {
        // BTC-family legacy lists use the raw seed.
        assert_eq!(cook_seed(&SEED256, &CoinProtocol::btc(), AddressType::Legacy), SEED256);
        assert_eq!(cook_seed(&SEED256, &CoinProtocol::bch(), AddressType::Legacy), SEED256);
        // Everything else scrambles to a 32-byte chain seed.
        let cooked = cook_seed(&SEED128, &CoinProtocol::btc(), AddressType::Segwit);
        assert_eq!(cooked, hex!("6ea854fa1b4d24a774d5bfacb556670e2c69720af7a8262b8684286c4987f672"));
    }

    #[test]
    fn cook_seed_keys_diverge() {
        let raw = cook_seed(&SEED256, &CoinProtocol::btc(), AddressType::Legacy);
        let compressed = cook_seed(&SEED256, &CoinProtocol::btc(), AddressType::Compressed);
        let ltc_legacy = cook_seed(&SEED256, &CoinProtocol::ltc(), AddressType::Legacy);
        let eth = cook_seed(&SEED256, &CoinProtocol::eth(), AddressType::Ethereum);
        let etc = cook_seed(&SEED256, &CoinProtocol::etc(), AddressType::Ethereum);
        assert_ne!(raw, compressed);
        assert_ne!(compressed, ltc_legacy);
        assert_ne!(eth, etc);
    }

    #[test]
    fn chain_key_vectors() {
        let mut chain = HashChain::new(SEED256.to_vec());
        assert_eq!(chain.key_at(1), hex!("57db517fe2a5d0def4208e622cf1d6b4ec357d9a82ba350d8f1bc41f962b190c"));
        assert_eq!(chain.key_at(2), hex!("dc47c218b4d0603888d1681c63a58405b64df2b78eac3369d978fb67644c7314"));
        assert_eq!(chain.key_at(5), hex!("494d284b52d9b975ca7efd9b453eeb0579c7d6f414ec0d84c26e57a9ea302b8e"));
        assert_eq!(chain.key_at(10), hex!("342aa0a60e1acc0fde018dc76dab2a759c3a2f7be969a2206f1e28dbf38faf3b"));
    }

    #[test]
    fn repeating_the_current_round_is_stable() {
        let mut chain = HashChain::new(SEED256.to_vec());
        let key = chain.key_at(3);
        assert_eq!(chain.key_at(3), key);
    }
}
