//!
//! Key and address generation for the supported coin protocols.
//!
//! Private keys come out of the deterministic hash chain as raw 32-byte
//! values; this crate turns them into public keys ([`KeyGenerator`])
//! and payment addresses ([`AddrGenerator`]) according to an explicit
//! [`CoinProtocol`] parameter set. No global protocol state exists:
//! callers construct the protocol table entry they want and pass it in.
//!

pub mod error;
pub mod result;

mod addrgen;
mod address_type;
mod keygen;
mod privkey;
mod protocol;
mod pubkey;
mod zcash;

pub use addrgen::{AddrGenerator, CoinAddr};
pub use address_type::AddressType;
pub use error::Error;
pub use keygen::{Backend, BackendPreference, KeyGenerator, PubkeyScheme};
pub use privkey::{PrivateKey, KEY_BYTES};
pub use protocol::{BaseCoin, CoinProtocol};
pub use pubkey::PublicKey;
pub use result::Result;
