//!
//! Deterministic address, key and password list generation.
//!
//! A cooked seed (the master seed scrambled with a per-coin,
//! per-address-type key) feeds a SHA-512 hash chain whose rounds yield
//! the private keys of a wallet. Lists of addresses, keys or passwords
//! are materialized for an explicit set of 1-based indices and carry a
//! human-comparable checksum.
//!

pub mod error;
pub mod result;

mod chain;
mod chksum;
mod idx;
mod list;
mod passwd;

pub use chain::cook_seed;
pub use error::Error;
pub use idx::{format_ranges, AddrIdxList, MAX_ADDR_IDX, MAX_IDX_ENTRIES};
pub use list::{AddrList, AddrListEntry, GenMode};
pub use passwd::{PasswordEntry, PasswordFormat, PasswordList};
pub use result::Result;
