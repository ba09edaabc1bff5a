//!
//! Deterministic seed derivation for cold-storage wallets.
//!
//! A single master [`Seed`] deterministically yields a whole family of
//! subwallet seeds ([`SubSeedList`]) and XOR-based secret-sharing share
//! sets ([`SeedShareList`]). Every derivation flows through the same
//! keyed [`scramble_seed`] transform, so a master seed plus a handful of
//! integer parameters is always sufficient to reproduce the entire tree.
//!

pub mod error;
pub mod result;

mod scramble;
mod seed;
mod share;
mod subseed;

pub use error::Error;
pub use result::Result;
pub use scramble::{scramble_seed, sha256d, SCRAMBLE_ROUNDS};
pub use seed::{Seed, SeedId, SeedLength};
pub use share::{join_shares, join_shares_with_master, MasterShare, SeedShareList, MAX_MASTER_IDX, MAX_SHARE_COUNT, SPLIT_LABEL};
pub use subseed::{SubSeed, SubSeedIdx, SubSeedLength, SubSeedList, DEFAULT_ID_SEARCH_CEILING, MAX_NONCE, MAX_SUBSEED_IDX};
