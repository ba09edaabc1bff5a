//!
//! Error types emitted by the seed derivation engine.
//!

use crate::seed::SeedId;
use thiserror::Error;

/// [`Error`](enum@Error) variants emitted by seed derivation.
#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum Error {
    #[error("invalid seed length: {0} bits")]
    SeedLength(usize),

    #[error("seed length mismatch: {0} bytes vs {1} bytes")]
    LengthMismatch(usize, usize),

    #[error("nonce space exhausted while deriving {0}")]
    NonceRangeExceeded(&'static str),

    #[error("duplicate seed ID {0}")]
    DuplicateId(SeedId),

    #[error("derived seed table is corrupt at ID {0}")]
    TableCorrupt(SeedId),

    #[error("subseed index {0} out of range (1..=1000000)")]
    SubSeedIdxRange(u64),

    #[error("malformed subseed index spec {0:?}")]
    SubSeedIdxSpec(String),

    #[error("malformed seed ID {0:?}")]
    InvalidSeedId(String),

    #[error("share count {0} out of range (2..=1024)")]
    ShareCount(u32),

    #[error("share index {0} out of range (1..={1})")]
    ShareIndex(u16, u16),

    #[error("master share index {0} out of range (1..=1024)")]
    MasterShareIndex(u16),

    #[error("cannot join an empty share list")]
    NoShares,
}
