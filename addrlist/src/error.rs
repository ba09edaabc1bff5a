//!
//! Error types emitted by list generation.
//!

use thiserror::Error;

/// [`Error`](enum@Error) variants emitted by list generation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("seed engine -> {0}")]
    Seed(#[from] coldgen_seed::Error),

    #[error("key engine -> {0}")]
    Keys(#[from] coldgen_keys::Error),

    #[error("empty index list")]
    EmptyIdxList,

    #[error("malformed index spec {0:?}")]
    MalformedIdxSpec(String),

    #[error("index {0} out of range (1..=9999999)")]
    IdxRange(u64),

    #[error("index list too long ({0} entries, max 1000000)")]
    IdxListTooLong(usize),

    #[error("password length {0} out of range for {1} ({2}..={3})")]
    PasswordLength(usize, &'static str, usize, usize),
}
