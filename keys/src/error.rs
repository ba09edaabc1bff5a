//!
//! Error types emitted by key and address generation.
//!

use crate::address_type::AddressType;
use crate::keygen::PubkeyScheme;
use thiserror::Error;

/// [`Error`](enum@Error) variants emitted by key and address generation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid private key length {0}")]
    PrivateKeyLength(usize),

    #[error("invalid public key encoding")]
    PublicKeyForm,

    #[error("address type {0} is not supported by the {1} protocol")]
    UnsupportedAddressType(AddressType, &'static str),

    #[error("address type {0} has no redeem script")]
    RedeemScriptUnsupported(AddressType),

    #[error("address type {0} requires a compressed public key")]
    CompressedKeyRequired(AddressType),

    #[error("address type {0} requires an uncompressed public key")]
    UncompressedKeyRequired(AddressType),

    #[error("generated address has width {0}, expected {1}")]
    AddressWidth(usize, usize),

    #[error("key scheme mismatch: key is {0}, generator expects {1}")]
    SchemeMismatch(PubkeyScheme, PubkeyScheme),

    #[error("protocol {0} has no WIF encoding")]
    WifUnsupported(&'static str),

    #[error("secp256k1 -> {0}")]
    Secp256k1(#[from] secp256k1::Error),

    #[error("elliptic curve -> {0}")]
    EllipticCurve(#[from] k256::elliptic_curve::Error),

    #[error("bech32 -> {0}")]
    Bech32(#[from] bech32::segwit::EncodeError),

    #[error("invalid bech32 hrp -> {0}")]
    Hrp(#[from] bech32::primitives::hrp::Error),
}
