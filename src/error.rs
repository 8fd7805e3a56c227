//! Error types for the group and ElGamal layers

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Hard failures raised by group arithmetic and ElGamal operations.
///
/// Soft failures ("not representable" results such as an out-of-range
/// strict decode or a discrete log beyond the search cap) are reported as
/// `None`, never as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("value out of range: {0}")]
    OutOfRange(String),

    #[error("incompatible group contexts: {0}")]
    IncompatibleContext(String),

    #[error("no multiplicative inverse: {0}")]
    NoInverse(String),
}
