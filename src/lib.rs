//! # Exponential ElGamal election crypto core
//!
//! This library provides the cryptographic core of an additively
//! homomorphic election encryption scheme:
//!
//! - **Group arithmetic** over a 4096-bit prime P and its 256-bit
//!   prime-order subgroup, with immutable [`ElementModP`] / [`ElementModQ`]
//!   values tied to a shared [`GroupContext`]
//! - **Pow-radix acceleration**: table-driven fixed-base exponentiation
//!   with selectable memory tiers, bit-exact with the generic `modpow`
//! - **Exponential ElGamal**: keypairs, encryption, homomorphic addition,
//!   and threshold partial decryption
//! - **A memoized discrete-log solver** shared by all decryptions in a
//!   context
//!
//! ## Example
//!
//! ```rust
//! use egcore::{test_group_context, Keypair, PowRadixOption};
//!
//! // Contexts are process-wide singletons per (parameter-set, tier).
//! let ctx = test_group_context(PowRadixOption::NoAcceleration);
//! let keypair = Keypair::random(ctx);
//!
//! // Encrypt two tallies and add them without decrypting.
//! let ct1 = keypair.public_key.encrypt(10).unwrap();
//! let ct2 = keypair.public_key.encrypt(20).unwrap();
//! let sum = (&ct1 + &ct2).unwrap();
//!
//! assert_eq!(keypair.secret_key.decrypt(&sum).unwrap(), Some(30));
//! ```

pub mod constants;
pub mod dlog;
pub mod element;
pub mod elgamal;
pub mod error;
pub mod group;
pub mod hash;
pub mod powradix;
pub mod utils;

// Re-export main types for convenience
pub use constants::DLOG_MAX_EXPONENT;
pub use element::{ElementModP, ElementModQ};
pub use elgamal::{
    ciphertext_sum, combine_partial_decryptions, Ciphertext, Keypair, PublicKey, SecretKey,
};
pub use error::{CryptoError, Result};
pub use group::{production_group_context, test_group_context, GroupContext};
pub use hash::hash_parts;
pub use powradix::{PowRadix, PowRadixOption};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_basic_workflow() {
        let ctx = test_group_context(PowRadixOption::NoAcceleration);
        let keypair = Keypair::random(ctx);

        let ct = keypair.public_key.encrypt(42).unwrap();
        let decrypted = keypair.secret_key.decrypt(&ct).unwrap();

        assert_eq!(decrypted, Some(42));
    }
}
