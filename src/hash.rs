//! Hashing of group elements
//!
//! SHA-256 over canonical byte encodings, reduced into the exponent ring.
//! Used for ciphertext digests; callers supply the byte encodings in the
//! order they should be absorbed.

use sha2::{Digest, Sha256};

use crate::element::ElementModQ;
use crate::group::GroupContext;

const DOMAIN_SEPARATOR: &[u8] = b"EGCORE_HASH_ELEMS";

/// Absorb each part in order, add the domain separator, and reduce the
/// digest mod Q.
pub fn hash_parts(context: &'static GroupContext, parts: &[&[u8]]) -> ElementModQ {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.update(DOMAIN_SEPARATOR);
    let digest = hasher.finalize();
    context.safe_binary_to_element_mod_q(&digest, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::test_group_context;
    use crate::powradix::PowRadixOption;

    #[test]
    fn test_hash_is_deterministic() {
        let ctx = test_group_context(PowRadixOption::NoAcceleration);
        let a = hash_parts(ctx, &[b"pad", b"data"]);
        let b = hash_parts(ctx, &[b"pad", b"data"]);
        assert_eq!(a, b);
        assert!(a.in_bounds());
    }

    #[test]
    fn test_hash_distinguishes_inputs() {
        let ctx = test_group_context(PowRadixOption::NoAcceleration);
        let a = hash_parts(ctx, &[b"pad", b"data"]);
        let b = hash_parts(ctx, &[b"pad", b"atad"]);
        assert_ne!(a, b);
    }
}
