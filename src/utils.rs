//! Byte and base64 codecs, secure randomness, and prime-field inversion

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use rand::{thread_rng, RngCore};

use crate::error::{CryptoError, Result};

/// Encode a nonnegative integer as big-endian bytes in minimum
/// two's-complement form: a leading zero byte is added when the top bit of
/// the magnitude is set, matching the common bignum `toByteArray`
/// convention.
pub fn biguint_to_bytes_be(value: &BigUint) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    if bytes.is_empty() {
        return vec![0];
    }
    if bytes[0] & 0x80 != 0 {
        let mut padded = Vec::with_capacity(bytes.len() + 1);
        padded.push(0);
        padded.extend_from_slice(&bytes);
        padded
    } else {
        bytes
    }
}

/// Interpret bytes of any length as a nonnegative big-endian integer.
pub fn bytes_be_to_biguint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Encode bytes as RFC 4648 base64 (standard alphabet, `=` padding).
pub fn base64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode RFC 4648 base64 (standard alphabet, `=` padding). The empty
/// string and malformed input are rejected.
pub fn base64_decode(s: &str) -> Result<Vec<u8>> {
    if s.is_empty() {
        return Err(CryptoError::InvalidArgument(
            "empty base64 string".to_string(),
        ));
    }
    STANDARD
        .decode(s)
        .map_err(|e| CryptoError::InvalidArgument(format!("malformed base64: {e}")))
}

/// Draw `count` bytes from a cryptographically secure source.
pub fn random_bytes(count: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; count];
    thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Multiplicative inverse modulo an odd prime, via Fermat's little
/// theorem: `value^(prime - 2) mod prime`. Both group moduli are prime,
/// so zero is the only residue without an inverse; it returns `None`.
pub fn prime_mod_inverse(value: &BigUint, prime: &BigUint) -> Option<BigUint> {
    if (value % prime).is_zero() {
        return None;
    }
    let exponent = prime - BigUint::from(2u8);
    Some(value.modpow(&exponent, prime))
}

/// Little-endian base-2^k digits of `value`, exactly `count` of them.
/// Digit 0 is the least significant `window_bits` bits.
pub(crate) fn radix_digits(value: &BigUint, window_bits: u64, count: usize) -> Vec<usize> {
    let mask = (BigUint::one() << window_bits) - BigUint::one();
    let mut remaining = value.clone();
    let mut digits = Vec::with_capacity(count);
    for _ in 0..count {
        let digit = (&remaining & &mask)
            .to_usize()
            .expect("window digit fits in usize");
        digits.push(digit);
        remaining >>= window_bits as usize;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::ToBigUint;

    #[test]
    fn test_prime_mod_inverse() {
        // The two group moduli; every nonzero residue must invert.
        let p = 65267u64.to_biguint().unwrap();
        let q = 32633u64.to_biguint().unwrap();

        for v in [1u64, 2, 17, 1024, 40000, 65266] {
            let a = v.to_biguint().unwrap();
            let inv = prime_mod_inverse(&a, &p).unwrap();
            assert_eq!(a * inv % &p, BigUint::one());
        }
        for v in [1u64, 2, 5, 31337, 32632] {
            let a = v.to_biguint().unwrap();
            let inv = prime_mod_inverse(&a, &q).unwrap();
            assert_eq!(a * inv % &q, BigUint::one());
        }
    }

    #[test]
    fn test_prime_mod_inverse_of_zero() {
        let p = 65267u64.to_biguint().unwrap();
        assert!(prime_mod_inverse(&BigUint::zero(), &p).is_none());
        // Multiples of the modulus reduce to zero and have no inverse
        // either.
        assert!(prime_mod_inverse(&p, &p).is_none());
    }

    #[test]
    fn test_bytes_round_trip() {
        for v in [0u64, 1, 127, 128, 255, 256, 65266, u64::MAX] {
            let n = v.to_biguint().unwrap();
            let bytes = biguint_to_bytes_be(&n);
            assert_eq!(bytes_be_to_biguint(&bytes), n);
        }
    }

    #[test]
    fn test_twos_complement_leading_zero() {
        // 128 = 0x80 has its top bit set and gains a sign byte.
        let n = 128u32.to_biguint().unwrap();
        assert_eq!(biguint_to_bytes_be(&n), vec![0x00, 0x80]);

        let n = 127u32.to_biguint().unwrap();
        assert_eq!(biguint_to_bytes_be(&n), vec![0x7f]);

        assert_eq!(biguint_to_bytes_be(&BigUint::zero()), vec![0x00]);
    }

    #[test]
    fn test_base64_round_trip() {
        let bytes = vec![0u8, 1, 2, 254, 255];
        let encoded = base64_encode(&bytes);
        assert_eq!(base64_decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_base64_rejects_empty_and_malformed() {
        assert!(base64_decode("").is_err());
        assert!(base64_decode("@@").is_err());
        assert!(base64_decode("-10").is_err());
    }

    #[test]
    fn test_random_bytes_length_and_variation() {
        let a = random_bytes(32);
        let b = random_bytes(32);
        assert_eq!(a.len(), 32);
        // 256-bit collision is not going to happen.
        assert_ne!(a, b);
    }

    #[test]
    fn test_radix_digits() {
        let v = 0xABCDu32.to_biguint().unwrap();
        assert_eq!(radix_digits(&v, 8, 2), vec![0xCD, 0xAB]);
        assert_eq!(radix_digits(&v, 4, 4), vec![0xD, 0xC, 0xB, 0xA]);
        assert_eq!(radix_digits(&v, 16, 1), vec![0xABCD]);
        assert_eq!(radix_digits(&BigUint::zero(), 8, 3), vec![0, 0, 0]);
    }
}
