//! Immutable group elements
//!
//! [`ElementModP`] and [`ElementModQ`] wrap a canonical residue in
//! `[0, P)` / `[0, Q)` together with a reference to the [`GroupContext`]
//! that produced them. Elements are never mutated; arithmetic produces new
//! elements with canonical residues. Binary operators follow the crate
//! convention of returning `Result`, failing with `IncompatibleContext`
//! when the operands' contexts differ in strength.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{CryptoError, Result};
use crate::group::GroupContext;
use crate::powradix::PowRadix;
use crate::utils::{base64_encode, biguint_to_bytes_be, prime_mod_inverse};

/// An element of the multiplicative group mod P.
///
/// May carry its own pow-radix table (installed by [`accelerate_pow`])
/// which is ignored by equality and ordering.
///
/// [`accelerate_pow`]: ElementModP::accelerate_pow
#[derive(Clone)]
pub struct ElementModP {
    value: BigUint,
    context: &'static GroupContext,
    pow_radix: Option<Arc<PowRadix>>,
}

/// An element of the exponent ring mod Q.
#[derive(Clone)]
pub struct ElementModQ {
    value: BigUint,
    context: &'static GroupContext,
}

impl ElementModP {
    /// Wrap a residue already known to be canonical.
    pub(crate) fn new(value: BigUint, context: &'static GroupContext) -> ElementModP {
        ElementModP {
            value,
            context,
            pow_radix: None,
        }
    }

    pub fn context(&self) -> &'static GroupContext {
        self.context
    }

    pub(crate) fn value(&self) -> &BigUint {
        &self.value
    }

    /// True iff the residue lies in `[0, P)`.
    pub fn in_bounds(&self) -> bool {
        &self.value < self.context.modulus()
    }

    /// True iff the residue lies in `[1, P)`.
    pub fn in_bounds_no_zero(&self) -> bool {
        !self.value.is_zero() && self.in_bounds()
    }

    /// True iff this element is a member of the order-Q subgroup, i.e.
    /// reachable as a power of G: in bounds and `self^Q == 1 (mod P)`.
    pub fn is_valid_residue(&self) -> bool {
        self.in_bounds()
            && self
                .value
                .modpow(self.context.q_mod_p().value(), self.context.modulus())
                .is_one()
    }

    /// Big-endian bytes in minimum two's-complement form.
    pub fn bytes(&self) -> Vec<u8> {
        biguint_to_bytes_be(&self.value)
    }

    /// RFC 4648 base64 of [`bytes`](ElementModP::bytes).
    pub fn to_base64(&self) -> String {
        base64_encode(&self.bytes())
    }

    /// Multiplicative inverse mod P. Fails for zero.
    pub fn mult_inv(&self) -> Result<ElementModP> {
        prime_mod_inverse(&self.value, self.context.modulus())
            .map(|inv| ElementModP::new(inv, self.context))
            .ok_or_else(|| CryptoError::NoInverse("residue has no inverse mod P".to_string()))
    }

    /// `self^e mod P`, using this element's pow-radix table when one was
    /// installed by [`accelerate_pow`](ElementModP::accelerate_pow).
    pub fn pow_p(&self, exponent: &ElementModQ) -> Result<ElementModP> {
        self.context.assert_compatible(exponent.context)?;
        match &self.pow_radix {
            Some(radix) => Ok(radix.pow_value(&exponent.value)),
            None => Ok(ElementModP::new(
                self.value.modpow(&exponent.value, self.context.modulus()),
                self.context,
            )),
        }
    }

    /// Return the same element carrying a pow-radix table at the context's
    /// acceleration tier, so that subsequent [`pow_p`](ElementModP::pow_p)
    /// calls are table-driven. The result compares equal to `self`.
    pub fn accelerate_pow(self) -> ElementModP {
        let radix = PowRadix::new(&self, self.context.acceleration());
        ElementModP {
            value: self.value,
            context: self.context,
            pow_radix: Some(Arc::new(radix)),
        }
    }
}

impl ElementModQ {
    pub(crate) fn new(value: BigUint, context: &'static GroupContext) -> ElementModQ {
        ElementModQ { value, context }
    }

    pub fn context(&self) -> &'static GroupContext {
        self.context
    }

    pub(crate) fn value(&self) -> &BigUint {
        &self.value
    }

    /// True iff the residue lies in `[0, Q)`.
    pub fn in_bounds(&self) -> bool {
        &self.value < self.context.subgroup_order()
    }

    /// True iff the residue lies in `[1, Q)`.
    pub fn in_bounds_no_zero(&self) -> bool {
        !self.value.is_zero() && self.in_bounds()
    }

    /// Big-endian bytes in minimum two's-complement form.
    pub fn bytes(&self) -> Vec<u8> {
        biguint_to_bytes_be(&self.value)
    }

    /// RFC 4648 base64 of [`bytes`](ElementModQ::bytes).
    pub fn to_base64(&self) -> String {
        base64_encode(&self.bytes())
    }

    /// Multiplicative inverse mod Q. Fails for zero.
    pub fn mult_inv(&self) -> Result<ElementModQ> {
        prime_mod_inverse(&self.value, self.context.subgroup_order())
            .map(|inv| ElementModQ::new(inv, self.context))
            .ok_or_else(|| CryptoError::NoInverse("residue has no inverse mod Q".to_string()))
    }
}

impl PartialEq for ElementModP {
    fn eq(&self, other: &Self) -> bool {
        self.context.compatible_with(other.context) && self.value == other.value
    }
}

impl Eq for ElementModP {}

impl PartialOrd for ElementModP {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.context.compatible_with(other.context) {
            Some(self.value.cmp(&other.value))
        } else {
            None
        }
    }
}

impl PartialEq for ElementModQ {
    fn eq(&self, other: &Self) -> bool {
        self.context.compatible_with(other.context) && self.value == other.value
    }
}

impl Eq for ElementModQ {}

impl PartialOrd for ElementModQ {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.context.compatible_with(other.context) {
            Some(self.value.cmp(&other.value))
        } else {
            None
        }
    }
}

impl fmt::Debug for ElementModP {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementModP")
            .field("value", &self.value)
            .finish()
    }
}

impl fmt::Debug for ElementModQ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementModQ")
            .field("value", &self.value)
            .finish()
    }
}

impl Add<&ElementModP> for &ElementModP {
    type Output = Result<ElementModP>;

    fn add(self, rhs: &ElementModP) -> Self::Output {
        self.context.assert_compatible(rhs.context)?;
        let p = self.context.modulus();
        Ok(ElementModP::new((&self.value + &rhs.value) % p, self.context))
    }
}

impl Sub<&ElementModP> for &ElementModP {
    type Output = Result<ElementModP>;

    fn sub(self, rhs: &ElementModP) -> Self::Output {
        self.context.assert_compatible(rhs.context)?;
        let p = self.context.modulus();
        // Euclidean residue: both operands are < p, so adding p first
        // keeps the difference nonnegative.
        Ok(ElementModP::new(
            (&self.value + p - &rhs.value) % p,
            self.context,
        ))
    }
}

impl Mul<&ElementModP> for &ElementModP {
    type Output = Result<ElementModP>;

    fn mul(self, rhs: &ElementModP) -> Self::Output {
        self.context.assert_compatible(rhs.context)?;
        let p = self.context.modulus();
        Ok(ElementModP::new((&self.value * &rhs.value) % p, self.context))
    }
}

impl Neg for &ElementModP {
    type Output = ElementModP;

    fn neg(self) -> Self::Output {
        let p = self.context.modulus();
        ElementModP::new((p - &self.value) % p, self.context)
    }
}

impl Div<&ElementModP> for &ElementModP {
    type Output = Result<ElementModP>;

    fn div(self, rhs: &ElementModP) -> Self::Output {
        let inv = rhs.mult_inv()?;
        self * &inv
    }
}

impl Add<&ElementModQ> for &ElementModQ {
    type Output = Result<ElementModQ>;

    fn add(self, rhs: &ElementModQ) -> Self::Output {
        self.context.assert_compatible(rhs.context)?;
        let q = self.context.subgroup_order();
        Ok(ElementModQ::new((&self.value + &rhs.value) % q, self.context))
    }
}

impl Sub<&ElementModQ> for &ElementModQ {
    type Output = Result<ElementModQ>;

    fn sub(self, rhs: &ElementModQ) -> Self::Output {
        self.context.assert_compatible(rhs.context)?;
        let q = self.context.subgroup_order();
        Ok(ElementModQ::new(
            (&self.value + q - &rhs.value) % q,
            self.context,
        ))
    }
}

impl Mul<&ElementModQ> for &ElementModQ {
    type Output = Result<ElementModQ>;

    fn mul(self, rhs: &ElementModQ) -> Self::Output {
        self.context.assert_compatible(rhs.context)?;
        let q = self.context.subgroup_order();
        Ok(ElementModQ::new((&self.value * &rhs.value) % q, self.context))
    }
}

impl Neg for &ElementModQ {
    type Output = ElementModQ;

    fn neg(self) -> Self::Output {
        let q = self.context.subgroup_order();
        ElementModQ::new((q - &self.value) % q, self.context)
    }
}

impl Div<&ElementModQ> for &ElementModQ {
    type Output = Result<ElementModQ>;

    fn div(self, rhs: &ElementModQ) -> Self::Output {
        let inv = rhs.mult_inv()?;
        self * &inv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{production_group_context, test_group_context, GroupContext};
    use crate::powradix::PowRadixOption;

    fn ctx() -> &'static GroupContext {
        test_group_context(PowRadixOption::NoAcceleration)
    }

    fn q_elem(v: u64) -> ElementModQ {
        ctx().u64_to_element_mod_q(v).unwrap()
    }

    fn p_elem(v: u64) -> ElementModP {
        ctx().u64_to_element_mod_p(v).unwrap()
    }

    #[test]
    fn test_additive_group_laws_mod_q() {
        let zero = ctx().zero_mod_q().clone();
        let samples = [0u64, 1, 2, 17, 1024, 32632];

        for &av in &samples {
            let a = q_elem(av);
            assert_eq!((&a + &zero).unwrap(), a);
            assert_eq!((&a - &zero).unwrap(), a);
            assert_eq!((&a + &-&a).unwrap(), zero);

            for &bv in &samples {
                let b = q_elem(bv);
                assert_eq!((&a + &b).unwrap(), (&b + &a).unwrap());
                assert_eq!((&a - &b).unwrap(), -&(&b - &a).unwrap());

                for &cv in &samples {
                    let c = q_elem(cv);
                    let left = (&(&a + &b).unwrap() + &c).unwrap();
                    let right = (&a + &(&b + &c).unwrap()).unwrap();
                    assert_eq!(left, right);
                }
            }
        }
    }

    #[test]
    fn test_subtraction_is_euclidean() {
        let diff = (&q_elem(2) - &q_elem(5)).unwrap();
        assert_eq!(diff, q_elem(32633 - 3));
        assert!(diff.in_bounds());
    }

    #[test]
    fn test_multiplicative_laws() {
        let samples = [1u64, 2, 3, 17, 1024, 32632];

        for &av in &samples {
            let a = q_elem(av);
            assert_eq!((&a * ctx().one_mod_q()).unwrap(), a);
            assert_eq!((&a * &a.mult_inv().unwrap()).unwrap(), *ctx().one_mod_q());
            assert_eq!((&a / &a).unwrap(), *ctx().one_mod_q());

            let ap = p_elem(av);
            assert_eq!((&ap * ctx().one_mod_p()).unwrap(), ap);
            assert_eq!((&ap / &ap).unwrap(), *ctx().one_mod_p());

            for &bv in &samples {
                let b = q_elem(bv);
                assert_eq!((&a * &b).unwrap(), (&b * &a).unwrap());

                let bp = p_elem(bv);
                for &cv in &samples {
                    let cp = p_elem(cv);
                    let left = (&(&ap * &bp).unwrap() * &cp).unwrap();
                    let right = (&ap * &(&bp * &cp).unwrap()).unwrap();
                    assert_eq!(left, right);
                }
            }
        }
    }

    #[test]
    fn test_inverse_of_zero_fails() {
        assert!(matches!(
            ctx().zero_mod_q().mult_inv(),
            Err(CryptoError::NoInverse(_))
        ));
        assert!(matches!(
            ctx().zero_mod_p().mult_inv(),
            Err(CryptoError::NoInverse(_))
        ));
        assert!((&p_elem(5) / ctx().zero_mod_p()).is_err());
    }

    #[test]
    fn test_bounds() {
        assert!(ctx().zero_mod_q().in_bounds());
        assert!(!ctx().zero_mod_q().in_bounds_no_zero());
        assert!(ctx().one_mod_q().in_bounds());
        assert!(ctx().one_mod_q().in_bounds_no_zero());
        assert!(ctx().zero_mod_p().in_bounds());
        assert!(!ctx().zero_mod_p().in_bounds_no_zero());
    }

    #[test]
    fn test_valid_residues() {
        // Powers of G land in the order-Q subgroup.
        for _ in 0..20 {
            let e = ctx().random_element_mod_q(0);
            assert!(ctx().g_pow_p(&e).is_valid_residue());
        }
        assert!(ctx().one_mod_p().is_valid_residue());

        // P - 1 has order 2, not Q, and zero is no residue at all.
        assert!(!p_elem(65266).is_valid_residue());
        assert!(!ctx().zero_mod_p().is_valid_residue());
    }

    #[test]
    fn test_exponent_homomorphism() {
        for _ in 0..20 {
            let a = ctx().random_element_mod_q(0);
            let b = ctx().random_element_mod_q(0);
            let lhs = (&ctx().g_pow_p(&a) * &ctx().g_pow_p(&b)).unwrap();
            let rhs = ctx().g_pow_p(&(&a + &b).unwrap());
            assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn test_codec_round_trips() {
        for v in [0u64, 1, 127, 128, 255, 256, 32632] {
            let e = q_elem(v);
            assert_eq!(ctx().binary_to_element_mod_q(&e.bytes()).unwrap(), e);
            assert_eq!(ctx().base64_to_element_mod_q(&e.to_base64()).unwrap(), e);

            let e = p_elem(v);
            assert_eq!(ctx().binary_to_element_mod_p(&e.bytes()).unwrap(), e);
            assert_eq!(ctx().base64_to_element_mod_p(&e.to_base64()).unwrap(), e);
        }
    }

    #[test]
    fn test_ordering_by_residue() {
        assert!(q_elem(1) < q_elem(2));
        assert!(p_elem(100) > p_elem(99));
        assert_eq!(q_elem(7).partial_cmp(&q_elem(7)), Some(Ordering::Equal));
    }

    #[test]
    fn test_incompatible_contexts() {
        let production = production_group_context(PowRadixOption::NoAcceleration);
        let a = ctx().one_mod_q().clone();
        let b = production.one_mod_q().clone();

        assert_ne!(a, b);
        assert!(a.partial_cmp(&b).is_none());
        assert!(matches!(
            &a + &b,
            Err(CryptoError::IncompatibleContext(_))
        ));
        let ap = ctx().g_mod_p().clone();
        let bq = production.one_mod_q().clone();
        assert!(ap.pow_p(&bq).is_err());
    }

    #[test]
    fn test_pow_p_matches_modpow() {
        for _ in 0..10 {
            let base = ctx().g_pow_p(&ctx().random_element_mod_q(0));
            let e = ctx().random_element_mod_q(0);
            let expected = base.value().modpow(e.value(), ctx().modulus());
            assert_eq!(base.pow_p(&e).unwrap().value(), &expected);
        }
    }

    #[test]
    fn test_accelerate_pow_is_transparent() {
        let base = ctx().g_pow_p(&ctx().u64_to_element_mod_q(1234).unwrap());
        let accelerated = base.clone().accelerate_pow();
        assert_eq!(accelerated, base);

        for _ in 0..10 {
            let e = ctx().random_element_mod_q(0);
            assert_eq!(
                accelerated.pow_p(&e).unwrap(),
                base.pow_p(&e).unwrap()
            );
        }
    }
}
