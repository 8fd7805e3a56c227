//! Fixed-base exponentiation acceleration
//!
//! A [`PowRadix`] trades memory for speed when one base is raised to many
//! exponents: it precomputes `base^(c * 2^(k*i)) mod P` for every window
//! row `i` and column `c`, after which any 256-bit exponentiation is one
//! table lookup plus one modular multiplication per row. Results are
//! bit-exact with the generic `modpow`.

use std::fmt;

use num_bigint::BigUint;
use num_traits::One;

use crate::element::{ElementModP, ElementModQ};
use crate::error::Result;
use crate::group::GroupContext;
use crate::utils::radix_digits;

/// Memory tier for pow-radix tables.
///
/// Larger windows store bigger tables and do fewer multiplications per
/// exponentiation. Approximate table sizes for the production group:
///
/// | tier | window bits | entries | memory |
/// |------|-------------|---------|--------|
/// | `NoAcceleration` | - | 0 | 0 |
/// | `LowMemoryUse` | 8 | 32 x 256 | ~4 MB |
/// | `HighMemoryUse` | 12 | 22 x 4096 | ~44 MB |
/// | `ExtremeMemoryUse` | 16 | 16 x 65536 | ~500 MB |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowRadixOption {
    NoAcceleration,
    LowMemoryUse,
    HighMemoryUse,
    ExtremeMemoryUse,
}

impl PowRadixOption {
    /// Window width in bits; zero means no table is stored.
    pub fn window_bits(self) -> u64 {
        match self {
            PowRadixOption::NoAcceleration => 0,
            PowRadixOption::LowMemoryUse => 8,
            PowRadixOption::HighMemoryUse => 12,
            PowRadixOption::ExtremeMemoryUse => 16,
        }
    }
}

/// Precomputed powers of one base element.
///
/// Row 0 holds `base^c` for every window value `c`; each following row
/// holds the same for the base raised to the next `2^k` step, so that an
/// exponent split into little-endian base-`2^k` digits is answered by
/// multiplying one entry per row.
pub struct PowRadix {
    context: &'static GroupContext,
    base: BigUint,
    window_bits: u64,
    table: Vec<Vec<BigUint>>,
}

impl PowRadix {
    /// Build the table for `base` at the given tier. `NoAcceleration`
    /// stores nothing and falls back to `modpow`.
    pub fn new(base: &ElementModP, option: PowRadixOption) -> PowRadix {
        let context = base.context();
        let modulus = context.modulus();
        let window_bits = option.window_bits();

        let table = if window_bits == 0 {
            Vec::new()
        } else {
            let rows = ((context.q_bitlen() + window_bits - 1) / window_bits) as usize;
            let cols = 1usize << window_bits;
            let mut table = Vec::with_capacity(rows);
            let mut row_base = base.value().clone();
            for _ in 0..rows {
                let mut row = Vec::with_capacity(cols);
                row.push(BigUint::one());
                for col in 1..cols {
                    let entry = &row[col - 1] * &row_base % modulus;
                    row.push(entry);
                }
                // The next row's base is this one raised to 2^k.
                let mut squared = row_base;
                for _ in 0..window_bits {
                    squared = &squared * &squared % modulus;
                }
                row_base = squared;
                table.push(row);
            }
            table
        };

        PowRadix {
            context,
            base: base.value().clone(),
            window_bits,
            table,
        }
    }

    /// `base^exponent mod P`, identical to the generic `modpow`.
    pub fn pow(&self, exponent: &ElementModQ) -> Result<ElementModP> {
        self.context.assert_compatible(exponent.context())?;
        Ok(self.pow_value(exponent.value()))
    }

    pub(crate) fn pow_value(&self, exponent: &BigUint) -> ElementModP {
        let modulus = self.context.modulus();
        if self.table.is_empty() {
            return ElementModP::new(self.base.modpow(exponent, modulus), self.context);
        }

        let digits = radix_digits(exponent, self.window_bits, self.table.len());
        let mut accumulator = BigUint::one();
        for (row, digit) in self.table.iter().zip(digits) {
            accumulator = accumulator * &row[digit] % modulus;
        }
        ElementModP::new(accumulator, self.context)
    }
}

impl fmt::Debug for PowRadix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PowRadix")
            .field("window_bits", &self.window_bits)
            .field("rows", &self.table.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{production_group_context, test_group_context, GroupContext};

    const ALL_TIERS: [PowRadixOption; 4] = [
        PowRadixOption::NoAcceleration,
        PowRadixOption::LowMemoryUse,
        PowRadixOption::HighMemoryUse,
        PowRadixOption::ExtremeMemoryUse,
    ];

    fn ctx() -> &'static GroupContext {
        test_group_context(PowRadixOption::NoAcceleration)
    }

    #[test]
    fn test_table_shape() {
        let radix = PowRadix::new(ctx().g_mod_p(), PowRadixOption::LowMemoryUse);
        // 16 exponent bits with 8-bit windows.
        assert_eq!(radix.table.len(), 2);
        assert_eq!(radix.table[0].len(), 256);
        assert_eq!(radix.table[0][0], BigUint::one());
        assert_eq!(radix.table[0][1], *ctx().generator());
    }

    #[test]
    fn test_no_acceleration_stores_nothing() {
        let radix = PowRadix::new(ctx().g_mod_p(), PowRadixOption::NoAcceleration);
        assert!(radix.table.is_empty());
    }

    #[test]
    fn test_all_tiers_match_modpow() {
        let exponents = [0u64, 1, 2, 17, 255, 256, 4095, 4096, 32632];
        for tier in ALL_TIERS {
            let radix = PowRadix::new(ctx().g_mod_p(), tier);
            for &e in &exponents {
                let e = ctx().u64_to_element_mod_q(e).unwrap();
                let expected = ctx().generator().modpow(e.value(), ctx().modulus());
                assert_eq!(radix.pow(&e).unwrap().value(), &expected, "{tier:?}");
            }
        }
    }

    #[test]
    fn test_random_exponents_match_modpow() {
        for tier in [PowRadixOption::LowMemoryUse, PowRadixOption::HighMemoryUse] {
            let base = ctx().g_pow_p(&ctx().random_element_mod_q(0));
            let radix = PowRadix::new(&base, tier);
            for _ in 0..50 {
                let e = ctx().random_element_mod_q(0);
                let expected = base.value().modpow(e.value(), ctx().modulus());
                assert_eq!(radix.pow(&e).unwrap().value(), &expected);
            }
        }
    }

    #[test]
    fn test_chained_pow_matches_naive() {
        for tier in ALL_TIERS {
            let radix = PowRadix::new(ctx().g_mod_p(), tier);
            for _ in 0..10 {
                let a = ctx().random_element_mod_q(0);
                let b = ctx().random_element_mod_q(0);
                let accelerated = radix.pow(&a).unwrap().pow_p(&b).unwrap();
                let naive = ElementModP::new(
                    ctx().generator().modpow(a.value(), ctx().modulus()),
                    ctx(),
                )
                .pow_p(&b)
                .unwrap();
                assert_eq!(accelerated, naive);
            }
        }
    }

    #[test]
    fn test_production_low_tier_matches_modpow() {
        let production = production_group_context(PowRadixOption::NoAcceleration);
        let radix = PowRadix::new(production.g_mod_p(), PowRadixOption::LowMemoryUse);
        for _ in 0..3 {
            let e = production.random_element_mod_q(0);
            let expected = production.generator().modpow(e.value(), production.modulus());
            assert_eq!(radix.pow(&e).unwrap().value(), &expected);
        }
    }

    #[test]
    fn test_rejects_exponent_from_incompatible_context() {
        let production = production_group_context(PowRadixOption::NoAcceleration);
        let radix = PowRadix::new(ctx().g_mod_p(), PowRadixOption::LowMemoryUse);
        assert!(radix.pow(production.one_mod_q()).is_err());
    }
}
