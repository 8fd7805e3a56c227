//! Group contexts and element factories
//!
//! A [`GroupContext`] holds one parameter set (primes P and Q, generator G,
//! cofactor R), its cached constant elements, a lazily built pow-radix
//! table over G, and the discrete-log cache. Building a context with an
//! acceleration tier is expensive, so contexts are process-wide singletons:
//! [`production_group_context`] and [`test_group_context`] build each
//! (parameter-set, tier) pair once and hand out `&'static` references from
//! then on.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::{Lazy, OnceCell};

use crate::constants::{
    DLOG_MAX_EXPONENT, PRODUCTION_G_B64, PRODUCTION_P_B64, PRODUCTION_Q_B64, PRODUCTION_Q_BITLEN,
    PRODUCTION_R_B64, TEST_G, TEST_P, TEST_Q, TEST_Q_BITLEN, TEST_R,
};
use crate::dlog::DLog;
use crate::element::{ElementModP, ElementModQ};
use crate::error::{CryptoError, Result};
use crate::powradix::{PowRadix, PowRadixOption};
use crate::utils::{base64_decode, bytes_be_to_biguint, random_bytes};

/// The group parameters and ambient caches for one parameter set.
///
/// Immutable after construction and safe to share across threads. All
/// element factories return elements that borrow this context, which is why
/// contexts only exist as `&'static` singletons.
pub struct GroupContext {
    p: BigUint,
    q: BigUint,
    g: BigUint,
    cofactor: BigUint,
    production: bool,
    acceleration: PowRadixOption,
    q_bitlen: u64,
    constants: OnceCell<GroupConstants>,
    generator_radix: OnceCell<PowRadix>,
    dlog: DLog,
}

struct GroupConstants {
    zero_mod_p: ElementModP,
    one_mod_p: ElementModP,
    two_mod_p: ElementModP,
    g_mod_p: ElementModP,
    g_squared_mod_p: ElementModP,
    q_mod_p: ElementModP,
    zero_mod_q: ElementModQ,
    one_mod_q: ElementModQ,
    two_mod_q: ElementModQ,
}

type ContextKey = (bool, PowRadixOption);

static CONTEXTS: Lazy<Mutex<HashMap<ContextKey, &'static GroupContext>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// The 4096-bit production group at the given acceleration tier.
pub fn production_group_context(acceleration: PowRadixOption) -> &'static GroupContext {
    context_for(true, acceleration)
}

/// The 16-bit test group at the given acceleration tier. Useful only for
/// tests: its discrete logs are trivially searchable.
pub fn test_group_context(acceleration: PowRadixOption) -> &'static GroupContext {
    context_for(false, acceleration)
}

fn context_for(production: bool, acceleration: PowRadixOption) -> &'static GroupContext {
    let mut contexts = CONTEXTS.lock().unwrap();
    if let Some(context) = contexts.get(&(production, acceleration)) {
        return context;
    }
    let context = GroupContext::build(production, acceleration);
    contexts.insert((production, acceleration), context);
    context
}

fn decode_parameter(b64: &str) -> BigUint {
    let bytes = base64_decode(b64).expect("baked-in parameter decodes");
    bytes_be_to_biguint(&bytes)
}

impl GroupContext {
    fn build(production: bool, acceleration: PowRadixOption) -> &'static GroupContext {
        let (p, q, g, cofactor, q_bitlen) = if production {
            (
                decode_parameter(PRODUCTION_P_B64),
                decode_parameter(PRODUCTION_Q_B64),
                decode_parameter(PRODUCTION_G_B64),
                decode_parameter(PRODUCTION_R_B64),
                PRODUCTION_Q_BITLEN,
            )
        } else {
            (
                BigUint::from(TEST_P),
                BigUint::from(TEST_Q),
                BigUint::from(TEST_G),
                BigUint::from(TEST_R),
                TEST_Q_BITLEN,
            )
        };

        let dlog = DLog::new(g.clone(), p.clone(), DLOG_MAX_EXPONENT);
        let context: &'static GroupContext = Box::leak(Box::new(GroupContext {
            p,
            q,
            g,
            cofactor,
            production,
            acceleration,
            q_bitlen,
            constants: OnceCell::new(),
            generator_radix: OnceCell::new(),
            dlog,
        }));

        let two = BigUint::from(2u8);
        let constants = GroupConstants {
            zero_mod_p: ElementModP::new(BigUint::zero(), context),
            one_mod_p: ElementModP::new(BigUint::one(), context),
            two_mod_p: ElementModP::new(two.clone(), context),
            g_mod_p: ElementModP::new(context.g.clone(), context),
            g_squared_mod_p: ElementModP::new(&context.g * &context.g % &context.p, context),
            q_mod_p: ElementModP::new(context.q.clone(), context),
            zero_mod_q: ElementModQ::new(BigUint::zero(), context),
            one_mod_q: ElementModQ::new(BigUint::one(), context),
            two_mod_q: ElementModQ::new(two, context),
        };
        let _ = context.constants.set(constants);
        context
    }

    fn constants(&self) -> &GroupConstants {
        self.constants
            .get()
            .expect("constants initialized at construction")
    }

    /// The prime modulus P.
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// The prime order Q of the subgroup generated by G.
    pub fn subgroup_order(&self) -> &BigUint {
        &self.q
    }

    /// The subgroup generator G.
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// The cofactor R = (P - 1) / Q.
    pub fn cofactor(&self) -> &BigUint {
        &self.cofactor
    }

    pub fn is_production_strength(&self) -> bool {
        self.production
    }

    pub fn acceleration(&self) -> PowRadixOption {
        self.acceleration
    }

    pub(crate) fn q_bitlen(&self) -> u64 {
        self.q_bitlen
    }

    fn strength_name(&self) -> &'static str {
        if self.production {
            "production"
        } else {
            "test"
        }
    }

    /// Two contexts are compatible iff they agree on strength; elements
    /// from compatible contexts may be mixed in arithmetic.
    pub fn compatible_with(&self, other: &GroupContext) -> bool {
        self.production == other.production
    }

    pub fn assert_compatible(&self, other: &GroupContext) -> Result<()> {
        if self.compatible_with(other) {
            Ok(())
        } else {
            Err(CryptoError::IncompatibleContext(format!(
                "{} strength vs {} strength",
                self.strength_name(),
                other.strength_name()
            )))
        }
    }

    pub fn zero_mod_p(&self) -> &ElementModP {
        &self.constants().zero_mod_p
    }

    pub fn one_mod_p(&self) -> &ElementModP {
        &self.constants().one_mod_p
    }

    pub fn two_mod_p(&self) -> &ElementModP {
        &self.constants().two_mod_p
    }

    /// G as an element of the P-group.
    pub fn g_mod_p(&self) -> &ElementModP {
        &self.constants().g_mod_p
    }

    /// G² as an element of the P-group.
    pub fn g_squared_mod_p(&self) -> &ElementModP {
        &self.constants().g_squared_mod_p
    }

    /// Q as an element of the P-group, the exponent used for residue
    /// validation.
    pub fn q_mod_p(&self) -> &ElementModP {
        &self.constants().q_mod_p
    }

    pub fn zero_mod_q(&self) -> &ElementModQ {
        &self.constants().zero_mod_q
    }

    pub fn one_mod_q(&self) -> &ElementModQ {
        &self.constants().one_mod_q
    }

    pub fn two_mod_q(&self) -> &ElementModQ {
        &self.constants().two_mod_q
    }

    /// Interpret bytes as a nonnegative big-endian integer, reduce mod P,
    /// and lift the result to `minimum` by adding `minimum` when it falls
    /// below. Always yields a valid element; the distribution is not
    /// uniform in `[minimum, P)`.
    pub fn safe_binary_to_element_mod_p(&'static self, bytes: &[u8], minimum: u64) -> ElementModP {
        let mut value = bytes_be_to_biguint(bytes) % &self.p;
        let minimum = BigUint::from(minimum);
        if value < minimum {
            value += &minimum;
        }
        ElementModP::new(value, self)
    }

    /// Same interpretation as [`safe_binary_to_element_mod_p`] but for the
    /// exponent ring mod Q.
    ///
    /// [`safe_binary_to_element_mod_p`]: GroupContext::safe_binary_to_element_mod_p
    pub fn safe_binary_to_element_mod_q(&'static self, bytes: &[u8], minimum: u64) -> ElementModQ {
        let mut value = bytes_be_to_biguint(bytes) % &self.q;
        let minimum = BigUint::from(minimum);
        if value < minimum {
            value += &minimum;
        }
        ElementModQ::new(value, self)
    }

    /// Strict decode: `None` when the integer is >= P.
    pub fn binary_to_element_mod_p(&'static self, bytes: &[u8]) -> Option<ElementModP> {
        let value = bytes_be_to_biguint(bytes);
        if value < self.p {
            Some(ElementModP::new(value, self))
        } else {
            None
        }
    }

    /// Strict decode: `None` when the integer is >= Q.
    pub fn binary_to_element_mod_q(&'static self, bytes: &[u8]) -> Option<ElementModQ> {
        let value = bytes_be_to_biguint(bytes);
        if value < self.q {
            Some(ElementModQ::new(value, self))
        } else {
            None
        }
    }

    /// Strict conversion from an unsigned 64-bit value; `OutOfRange` when
    /// the value is >= P, which is only reachable in the test group.
    pub fn u64_to_element_mod_p(&'static self, value: u64) -> Result<ElementModP> {
        let value = BigUint::from(value);
        if value < self.p {
            Ok(ElementModP::new(value, self))
        } else {
            Err(CryptoError::OutOfRange(format!("{value} >= P")))
        }
    }

    /// Strict conversion from an unsigned 64-bit value; `OutOfRange` when
    /// the value is >= Q, which is only reachable in the test group.
    pub fn u64_to_element_mod_q(&'static self, value: u64) -> Result<ElementModQ> {
        let value = BigUint::from(value);
        if value < self.q {
            Ok(ElementModQ::new(value, self))
        } else {
            Err(CryptoError::OutOfRange(format!("{value} >= Q")))
        }
    }

    /// Decode base64 then apply the strict binary decoder. `None` on
    /// empty or malformed input as well as on out-of-range integers.
    pub fn base64_to_element_mod_p(&'static self, encoded: &str) -> Option<ElementModP> {
        let bytes = base64_decode(encoded).ok()?;
        self.binary_to_element_mod_p(&bytes)
    }

    /// Decode base64 then apply the strict binary decoder. `None` on
    /// empty or malformed input as well as on out-of-range integers.
    pub fn base64_to_element_mod_q(&'static self, encoded: &str) -> Option<ElementModQ> {
        let bytes = base64_decode(encoded).ok()?;
        self.binary_to_element_mod_q(&bytes)
    }

    /// Draw 32 cryptographically secure random bytes and reduce them into
    /// `[minimum, Q)`.
    pub fn random_element_mod_q(&'static self, minimum: u64) -> ElementModQ {
        self.safe_binary_to_element_mod_q(&random_bytes(32), minimum)
    }

    fn generator_radix(&'static self) -> &PowRadix {
        self.generator_radix
            .get_or_init(|| PowRadix::new(self.g_mod_p(), self.acceleration))
    }

    /// `G^e mod P` through the context's pow-radix table over G, built on
    /// first use.
    pub fn g_pow_p(&'static self, exponent: &ElementModQ) -> ElementModP {
        self.generator_radix().pow_value(exponent.value())
    }

    /// `G^e mod P` for small unsigned exponents; `0`, `1` and `2` return
    /// the cached constants.
    pub fn g_pow_small(&'static self, exponent: u64) -> Result<ElementModP> {
        match exponent {
            0 => Ok(self.one_mod_p().clone()),
            1 => Ok(self.g_mod_p().clone()),
            2 => Ok(self.g_squared_mod_p().clone()),
            _ => {
                let exponent = self.u64_to_element_mod_q(exponent)?;
                Ok(self.g_pow_p(&exponent))
            }
        }
    }

    /// Least nonnegative x with `G^x == element (mod P)`, or `None` when x
    /// would exceed [`DLOG_MAX_EXPONENT`](crate::constants::DLOG_MAX_EXPONENT).
    pub fn d_log(&self, element: &ElementModP) -> Option<u64> {
        self.dlog.dlog(element.value())
    }
}

impl fmt::Debug for GroupContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupContext")
            .field("strength", &self.strength_name())
            .field("p_bits", &self.p.bits())
            .field("acceleration", &self.acceleration)
            .finish()
    }
}
