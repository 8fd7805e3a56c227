//! Memoized discrete-log solver
//!
//! Exponential ElGamal decryption ends with recovering a small exponent m
//! from `G^m mod P`. [`DLog`] answers those queries from a shared table of
//! known powers of G, extending the table one multiplication at a time when
//! a query lands past the current frontier. The table only ever grows;
//! entries are never evicted or changed, so a returned answer stays stable
//! for the life of the context.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use num_bigint::BigUint;
use num_traits::One;

/// Thread-safe map from powers of G to their exponents.
///
/// Lookups take the read lock only. A miss contends for the single
/// extension lock; whoever wins re-checks the table (another thread may
/// have walked past the target in the meantime) and then advances the
/// frontier `(max_element, max_exponent)` until the target is found or the
/// cap is reached. Work done before a cap miss is kept.
pub struct DLog {
    generator: BigUint,
    modulus: BigUint,
    cap: u64,
    table: RwLock<HashMap<BigUint, u64>>,
    frontier: Mutex<Frontier>,
}

struct Frontier {
    element: BigUint,
    exponent: u64,
}

impl DLog {
    pub(crate) fn new(generator: BigUint, modulus: BigUint, cap: u64) -> DLog {
        let mut table = HashMap::new();
        table.insert(BigUint::one(), 0);
        DLog {
            generator,
            modulus,
            cap,
            table: RwLock::new(table),
            frontier: Mutex::new(Frontier {
                element: BigUint::one(),
                exponent: 0,
            }),
        }
    }

    /// Least nonnegative x with `generator^x == target (mod modulus)`, or
    /// `None` if x would exceed the cap.
    pub(crate) fn dlog(&self, target: &BigUint) -> Option<u64> {
        if let Some(&exponent) = self.table.read().unwrap().get(target) {
            return Some(exponent);
        }

        let mut frontier = self.frontier.lock().unwrap();

        // Another thread may have extended past the target while we waited
        // for the lock.
        if let Some(&exponent) = self.table.read().unwrap().get(target) {
            return Some(exponent);
        }

        loop {
            if frontier.element == *target {
                return Some(frontier.exponent);
            }
            if frontier.exponent >= self.cap {
                return None;
            }
            let next = &frontier.element * &self.generator % &self.modulus;
            frontier.exponent += 1;
            frontier.element = next;
            self.table
                .write()
                .unwrap()
                .insert(frontier.element.clone(), frontier.exponent);
        }
    }

    #[cfg(test)]
    fn table_len(&self) -> usize {
        self.table.read().unwrap().len()
    }
}
