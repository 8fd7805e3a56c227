//! Exponential ElGamal encryption
//!
//! Messages are placed in the exponent (`G^m`), which makes ciphertexts
//! additively homomorphic: multiplying two ciphertexts component-wise
//! encrypts the sum of their messages. Decryption recovers `G^m` and then
//! asks the context's discrete-log cache for `m`, so messages must stay
//! small (honest tallies do).

use std::fmt;
use std::ops::Add;

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::thread_rng;

use crate::element::{ElementModP, ElementModQ};
use crate::error::{CryptoError, Result};
use crate::group::GroupContext;
use crate::hash::hash_parts;

/// The secret half of a keypair: an exponent s >= 2.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretKey {
    key: ElementModQ,
}

/// The public half of a keypair: `G^s mod P`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    key: ElementModP,
}

/// A secret exponent together with its public element.
#[derive(Clone, Debug)]
pub struct Keypair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

/// An ElGamal ciphertext `(pad, data) = (G^n, G^m * key^n)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pad: ElementModP,
    data: ElementModP,
}

impl Keypair {
    /// Derive the keypair for a known secret. Fails for secrets below 2
    /// (0 and 1 produce unusable public keys).
    pub fn from_secret(secret: ElementModQ) -> Result<Keypair> {
        if *secret.value() < BigUint::from(2u8) {
            return Err(CryptoError::InvalidArgument(
                "secret key must be at least 2".to_string(),
            ));
        }
        let public = secret.context().g_pow_p(&secret);
        Ok(Keypair {
            secret_key: SecretKey { key: secret },
            public_key: PublicKey { key: public },
        })
    }

    /// Draw a secret uniformly from `[2, Q)` and derive its keypair.
    pub fn random(context: &'static GroupContext) -> Keypair {
        let secret = thread_rng().gen_biguint_range(&BigUint::from(2u8), context.subgroup_order());
        Keypair::from_secret(ElementModQ::new(secret, context))
            .expect("secret drawn from [2, Q)")
    }

    pub fn context(&self) -> &'static GroupContext {
        self.public_key.context()
    }
}

impl SecretKey {
    pub fn element(&self) -> &ElementModQ {
        &self.key
    }

    pub fn context(&self) -> &'static GroupContext {
        self.key.context()
    }

    /// Recover the message: blind with `pad^s`, then solve the discrete
    /// log. `Ok(None)` means the exponent walked past the search cap,
    /// which does not happen for honestly produced ciphertexts.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Option<u64>> {
        let blind = ciphertext.pad.pow_p(&self.key)?;
        let g_pow_m = (&ciphertext.data / &blind)?;
        Ok(self.context().d_log(&g_pow_m))
    }

    /// This key's share of a decryption: `pad^s mod P`. Combining the
    /// partials of keys whose secrets sum to the full secret recovers the
    /// message via [`combine_partial_decryptions`].
    pub fn partial_decrypt(&self, ciphertext: &Ciphertext) -> Result<ElementModP> {
        ciphertext.pad.pow_p(&self.key)
    }
}

impl PublicKey {
    pub fn element(&self) -> &ElementModP {
        &self.key
    }

    pub fn context(&self) -> &'static GroupContext {
        self.key.context()
    }

    /// Encrypt a small nonnegative message with a fresh random nonce from
    /// `[1, Q)`.
    pub fn encrypt(&self, message: u64) -> Result<Ciphertext> {
        let context = self.context();
        let nonce =
            thread_rng().gen_biguint_range(&BigUint::one(), context.subgroup_order());
        self.encrypt_with_nonce(message, &ElementModQ::new(nonce, context))
    }

    /// Encrypt deterministically: `(G^nonce, G^message * key^nonce)`.
    /// The nonce must lie in `[1, Q)`.
    pub fn encrypt_with_nonce(&self, message: u64, nonce: &ElementModQ) -> Result<Ciphertext> {
        let context = self.context();
        context.assert_compatible(nonce.context())?;
        if !nonce.in_bounds_no_zero() {
            return Err(CryptoError::InvalidArgument(
                "encryption nonce must be in [1, Q)".to_string(),
            ));
        }

        let pad = context.g_pow_p(nonce);
        let g_pow_m = context.g_pow_small(message)?;
        let key_pow_nonce = self.key.pow_p(nonce)?;
        let data = (&g_pow_m * &key_pow_nonce)?;
        Ok(Ciphertext { pad, data })
    }

    /// Decrypt a ciphertext produced with a known nonce, without the
    /// secret key: blind with `key^nonce` instead of `pad^s`. Equivalent
    /// to the secret-key path for ciphertexts from
    /// [`encrypt_with_nonce`](PublicKey::encrypt_with_nonce).
    pub fn decrypt_with_nonce(
        &self,
        ciphertext: &Ciphertext,
        nonce: &ElementModQ,
    ) -> Result<Option<u64>> {
        let blind = self.key.pow_p(nonce)?;
        let g_pow_m = (&ciphertext.data / &blind)?;
        Ok(self.context().d_log(&g_pow_m))
    }

    /// Produce a different ciphertext for the same message by
    /// homomorphically adding an encryption of zero.
    pub fn reencrypt(&self, ciphertext: &Ciphertext, nonce: &ElementModQ) -> Result<Ciphertext> {
        let zero = self.encrypt_with_nonce(0, nonce)?;
        ciphertext.homomorphic_add(&zero)
    }

    /// Element-wise product of public keys. The combined key encrypts to
    /// the sum of the member secrets; fails on empty input.
    pub fn combine<'a, I>(keys: I) -> Result<PublicKey>
    where
        I: IntoIterator<Item = &'a PublicKey>,
    {
        let mut iter = keys.into_iter();
        let first = iter.next().ok_or_else(|| {
            CryptoError::InvalidArgument("cannot combine an empty set of public keys".to_string())
        })?;
        let mut combined = first.key.clone();
        for key in iter {
            combined = (&combined * &key.key)?;
        }
        Ok(PublicKey { key: combined })
    }
}

impl Ciphertext {
    pub fn new(pad: ElementModP, data: ElementModP) -> Result<Ciphertext> {
        pad.context().assert_compatible(data.context())?;
        Ok(Ciphertext { pad, data })
    }

    pub fn pad(&self) -> &ElementModP {
        &self.pad
    }

    pub fn data(&self) -> &ElementModP {
        &self.data
    }

    pub fn context(&self) -> &'static GroupContext {
        self.pad.context()
    }

    /// Component-wise multiplication: encrypts the sum of the messages
    /// (and the sum of the nonces).
    pub fn homomorphic_add(&self, other: &Ciphertext) -> Result<Ciphertext> {
        Ok(Ciphertext {
            pad: (&self.pad * &other.pad)?,
            data: (&self.data * &other.data)?,
        })
    }

    /// Raise both components to `factor`: encrypts `factor * m` under the
    /// nonce `factor * n`.
    pub fn scalar_mul(&self, factor: &ElementModQ) -> Result<Ciphertext> {
        Ok(Ciphertext {
            pad: self.pad.pow_p(factor)?,
            data: self.data.pow_p(factor)?,
        })
    }

    /// Digest of the canonical byte encodings of pad then data.
    pub fn crypto_hash(&self) -> ElementModQ {
        hash_parts(self.context(), &[&self.pad.bytes(), &self.data.bytes()])
    }
}

impl Add<&Ciphertext> for &Ciphertext {
    type Output = Result<Ciphertext>;

    fn add(self, rhs: &Ciphertext) -> Self::Output {
        self.homomorphic_add(rhs)
    }
}

/// Homomorphic sum of a sequence of ciphertexts. Fails on empty input:
/// there is no neutral ciphertext without a public key, so callers must
/// special-case emptiness.
pub fn ciphertext_sum<'a, I>(ciphertexts: I) -> Result<Ciphertext>
where
    I: IntoIterator<Item = &'a Ciphertext>,
{
    let mut iter = ciphertexts.into_iter();
    let first = iter.next().ok_or_else(|| {
        CryptoError::InvalidArgument("cannot sum an empty list of ciphertexts".to_string())
    })?;
    let mut sum = first.clone();
    for ciphertext in iter {
        sum = sum.homomorphic_add(ciphertext)?;
    }
    Ok(sum)
}

/// Recover the message from partial decryptions whose secrets sum to the
/// secret of the encrypting key: `dlog(data / (p_1 * ... * p_k))`.
/// Fails on empty input; `Ok(None)` when the discrete log walks past the
/// cap.
pub fn combine_partial_decryptions<'a, I>(
    ciphertext: &Ciphertext,
    partials: I,
) -> Result<Option<u64>>
where
    I: IntoIterator<Item = &'a ElementModP>,
{
    let mut iter = partials.into_iter();
    let first = iter.next().ok_or_else(|| {
        CryptoError::InvalidArgument(
            "cannot combine an empty set of partial decryptions".to_string(),
        )
    })?;
    let mut blind = first.clone();
    for partial in iter {
        blind = (&blind * partial)?;
    }
    let g_pow_m = (&ciphertext.data / &blind)?;
    Ok(g_pow_m.context().d_log(&g_pow_m))
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(***)")
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({} bits)", self.context().modulus().bits())
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ciphertext({} bytes)",
            self.pad.bytes().len() + self.data.bytes().len()
        )
    }
}
