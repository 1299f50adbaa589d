//! 1-out-of-2 oblivious transfer from an additively homomorphic scheme.
//!
//! The receiver sends $`C = \mathrm{Enc}(\sigma)`$. The sender derives
//! $`C' = \mathrm{Enc}(1) \cdot C^{-1} = \mathrm{Enc}(1 - \sigma)`$ and, with fresh blinding
//! scalars $`r_0, r_1`$, answers
//!
//! ```math
//! c_0 = C'^{x_0} C^{r_0} = \mathrm{Enc}((1-\sigma) x_0 + \sigma r_0) \qquad
//! c_1 = C^{x_1} C'^{r_1} = \mathrm{Enc}(\sigma x_1 + (1-\sigma) r_1)
//! ```
//!
//! so $`c_\sigma`$ decrypts to $`x_\sigma`$ while the other one decrypts to a blinding scalar.
//!
//! The sender encrypts the $`1`$ of $`C'`$ under its own fresh randomness.

use crate::homomorphic::{AdditivelyHomomorphic, DecryptionKey, EncryptionKey};
use anyhow::{bail, Context, Error, Result};
use log::debug;
use num_bigint::BigUint;
use num_traits::One;
use rand::{CryptoRng, Rng};
use std::fmt::Display;

/// The receiver's choice bit $`\sigma`$.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    /// Receive $`x_0`$.
    Zero,
    /// Receive $`x_1`$.
    One,
}

impl Choice {
    fn as_plaintext(self) -> BigUint {
        match self {
            Choice::Zero => BigUint::from(0u8),
            Choice::One => BigUint::from(1u8),
        }
    }
}

impl TryFrom<u8> for Choice {
    type Error = Error;

    fn try_from(bit: u8) -> Result<Self> {
        match bit {
            0 => Ok(Choice::Zero),
            1 => Ok(Choice::One),
            _ => bail!("choice must be 0 or 1, got {}. @{}:{}", bit, file!(), line!()),
        }
    }
}

impl Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::Zero => write!(f, "0"),
            Choice::One => write!(f, "1"),
        }
    }
}

/// The sender's answer $`(c_0, c_1)`$.
#[derive(Clone, Debug, PartialEq)]
pub struct Offer<C> {
    /// $`c_0`$
    pub c0: C,
    /// $`c_1`$
    pub c1: C,
}

/// Receiver: $`C = \mathrm{Enc}(\sigma)`$.
pub fn request<K, RNG>(pk: &K, choice: Choice, rng: &mut RNG) -> Result<K::Ciphertext>
where
    K: AdditivelyHomomorphic,
    RNG: CryptoRng + Rng,
{
    let (_, c) = pk
        .encrypt(&choice.as_plaintext(), rng)
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    Ok(c)
}

/// Sender: answer the encrypted choice with $`(c_0, c_1)`$.
pub fn offer<K, RNG>(
    pk: &K,
    x0: &BigUint,
    x1: &BigUint,
    request: &K::Ciphertext,
    rng: &mut RNG,
) -> Result<Offer<K::Ciphertext>>
where
    K: AdditivelyHomomorphic,
    RNG: CryptoRng + Rng,
{
    if x0 >= pk.plaintext_modulus() || x1 >= pk.plaintext_modulus() {
        return Err(crate::Error::OutOfDomainPlaintext)
            .with_context(|| format!("messages must be below the modulus. @{}:{}", file!(), line!()));
    }

    let (_, one) = pk
        .encrypt(&BigUint::one(), rng)
        .with_context(|| format!("@{}:{}", file!(), line!()))?;
    let complement = pk
        .subtract(&one, request)
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    let r0 = pk
        .sample_randomness(rng)
        .with_context(|| format!("@{}:{}", file!(), line!()))?;
    let r1 = pk
        .sample_randomness(rng)
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    let c0 = pk
        .linear_combination(&[x0.clone(), r0], &[complement.clone(), request.clone()])
        .with_context(|| format!("@{}:{}", file!(), line!()))?;
    let c1 = pk
        .linear_combination(&[x1.clone(), r1], &[request.clone(), complement])
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    debug!("ot: offer computed");

    Ok(Offer { c0, c1 })
}

/// Receiver: decrypt $`c_\sigma`$.
pub fn extract<D>(
    sk: &D,
    choice: Choice,
    offer: &Offer<<D::EncryptionKey as EncryptionKey>::Ciphertext>,
) -> Result<BigUint>
where
    D: DecryptionKey,
{
    let chosen = match choice {
        Choice::Zero => &offer.c0,
        Choice::One => &offer.c1,
    };

    sk.decrypt(chosen)
        .with_context(|| format!("@{}:{}", file!(), line!()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paillier::{keygen, Ciphertext, PrivateKey};
    use crate::params::toy_paillier_primes;
    use rand::thread_rng;

    fn toy_key() -> PrivateKey {
        let (p, q) = toy_paillier_primes();
        keygen(&p, &q).unwrap()
    }

    fn test_ot_base(x0: &BigUint, x1: &BigUint, choice: Choice) -> BigUint {
        let mut rng = thread_rng();
        let sk = toy_key();
        let pk = sk.public_key();

        let c = request(pk, choice, &mut rng).unwrap();
        let o = offer(pk, x0, x1, &c, &mut rng).unwrap();

        extract(&sk, choice, &o).unwrap()
    }

    #[test]
    fn test_ot() {
        let x0 = BigUint::from(17u32);
        let x1 = BigUint::from(42u32);

        assert_eq!(test_ot_base(&x0, &x1, Choice::One), x1);
        assert_eq!(test_ot_base(&x0, &x1, Choice::Zero), x0);
    }

    #[test]
    fn test_ot_large_messages() {
        let sk = toy_key();
        let n = sk.public_key().modulus();
        let x0 = n - BigUint::one();
        let x1 = n / 3u32;

        assert_eq!(test_ot_base(&x0, &x1, Choice::Zero), x0);
        assert_eq!(test_ot_base(&x0, &x1, Choice::One), x1);
    }

    #[test]
    fn test_unchosen_message_is_blinded() {
        let mut rng = thread_rng();
        let sk = toy_key();
        let pk = sk.public_key();
        let x0 = BigUint::from(17u32);
        let x1 = BigUint::from(42u32);

        for _ in 0..8 {
            let c = request(pk, Choice::One, &mut rng).unwrap();
            let o = offer(pk, &x0, &x1, &c, &mut rng).unwrap();

            let other = sk.decrypt(&o.c0).unwrap();
            assert_ne!(other, x0);
            assert_ne!(other, x1);
        }
    }

    #[test]
    fn test_request_hides_choice() {
        let mut rng = thread_rng();
        let sk = toy_key();
        let pk = sk.public_key();

        let a = request(pk, Choice::One, &mut rng).unwrap();
        let b = request(pk, Choice::One, &mut rng).unwrap();

        assert_ne!(a, b);
        assert_eq!(sk.decrypt(&a).unwrap(), BigUint::one());
    }

    #[test]
    fn test_choice_from_bit() {
        assert_eq!(Choice::try_from(0u8).unwrap(), Choice::Zero);
        assert_eq!(Choice::try_from(1u8).unwrap(), Choice::One);
        assert!(Choice::try_from(2u8).is_err());
    }

    #[test]
    fn test_offer_rejects_bad_inputs() {
        let mut rng = thread_rng();
        let sk = toy_key();
        let pk = sk.public_key();
        let c = request(pk, Choice::Zero, &mut rng).unwrap();

        let too_large = pk.modulus().clone();
        assert!(offer(pk, &too_large, &BigUint::one(), &c, &mut rng).is_err());

        // a request that is not a unit modulo n^2 has no inverse
        let not_a_unit = Ciphertext::from(pk.modulus().clone());
        let err = offer(pk, &BigUint::one(), &BigUint::one(), &not_a_unit, &mut rng).unwrap_err();
        assert_eq!(
            err.downcast_ref::<crate::Error>(),
            Some(&crate::Error::NoInverseExists)
        );
    }
}
