//! Modular arithmetic utilities shared by both cryptosystems.
//!
//! Nothing above the cryptosystem layer calls into this module directly; protocols only see
//! encrypt, decrypt and the homomorphic operations.

use crate::error::{Error, Result};
use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_prime::nt_funcs::is_prime;
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};

/// Sample an integer uniformly from the half-open range $`[low, high)`$.
///
/// Candidates are drawn with exactly as many random bits as the width of the range and
/// rejected when they fall outside of it, so the result carries no modulo bias. At most half
/// of the candidates are rejected, so the expected number of draws is below two.
pub fn random_in_range<RNG: CryptoRng + Rng>(
    rng: &mut RNG,
    low: &BigUint,
    high: &BigUint,
) -> Result<BigUint> {
    if low >= high {
        return Err(Error::EmptyRange);
    }

    let width = high - low;
    let bits = width.bits();

    loop {
        let candidate = rng.gen_biguint(bits);
        if candidate < width {
            return Ok(low + candidate);
        }
    }
}

/// Sample a uniform unit of $`\mathbb{Z}_m^*`$ (an element of $`[1, m)`$ coprime to $`m`$).
pub fn random_unit<RNG: CryptoRng + Rng>(rng: &mut RNG, m: &BigUint) -> Result<BigUint> {
    loop {
        let candidate = random_in_range(rng, &BigUint::one(), m)?;
        if candidate.gcd(m).is_one() {
            return Ok(candidate);
        }
    }
}

/// $`x`$ such that $`a x \equiv 1 \pmod{m}`$.
///
/// Fails with [`Error::NoInverseExists`] when $`\gcd(a, m) \neq 1`$.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(Error::NoInverseExists);
    }
    if m.is_one() {
        return Ok(BigUint::zero());
    }

    let a = BigInt::from_biguint(Sign::Plus, a % m);
    let m = BigInt::from_biguint(Sign::Plus, m.clone());

    let egcd = a.extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return Err(Error::NoInverseExists);
    }

    egcd.x
        .mod_floor(&m)
        .to_biguint()
        .ok_or(Error::NoInverseExists)
}

/// $`\mathrm{lcm}(a, b) = a b / \gcd(a, b)`$. Zero when either operand is zero.
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() || b.is_zero() {
        return BigUint::zero();
    }

    (a * b) / a.gcd(b)
}

/// $`\gcd(a, b)`$.
#[inline]
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// $`b^e \bmod m`$. Exponents are unsigned; inverses go through [`mod_inverse`].
#[inline]
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exponent, modulus)
}

/// Probable-prime check for caller-supplied primes.
pub fn is_probable_prime(candidate: &BigUint) -> bool {
    is_prime(candidate, None).probably()
}
