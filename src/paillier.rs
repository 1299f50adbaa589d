//! Paillier cryptosystem.
//!
//! Plaintexts live in $`\mathbb{Z}_n`$ and ciphertexts in $`\mathbb{Z}_{n^2}^*`$ for
//! $`n = p q`$. The generator is fixed to $`g = n + 1`$, which gives
//! $`g^m \bmod n^2 = 1 + m n`$.
//!
//! ```math
//! \mathrm{Enc}(m; r) = g^m r^n \bmod n^2 \qquad
//! \mathrm{Dec}(c) = L(c^\lambda \bmod n^2) \cdot \mu \bmod n
//! ```
//!
//! where $`L(x) = (x - 1) / n`$, $`\lambda = \mathrm{lcm}(p - 1, q - 1)`$ and
//! $`\mu = L(g^\lambda \bmod n^2)^{-1} \bmod n`$.

use crate::arith_utils::{gcd, is_probable_prime, lcm, mod_inverse, mod_pow, random_unit};
use crate::error::{Error, Result};
use crate::homomorphic::{AdditivelyHomomorphic, DecryptionKey, EncryptionKey};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::{CryptoRng, Rng};

/// Paillier ciphertext, an element of $`\mathbb{Z}_{n^2}^*`$.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext(BigUint);

impl Ciphertext {
    /// The raw residue modulo $`n^2`$.
    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl From<BigUint> for Ciphertext {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<Ciphertext> for BigUint {
    fn from(ciphertext: Ciphertext) -> Self {
        ciphertext.0
    }
}

/// Public key $`(n, g = n + 1)`$.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    n: BigUint,
    n_squared: BigUint,
    g: BigUint,
}

impl PublicKey {
    /// Rebuild the public key from the modulus alone, as a party that only received $`n`$
    /// would.
    pub fn from_modulus(n: BigUint) -> Result<Self> {
        if n <= BigUint::from(3u32) || n.is_even() {
            return Err(Error::InvalidPrimePair("modulus must be an odd composite"));
        }

        let n_squared = &n * &n;
        let g = &n + BigUint::one();

        Ok(Self { n, n_squared, g })
    }

    /// $`n`$
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// $`n^2`$
    pub fn modulus_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// $`g = n + 1`$
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// Embed a signed integer into $`\mathbb{Z}_n`$ as $`v \bmod n`$.
    ///
    /// Only $`|v| < n/2`$ is accepted, so that [`Self::decode_signed`] recovers `v`.
    pub fn encode_signed(&self, value: &BigInt) -> Result<BigUint> {
        let n = BigInt::from_biguint(Sign::Plus, self.n.clone());
        if value.abs() * 2u32 >= n {
            return Err(Error::OutOfDomainPlaintext);
        }

        value
            .mod_floor(&n)
            .to_biguint()
            .ok_or(Error::OutOfDomainPlaintext)
    }

    /// Lift a plaintext of $`\mathbb{Z}_n`$ to the centered range $`(-n/2, n/2]`$.
    pub fn decode_signed(&self, plaintext: &BigUint) -> Result<BigInt> {
        if plaintext >= &self.n {
            return Err(Error::OutOfDomainPlaintext);
        }

        let m = BigInt::from_biguint(Sign::Plus, plaintext.clone());
        if plaintext * 2u32 > self.n {
            Ok(m - BigInt::from_biguint(Sign::Plus, self.n.clone()))
        } else {
            Ok(m)
        }
    }

    /// $`L(x) = (x - 1) / n`$, defined on $`x \equiv 1 \pmod n`$.
    fn l_function(&self, x: &BigUint) -> Result<BigUint> {
        if x.is_zero() {
            return Err(Error::DecryptionDomainError);
        }

        let (quotient, remainder) = (x - BigUint::one()).div_rem(&self.n);
        if !remainder.is_zero() {
            return Err(Error::DecryptionDomainError);
        }

        Ok(quotient)
    }

    fn check_ciphertext(&self, ciphertext: &Ciphertext) -> Result<()> {
        let c = ciphertext.value();
        if c.is_zero() || c >= &self.n_squared || !gcd(c, &self.n).is_one() {
            return Err(Error::DecryptionDomainError);
        }

        Ok(())
    }
}

impl EncryptionKey for PublicKey {
    type Ciphertext = Ciphertext;

    fn plaintext_modulus(&self) -> &BigUint {
        &self.n
    }

    fn sample_randomness<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> Result<BigUint> {
        random_unit(rng, &self.n)
    }

    /// $`c = g^m r^n \bmod n^2`$ for $`0 \le m < n`$ and $`r \in \mathbb{Z}_n^*`$.
    fn encrypt_with_randomness(
        &self,
        plaintext: &BigUint,
        randomness: &BigUint,
    ) -> Result<Ciphertext> {
        if plaintext >= &self.n {
            return Err(Error::OutOfDomainPlaintext);
        }
        if randomness.is_zero() || randomness >= &self.n || !gcd(randomness, &self.n).is_one() {
            return Err(Error::InvalidRandomizer);
        }

        let gm = mod_pow(&self.g, plaintext, &self.n_squared);
        let rn = mod_pow(randomness, &self.n, &self.n_squared);

        Ok(Ciphertext((gm * rn) % &self.n_squared))
    }
}

impl AdditivelyHomomorphic for PublicKey {
    fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
        Ciphertext((a.value() * b.value()) % &self.n_squared)
    }

    fn scalar_mul(&self, ciphertext: &Ciphertext, scalar: &BigUint) -> Ciphertext {
        Ciphertext(mod_pow(ciphertext.value(), scalar, &self.n_squared))
    }

    fn negate(&self, ciphertext: &Ciphertext) -> Result<Ciphertext> {
        let inverse = mod_inverse(ciphertext.value(), &self.n_squared)?;

        Ok(Ciphertext(inverse))
    }
}

/// Private key: the public key together with $`\lambda`$ and the precomputed $`\mu`$.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    public_key: PublicKey,
    lambda: BigUint,
    mu: BigUint,
}

/// Generate a key pair from two distinct odd primes supplied by the caller.
///
/// $`n = p q`$, $`g = n + 1`$, $`\lambda = \mathrm{lcm}(p - 1, q - 1)`$.
pub fn keygen(p: &BigUint, q: &BigUint) -> Result<PrivateKey> {
    let two = BigUint::from(2u32);
    if p <= &two || q <= &two {
        return Err(Error::InvalidPrimePair("primes must be greater than 2"));
    }
    if p.is_even() || q.is_even() {
        return Err(Error::InvalidPrimePair("primes must be odd"));
    }
    if p == q {
        return Err(Error::InvalidPrimePair("primes must be distinct"));
    }
    if !is_probable_prime(p) || !is_probable_prime(q) {
        return Err(Error::InvalidPrimePair("inputs are not prime"));
    }

    let public_key = PublicKey::from_modulus(p * q)?;

    let lambda = lcm(&(p - BigUint::one()), &(q - BigUint::one()));

    let g_lambda = mod_pow(&public_key.g, &lambda, &public_key.n_squared);
    let mu = public_key
        .l_function(&g_lambda)
        .and_then(|l| mod_inverse(&l, &public_key.n))
        .map_err(|_| Error::InvalidPrimePair("L(g^lambda) is not invertible modulo n"))?;

    Ok(PrivateKey {
        public_key,
        lambda,
        mu,
    })
}

impl PrivateKey {
    /// The public half of this key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// $`\lambda = \mathrm{lcm}(p - 1, q - 1)`$
    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }
}

impl DecryptionKey for PrivateKey {
    type EncryptionKey = PublicKey;

    fn encryption_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// $`m = L(c^\lambda \bmod n^2) \cdot \mu \bmod n`$.
    ///
    /// Every element of $`\mathbb{Z}_{n^2}^*`$ is a valid encryption under $`g = n + 1`$,
    /// so only values outside of that group are rejected.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint> {
        let pk = &self.public_key;
        pk.check_ciphertext(ciphertext)?;

        let c_lambda = mod_pow(ciphertext.value(), &self.lambda, &pk.n_squared);
        let s = pk.l_function(&c_lambda)? % &pk.n;

        Ok((s * &self.mu) % &pk.n)
    }
}
