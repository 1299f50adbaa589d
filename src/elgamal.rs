//! ElGamal cryptosystem over $`\mathbb{Z}_p^*`$.
//!
//! The secret key is $`x \in [1, p-2]`$ and the public key $`y = g^x \bmod p`$.
//!
//! ```math
//! \mathrm{Enc}(m; r) = (g^r \bmod p,\ m y^r \bmod p) \qquad
//! \mathrm{Dec}(c_1, c_2) = c_2 \cdot (c_1^x)^{-1} \bmod p
//! ```
//!
//! The elementwise product of two ciphertexts decrypts to the product of the plaintexts.

use crate::arith_utils::{is_probable_prime, mod_inverse, mod_pow, random_in_range};
use crate::error::{Error, Result};
use crate::homomorphic::{DecryptionKey, EncryptionKey, MultiplicativelyHomomorphic};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};

/// Group parameters: a prime modulus $`p`$ and a base $`g`$.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicParameters {
    p: BigUint,
    g: BigUint,
}

impl PublicParameters {
    /// Validate $`p`$ (a prime greater than 3) and $`g \in [2, p)`$.
    pub fn new(p: BigUint, g: BigUint) -> Result<Self> {
        if p <= BigUint::from(3u32) {
            return Err(Error::InvalidGroupParameters("modulus must be greater than 3"));
        }
        if !is_probable_prime(&p) {
            return Err(Error::InvalidGroupParameters("modulus is not prime"));
        }
        if g <= BigUint::one() || g >= p {
            return Err(Error::InvalidGroupParameters("base must be in [2, p)"));
        }

        Ok(Self { p, g })
    }

    /// $`p`$
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// $`g`$
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// $`p - 1`$, the exclusive upper bound of secret keys and randomizers.
    fn exponent_bound(&self) -> BigUint {
        &self.p - BigUint::one()
    }
}

/// ElGamal ciphertext $`(c_1, c_2)`$.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    c1: BigUint,
    c2: BigUint,
}

impl Ciphertext {
    /// Assemble a ciphertext from its two components.
    pub fn new(c1: BigUint, c2: BigUint) -> Self {
        Self { c1, c2 }
    }

    /// $`c_1 = g^r`$
    pub fn c1(&self) -> &BigUint {
        &self.c1
    }

    /// $`c_2 = m y^r`$
    pub fn c2(&self) -> &BigUint {
        &self.c2
    }
}

/// Public key $`y = g^x \bmod p`$.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    params: PublicParameters,
    y: BigUint,
}

impl PublicKey {
    /// Group parameters of this key.
    pub fn params(&self) -> &PublicParameters {
        &self.params
    }

    /// $`y`$
    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

impl EncryptionKey for PublicKey {
    type Ciphertext = Ciphertext;

    fn plaintext_modulus(&self) -> &BigUint {
        &self.params.p
    }

    fn sample_randomness<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> Result<BigUint> {
        random_in_range(rng, &BigUint::one(), &self.params.exponent_bound())
    }

    fn encrypt_with_randomness(
        &self,
        plaintext: &BigUint,
        randomness: &BigUint,
    ) -> Result<Ciphertext> {
        let p = &self.params.p;
        if plaintext >= p {
            return Err(Error::OutOfDomainPlaintext);
        }
        if randomness.is_zero() || randomness >= &self.params.exponent_bound() {
            return Err(Error::InvalidRandomizer);
        }

        let c1 = mod_pow(&self.params.g, randomness, p);
        let c2 = (plaintext * mod_pow(&self.y, randomness, p)) % p;

        Ok(Ciphertext { c1, c2 })
    }
}

impl MultiplicativelyHomomorphic for PublicKey {
    fn mul(&self, a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
        let p = &self.params.p;

        Ciphertext {
            c1: (&a.c1 * &b.c1) % p,
            c2: (&a.c2 * &b.c2) % p,
        }
    }
}

/// Secret key $`x`$ together with its public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretKey {
    public_key: PublicKey,
    x: BigUint,
}

/// Generate a key pair: $`x`$ uniform in $`[1, p-2]`$, $`y = g^x \bmod p`$.
pub fn keygen<RNG: CryptoRng + Rng>(params: PublicParameters, rng: &mut RNG) -> Result<SecretKey> {
    let x = random_in_range(rng, &BigUint::one(), &params.exponent_bound())?;

    keygen_with_secret(params, x)
}

/// Derive the key pair for a given secret $`x \in [1, p-2]`$.
pub fn keygen_with_secret(params: PublicParameters, x: BigUint) -> Result<SecretKey> {
    if x.is_zero() || x >= params.exponent_bound() {
        return Err(Error::InvalidGroupParameters("secret must be in [1, p-2]"));
    }

    let y = mod_pow(&params.g, &x, &params.p);

    Ok(SecretKey {
        public_key: PublicKey { params, y },
        x,
    })
}

impl SecretKey {
    /// The public half of this key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// $`x`$
    pub fn x(&self) -> &BigUint {
        &self.x
    }
}

impl DecryptionKey for SecretKey {
    type EncryptionKey = PublicKey;

    fn encryption_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// $`m = c_2 \cdot (c_1^x)^{-1} \bmod p`$, with an explicit modular inverse.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint> {
        let p = &self.public_key.params.p;
        if ciphertext.c1.is_zero() || &ciphertext.c1 >= p || &ciphertext.c2 >= p {
            return Err(Error::DecryptionDomainError);
        }

        let shared = mod_pow(&ciphertext.c1, &self.x, p);
        let shared_inverse = mod_inverse(&shared, p)?;

        Ok((&ciphertext.c2 * shared_inverse) % p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::homomorphic::RandomnessMode;
    use crate::params::toy_elgamal_group;
    use rand::thread_rng;

    fn toy_params() -> PublicParameters {
        let (p, g) = toy_elgamal_group();
        PublicParameters::new(p, g).unwrap()
    }

    #[test]
    fn test_public_parameters_validation() {
        let (p, g) = toy_elgamal_group();

        assert!(matches!(
            PublicParameters::new(BigUint::from(3u32), BigUint::from(2u32)).unwrap_err(),
            Error::InvalidGroupParameters(_)
        ));
        assert!(matches!(
            PublicParameters::new(BigUint::from(561u32), BigUint::from(2u32)).unwrap_err(),
            Error::InvalidGroupParameters(_)
        ));
        assert!(matches!(
            PublicParameters::new(p.clone(), BigUint::one()).unwrap_err(),
            Error::InvalidGroupParameters(_)
        ));
        assert!(matches!(
            PublicParameters::new(p.clone(), p.clone()).unwrap_err(),
            Error::InvalidGroupParameters(_)
        ));
        assert!(PublicParameters::new(p, g).is_ok());
    }

    #[test]
    fn test_keygen() {
        let mut rng = thread_rng();
        let params = toy_params();
        let sk = keygen(params.clone(), &mut rng).unwrap();

        assert!(!sk.x().is_zero());
        assert!(sk.x() < &(params.modulus() - BigUint::one()));
        assert_eq!(
            sk.public_key().y(),
            &mod_pow(params.generator(), sk.x(), params.modulus())
        );
    }

    #[test]
    fn test_keygen_with_secret_bounds() {
        let params = toy_params();
        let p_minus_one = params.modulus() - BigUint::one();

        assert!(keygen_with_secret(params.clone(), BigUint::zero()).is_err());
        assert!(keygen_with_secret(params.clone(), p_minus_one).is_err());
        assert!(keygen_with_secret(params, BigUint::from(12345u32)).is_ok());
    }

    #[test]
    fn test_encrypt_decrypt() {
        let mut rng = thread_rng();
        let sk = keygen(toy_params(), &mut rng).unwrap();
        let pk = sk.public_key();

        for m in [1u64, 2, 1000, u64::MAX] {
            let m = BigUint::from(m);
            let (_, c) = pk.encrypt(&m, &mut rng).unwrap();
            assert_eq!(sk.decrypt(&c).unwrap(), m);
        }
    }

    #[test]
    fn test_encrypt_with_fixed_randomness() {
        let params = toy_params();
        let sk = keygen_with_secret(params, BigUint::from(99991u32)).unwrap();
        let pk = sk.public_key();
        let m = BigUint::from(31337u32);
        let r = BigUint::from(4242u32);

        let c = pk.encrypt_with_randomness(&m, &r).unwrap();
        let p = pk.params().modulus();

        assert_eq!(c.c1(), &mod_pow(pk.params().generator(), &r, p));
        assert_eq!(c, pk.encrypt_with_randomness(&m, &r).unwrap());
        assert_eq!(sk.decrypt(&c).unwrap(), m);
    }

    #[test]
    fn test_encrypt_rejects_out_of_domain() {
        let mut rng = thread_rng();
        let sk = keygen(toy_params(), &mut rng).unwrap();
        let pk = sk.public_key();
        let p = pk.params().modulus().clone();

        assert_eq!(
            pk.encrypt_with_randomness(&p, &BigUint::from(5u32))
                .unwrap_err(),
            Error::OutOfDomainPlaintext
        );
        assert_eq!(
            pk.encrypt_with_randomness(&BigUint::one(), &BigUint::zero())
                .unwrap_err(),
            Error::InvalidRandomizer
        );
        assert_eq!(
            pk.encrypt_with_randomness(&BigUint::one(), &(&p - BigUint::one()))
                .unwrap_err(),
            Error::InvalidRandomizer
        );
    }

    #[test]
    fn test_multiplicative_homomorphism() {
        let mut rng = thread_rng();
        let sk = keygen(toy_params(), &mut rng).unwrap();
        let pk = sk.public_key();

        let m1 = BigUint::from(1000u32);
        let m2 = BigUint::from(2000u32);
        let (_, c1) = pk.encrypt(&m1, &mut rng).unwrap();
        let (_, c2) = pk.encrypt(&m2, &mut rng).unwrap();

        let product = pk.mul(&c1, &c2);

        assert_eq!(sk.decrypt(&product).unwrap(), BigUint::from(2_000_000u32));

        // wraps around p
        let big = pk.params().modulus() - BigUint::one();
        let (_, c3) = pk.encrypt(&big, &mut rng).unwrap();
        let (_, c4) = pk.encrypt(&big, &mut rng).unwrap();
        assert_eq!(sk.decrypt(&pk.mul(&c3, &c4)).unwrap(), BigUint::one());
    }

    #[test]
    fn test_encrypt_vector_shared_randomness() {
        let mut rng = thread_rng();
        let sk = keygen(toy_params(), &mut rng).unwrap();
        let pk = sk.public_key();
        let plaintexts = [7u32, 7, 9].map(BigUint::from);

        let shared = pk
            .encrypt_vector(&plaintexts, RandomnessMode::Shared, &mut rng)
            .unwrap();
        let fresh = pk
            .encrypt_vector(&plaintexts, RandomnessMode::Fresh, &mut rng)
            .unwrap();

        assert_eq!(shared[0], shared[1]);
        assert_eq!(shared[0].c1(), shared[2].c1());
        assert_ne!(fresh[0], fresh[1]);

        for (m, (cs, cf)) in plaintexts.iter().zip(shared.iter().zip(fresh.iter())) {
            assert_eq!(&sk.decrypt(cs).unwrap(), m);
            assert_eq!(&sk.decrypt(cf).unwrap(), m);
        }
    }

    #[test]
    fn test_decrypt_rejects_foreign_values() {
        let mut rng = thread_rng();
        let sk = keygen(toy_params(), &mut rng).unwrap();
        let p = sk.public_key().params().modulus().clone();

        assert_eq!(
            sk.decrypt(&Ciphertext::new(BigUint::zero(), BigUint::one()))
                .unwrap_err(),
            Error::DecryptionDomainError
        );
        assert_eq!(
            sk.decrypt(&Ciphertext::new(BigUint::one(), p.clone()))
                .unwrap_err(),
            Error::DecryptionDomainError
        );
        assert_eq!(
            sk.decrypt(&Ciphertext::new(p, BigUint::one())).unwrap_err(),
            Error::DecryptionDomainError
        );
    }
}
