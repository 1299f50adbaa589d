//! Traits shared by the homomorphic cryptosystems.
//!
//! [Paillier](crate::paillier) is additively homomorphic over $`\mathbb{Z}_n`$ and
//! [ElGamal](crate::elgamal) is multiplicatively homomorphic over $`\mathbb{Z}_p^*`$.
//! Protocols are written against these traits and never touch modular arithmetic directly.

use crate::error::{Error, Result};
use log::warn;
use num_bigint::BigUint;
use rand::{CryptoRng, Rng};
use std::fmt::{self, Debug, Display};

/// How randomizers are drawn when a whole vector of plaintexts is encrypted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RandomnessMode {
    /// Sample a fresh randomizer for every ciphertext.
    #[default]
    Fresh,
    /// Reuse one randomizer for the whole vector.
    ///
    /// **Weak.** Equal plaintexts yield equal ciphertexts, so a vector such as a PIR
    /// selector leaks the position of its single `1`. Only kept to reproduce transcripts of
    /// older demos.
    Shared,
}

impl Display for RandomnessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomnessMode::Fresh => write!(f, "fresh"),
            RandomnessMode::Shared => write!(f, "shared"),
        }
    }
}

/// Encryption key of a public-key cryptosystem whose plaintexts and randomizers are integers.
pub trait EncryptionKey {
    /// Ciphertext of this scheme.
    type Ciphertext: Clone + PartialEq + Debug;

    /// Modulus of the plaintext space; valid plaintexts are in $`[0, \text{modulus})`$.
    fn plaintext_modulus(&self) -> &BigUint;

    /// Uniformly sample a randomizer from the randomness space.
    fn sample_randomness<RNG: CryptoRng + Rng>(&self, rng: &mut RNG) -> Result<BigUint>;

    /// $`\mathrm{Enc}(pk, m; r)`$: deterministic encryption of `plaintext` with `randomness`.
    fn encrypt_with_randomness(
        &self,
        plaintext: &BigUint,
        randomness: &BigUint,
    ) -> Result<Self::Ciphertext>;

    /// Probabilistic encryption: samples a fresh randomizer and returns it along with the
    /// ciphertext.
    fn encrypt<RNG: CryptoRng + Rng>(
        &self,
        plaintext: &BigUint,
        rng: &mut RNG,
    ) -> Result<(BigUint, Self::Ciphertext)> {
        let randomness = self.sample_randomness(rng)?;

        let ciphertext = self.encrypt_with_randomness(plaintext, &randomness)?;

        Ok((randomness, ciphertext))
    }

    /// Encrypt every plaintext of `plaintexts`, drawing randomizers according to `mode`.
    fn encrypt_vector<RNG: CryptoRng + Rng>(
        &self,
        plaintexts: &[BigUint],
        mode: RandomnessMode,
        rng: &mut RNG,
    ) -> Result<Vec<Self::Ciphertext>> {
        match mode {
            RandomnessMode::Fresh => plaintexts
                .iter()
                .map(|m| self.encrypt(m, rng).map(|(_, c)| c))
                .collect(),
            RandomnessMode::Shared => {
                warn!(
                    "encrypting {} plaintexts under a single shared randomizer",
                    plaintexts.len()
                );

                let randomness = self.sample_randomness(rng)?;
                plaintexts
                    .iter()
                    .map(|m| self.encrypt_with_randomness(m, &randomness))
                    .collect()
            }
        }
    }
}

/// Decryption key matching an [`EncryptionKey`].
pub trait DecryptionKey {
    /// The public half of this key.
    type EncryptionKey: EncryptionKey;

    /// The encryption key this key decrypts for.
    fn encryption_key(&self) -> &Self::EncryptionKey;

    /// $`\mathrm{Dec}(sk, ct) \to m`$.
    fn decrypt(
        &self,
        ciphertext: &<Self::EncryptionKey as EncryptionKey>::Ciphertext,
    ) -> Result<BigUint>;
}

/// Additive homomorphism: operations on ciphertexts that act on plaintexts in
/// $`\mathbb{Z}_n`$.
pub trait AdditivelyHomomorphic: EncryptionKey {
    /// $`\mathrm{Dec}(a \oplus b) = m_a + m_b \bmod n`$.
    fn add(&self, a: &Self::Ciphertext, b: &Self::Ciphertext) -> Self::Ciphertext;

    /// $`\mathrm{Dec}(k \odot c) = k \cdot m \bmod n`$.
    fn scalar_mul(&self, ciphertext: &Self::Ciphertext, scalar: &BigUint) -> Self::Ciphertext;

    /// $`\mathrm{Dec}(\ominus c) = -m \bmod n`$, computed with a modular inverse.
    fn negate(&self, ciphertext: &Self::Ciphertext) -> Result<Self::Ciphertext>;

    /// $`\mathrm{Dec}(a \ominus b) = m_a - m_b \bmod n`$.
    fn subtract(&self, a: &Self::Ciphertext, b: &Self::Ciphertext) -> Result<Self::Ciphertext> {
        let negated = self.negate(b)?;

        Ok(self.add(a, &negated))
    }

    /// Homomorphically evaluate $`\sum_i k_i m_i`$ for `coefficients` $`k_i`$ and encryptions
    /// of $`m_i`$ in `ciphertexts`.
    ///
    /// No fresh randomness is added, so the result is a deterministic function of its inputs.
    fn linear_combination(
        &self,
        coefficients: &[BigUint],
        ciphertexts: &[Self::Ciphertext],
    ) -> Result<Self::Ciphertext> {
        if ciphertexts.is_empty() {
            return Err(Error::ZeroDimension);
        }
        if coefficients.len() != ciphertexts.len() {
            return Err(Error::DimensionMismatch {
                expected: ciphertexts.len(),
                actual: coefficients.len(),
            });
        }

        coefficients
            .iter()
            .zip(ciphertexts.iter())
            .map(|(k, c)| self.scalar_mul(c, k))
            .reduce(|acc, term| self.add(&acc, &term))
            .ok_or(Error::ZeroDimension)
    }
}

/// Multiplicative homomorphism: ciphertext products act on plaintexts in
/// $`\mathbb{Z}_p^*`$.
pub trait MultiplicativelyHomomorphic: EncryptionKey {
    /// $`\mathrm{Dec}(a \otimes b) = m_a \cdot m_b \bmod p`$.
    fn mul(&self, a: &Self::Ciphertext, b: &Self::Ciphertext) -> Self::Ciphertext;
}
