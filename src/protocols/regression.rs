//! Two-party evaluation of a linear-regression hypothesis over Paillier.
//!
//! Alice holds the features $`x_0, \dots, x_{l-1}`$ and the key pair, Bob holds
//! $`\theta_0, \dots, \theta_l`$. Alice sends $`\mathrm{Enc}(\bar{x}_i)`$ where
//! $`\bar{v} = \lfloor v \cdot 2^{30} \rfloor`$ is the fixed-point encoding. Bob computes
//!
//! ```math
//! \mathrm{Enc}(\bar\theta_0)^{\bar 1} \prod_i \mathrm{Enc}(\bar x_i)^{\bar\theta_{i+1}}
//! = \mathrm{Enc}\Big(\bar\theta_0 \bar 1 + \sum_i \bar x_i \bar\theta_{i+1}\Big)
//! ```
//!
//! Every term is a product of two encodings, so the plaintext carries the scale
//! $`2^{60}`$ and is decoded twice. Multiplying $`\theta_0`$ by the encoded one keeps it on the
//! same scale as the other terms.
//!
//! Negative values live in $`\mathbb{Z}_n`$ as $`v \bmod n`$ and are lifted back to
//! $`(-n/2, n/2]`$ after decryption, so the result has to stay below $`n/2`$ in magnitude.
//! Each party checks its own encoded inputs against
//! $`B = \lfloor \sqrt{n / (2(l+1))} \rfloor`$: with every factor below $`B`$ the sum of the
//! $`l+1`$ products is below $`n/2`$, and larger inputs are rejected with
//! [OutOfDomainPlaintext](crate::Error::OutOfDomainPlaintext).

use crate::encoder::{self, FixedDecimal};
use crate::homomorphic::{AdditivelyHomomorphic, DecryptionKey, EncryptionKey, RandomnessMode};
use crate::paillier::{Ciphertext, PrivateKey, PublicKey};
use anyhow::{bail, Context, Result};
use log::debug;
use num_bigint::BigUint;
use rand::{CryptoRng, Rng};

/// Number of encoding scales carried by the result of [evaluate].
pub const RESULT_SCALE_LAYERS: usize = 2;

/// Alice's encrypted feature vector.
#[derive(Clone, Debug, PartialEq)]
pub struct EncryptedFeatures {
    ciphertexts: Vec<Ciphertext>,
}

impl EncryptedFeatures {
    /// Wrap ciphertexts received from Alice.
    pub fn new(ciphertexts: Vec<Ciphertext>) -> Self {
        Self { ciphertexts }
    }

    /// The encrypted features, in order.
    pub fn ciphertexts(&self) -> &[Ciphertext] {
        &self.ciphertexts
    }

    /// Number of features $`l`$.
    pub fn len(&self) -> usize {
        self.ciphertexts.len()
    }

    /// `true` when there are no features.
    pub fn is_empty(&self) -> bool {
        self.ciphertexts.is_empty()
    }
}

/// Encrypted $`f(\theta, x)`$ together with the number of encoding scales it carries.
#[derive(Clone, Debug, PartialEq)]
pub struct EncryptedResult {
    ciphertext: Ciphertext,
    scale_layers: usize,
}

impl EncryptedResult {
    /// Wrap a ciphertext carrying `scale_layers` encoding scales.
    pub fn new(ciphertext: Ciphertext, scale_layers: usize) -> Self {
        Self {
            ciphertext,
            scale_layers,
        }
    }

    /// The ciphertext.
    pub fn ciphertext(&self) -> &Ciphertext {
        &self.ciphertext
    }

    /// How many times the plaintext has to be decoded.
    pub fn scale_layers(&self) -> usize {
        self.scale_layers
    }
}

/// Bound on every encoded factor of a sum of `terms` products.
fn magnitude_bound(pk: &PublicKey, terms: usize) -> BigUint {
    (pk.modulus() / BigUint::from(2 * terms)).sqrt()
}

fn encode_into(pk: &PublicKey, value: f64, bound: &BigUint) -> Result<BigUint> {
    let encoded = encoder::encode(value).with_context(|| format!("@{}:{}", file!(), line!()))?;

    if encoded.magnitude() >= bound {
        return Err(crate::Error::OutOfDomainPlaintext).with_context(|| {
            format!(
                "{} is too large for the evaluation to stay in the plaintext space. @{}:{}",
                value,
                file!(),
                line!()
            )
        });
    }

    pk.encode_signed(&encoded)
        .with_context(|| format!("{} does not fit the plaintext space. @{}:{}", value, file!(), line!()))
}

/// Alice: encode and encrypt the features.
pub fn encrypt_features<RNG: CryptoRng + Rng>(
    pk: &PublicKey,
    x: &[f64],
    mode: RandomnessMode,
    rng: &mut RNG,
) -> Result<EncryptedFeatures> {
    let bound = magnitude_bound(pk, x.len() + 1);
    let plaintexts = x
        .iter()
        .map(|&v| encode_into(pk, v, &bound))
        .collect::<Result<Vec<_>>>()?;

    debug!("regression: encrypting {} features ({} randomness)", x.len(), mode);

    let ciphertexts = pk
        .encrypt_vector(&plaintexts, mode, rng)
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    Ok(EncryptedFeatures { ciphertexts })
}

/// Bob: evaluate $`\theta_0 + \sum_i x_i \theta_{i+1}`$ on the encrypted features.
///
/// `theta` must have exactly one more entry than there are features. $`\theta_0`$ is
/// encrypted here with fresh randomness.
pub fn evaluate<RNG: CryptoRng + Rng>(
    pk: &PublicKey,
    features: &EncryptedFeatures,
    theta: &[f64],
    rng: &mut RNG,
) -> Result<EncryptedResult> {
    if theta.len() != features.len() + 1 {
        bail!(
            "expected {} parameters for {} features, got {}. @{}:{}",
            features.len() + 1,
            features.len(),
            theta.len(),
            file!(),
            line!()
        );
    }

    let bound = magnitude_bound(pk, theta.len());

    let (_, theta0) = pk
        .encrypt(&encode_into(pk, theta[0], &bound)?, rng)
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    let coefficients = std::iter::once(1.0)
        .chain(theta[1..].iter().copied())
        .map(|v| encode_into(pk, v, &bound))
        .collect::<Result<Vec<_>>>()?;

    let ciphertexts = std::iter::once(theta0)
        .chain(features.ciphertexts.iter().cloned())
        .collect::<Vec<_>>();

    let ciphertext = pk
        .linear_combination(&coefficients, &ciphertexts)
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    debug!("regression: evaluated over {} features", features.len());

    Ok(EncryptedResult {
        ciphertext,
        scale_layers: RESULT_SCALE_LAYERS,
    })
}

/// Both roles in one call: [encrypt_features] followed by [evaluate].
pub fn submit<RNG: CryptoRng + Rng>(
    pk: &PublicKey,
    x: &[f64],
    theta: &[f64],
    mode: RandomnessMode,
    rng: &mut RNG,
) -> Result<EncryptedResult> {
    let features = encrypt_features(pk, x, mode, rng)?;

    evaluate(pk, &features, theta, rng)
}

/// Alice: decrypt, lift to a signed value and decode every scale layer.
pub fn reveal(sk: &PrivateKey, result: &EncryptedResult) -> Result<FixedDecimal> {
    let plaintext = sk
        .decrypt(&result.ciphertext)
        .with_context(|| format!("@{}:{}", file!(), line!()))?;
    let signed = sk
        .public_key()
        .decode_signed(&plaintext)
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    Ok(encoder::decode_layers(&signed, result.scale_layers))
}
