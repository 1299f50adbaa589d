//! Errors of the cryptosystem layer.
//!
//! Every error is returned to the immediate caller. A protocol run that hits one of these
//! has to be restarted from its first step with fresh randomizers; partial results of a run
//! have no meaning on their own.

/// An error in one of the core operations (modular arithmetic, key generation, encryption,
/// decryption, encoding or homomorphic evaluation).
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum Error {
    /// Key generation was given primes that are equal, even, too small or composite.
    #[error("invalid prime pair: {0}")]
    InvalidPrimePair(&'static str),

    /// ElGamal group parameters $`(p, g)`$ are unusable.
    #[error("invalid group parameters: {0}")]
    InvalidGroupParameters(&'static str),

    /// The plaintext is not in $`[0, n)`$ (Paillier) or $`[0, p)`$ (ElGamal), or a signed
    /// value does not fit in the centered plaintext range.
    #[error("plaintext is outside of the message space")]
    OutOfDomainPlaintext,

    /// A modular inverse was requested for a pair that is not coprime.
    #[error("no modular inverse exists: the operands are not coprime")]
    NoInverseExists,

    /// The ciphertext is not an element of the ciphertext space of the key.
    #[error("ciphertext is outside of the ciphertext space")]
    DecryptionDomainError,

    /// The randomizer is not a unit of the randomness space.
    #[error("randomizer is not a unit of the randomness space")]
    InvalidRandomizer,

    /// The fixed-point encoder only accepts finite reals.
    #[error("cannot encode non-finite value {0}")]
    NonFiniteValue(f64),

    /// Random sampling was asked for an empty range.
    #[error("empty sampling range")]
    EmptyRange,

    /// A linear combination of zero ciphertexts has no meaning.
    #[error("zero dimension: cannot evaluate a zero-dimension linear combination")]
    ZeroDimension,

    /// Coefficients and ciphertexts of a linear combination differ in length.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Number of ciphertexts.
        expected: usize,
        /// Number of coefficients.
        actual: usize,
    },
}

/// Result of the core operations.
pub type Result<T> = std::result::Result<T, Error>;
