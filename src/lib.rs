//! # Homomorphic protocols
//!
//! Paillier (additively homomorphic) and ElGamal (multiplicatively homomorphic) public-key
//! encryption, and three two-party protocols composed only from their homomorphisms:
//! private information retrieval, 1-out-of-2 oblivious transfer and linear-regression
//! evaluation over fixed-point encoded reals.
//!
//! [protocols] is the main module of this library. Protocols never touch modular arithmetic
//! directly; they only go through the traits of [homomorphic].
#![warn(missing_docs)]

pub mod arith_utils;
pub mod channel_utils;
pub mod cli_utils;
pub mod elgamal;
pub mod encoder;
mod error;
pub mod homomorphic;
pub mod paillier;
pub mod params;
pub mod protocols;

pub use error::{Error, Result};
