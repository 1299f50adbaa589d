//! Two-party protocols built only from the homomorphic operations of the cryptosystems.
//!
//! Every protocol is split into one free function per message, so each step can be run by
//! whichever party owns its inputs:
//!
//! | protocol | key holder | steps |
//! |---|---|---|
//! | [pir] | client | `query` → `respond` → `extract` |
//! | [ot] | receiver | `request` → `offer` → `extract` |
//! | [regression] | Alice | `encrypt_features` → `evaluate` → `reveal` |
//!
//! [run] drives them end to end with the two roles on separate threads.

mod bin;
pub use bin::run;

/// Private information retrieval over a plaintext matrix.
pub mod pir;

/// 1-out-of-2 oblivious transfer.
pub mod ot;

/// Linear-regression hypothesis over fixed-point encoded reals.
pub mod regression;
