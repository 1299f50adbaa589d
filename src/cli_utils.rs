//! CLI (CommandLine Interface) utilities for the demo binary.
//!
//! Here, you can know the options for the protocols through enum types and structs.
//! See other modules for the actual implementation of the protocols or details of what options mean.

use crate::homomorphic::RandomnessMode;
use crate::params::ParamSet;
use clap::{Parser, ValueEnum};
use std::fmt::Display;

/// Which demonstration to run. More details: [protocols](crate::protocols).
#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum ProtocolType {
    /// Paillier encryption, addition and scalar multiplication of `x0` and `x1`. See [paillier](crate::paillier).
    Paillier,
    /// ElGamal encryption and multiplication of `x0` and `x1`. See [elgamal](crate::elgamal).
    Elgamal,
    /// Private information retrieval. See [pir](crate::protocols::pir).
    Pir,
    /// 1-out-of-2 oblivious transfer. See [ot](crate::protocols::ot).
    Ot,
    /// Linear-regression evaluation. See [regression](crate::protocols::regression).
    Regression,
}

impl Display for ProtocolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolType::Paillier => write!(f, "paillier"),
            ProtocolType::Elgamal => write!(f, "elgamal"),
            ProtocolType::Pir => write!(f, "pir"),
            ProtocolType::Ot => write!(f, "ot"),
            ProtocolType::Regression => write!(f, "regression"),
        }
    }
}

/// Key material. More details: [params](crate::params).
#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum ParamsType {
    /// Small Mersenne primes. Fast, not secure.
    Toy,
    /// Full-size primes.
    Demo,
}

impl Display for ParamsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamsType::Toy => write!(f, "toy"),
            ParamsType::Demo => write!(f, "demo"),
        }
    }
}

impl From<ParamsType> for ParamSet {
    fn from(t: ParamsType) -> Self {
        match t {
            ParamsType::Toy => ParamSet::Toy,
            ParamsType::Demo => ParamSet::Demo,
        }
    }
}

/// How randomizers of encrypted vectors are drawn. See [RandomnessMode].
#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum RandomizerType {
    /// A fresh randomizer per ciphertext.
    Fresh,
    /// One randomizer for a whole vector. Weak; leaks equal plaintexts.
    Shared,
}

impl Display for RandomizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", RandomnessMode::from(*self))
    }
}

impl From<RandomizerType> for RandomnessMode {
    fn from(t: RandomizerType) -> Self {
        match t {
            RandomizerType::Fresh => RandomnessMode::Fresh,
            RandomizerType::Shared => RandomnessMode::Shared,
        }
    }
}

/// Channel types. Channels are used to communicate between the two roles. More details: [channel_utils](crate::channel_utils).
#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum ChannelType {
    /// Unix domain socket pair. See [create_unix_channels](crate::channel_utils::sync_channel::create_unix_channels).
    Unix,
    /// Native channel of Rust. See [create_crossbeam_channels](crate::channel_utils::sync_channel_by_cb::create_crossbeam_channels).
    Crossbeam,
}

impl Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelType::Unix => write!(f, "unix"),
            ChannelType::Crossbeam => write!(f, "crossbeam"),
        }
    }
}

/// Arguments for the demo binary.
/// This struct implements [clap::Parser] to make that this binary has CommandLine Arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, next_line_help = true)]
pub struct Args {
    /// Protocol to run.
    #[arg(short = 'P', long = "protocol", default_value_t = ProtocolType::Pir)]
    pub protocol: ProtocolType,

    /// Key material.
    #[arg(long = "params", default_value_t = ParamsType::Toy)]
    pub params: ParamsType,

    /// Randomizers of encrypted vectors (PIR selector, regression features).
    #[arg(short = 'r', long = "randomness", default_value_t = RandomizerType::Fresh)]
    pub randomness: RandomizerType,

    /// Channel Types.
    #[arg(short = 'c', long = "channel", default_value_t = ChannelType::Crossbeam)]
    pub channel_type: ChannelType,

    /// PIR: rows of the database. Entry (i, j) is (i+1)(j+1).
    #[arg(long, default_value_t = 4)]
    pub rows: usize,

    /// PIR: columns of the database.
    #[arg(long, default_value_t = 4)]
    pub cols: usize,

    /// PIR: requested row.
    #[arg(long, default_value_t = 2)]
    pub row: usize,

    /// PIR: requested column. Hidden from the server.
    #[arg(long, default_value_t = 3)]
    pub col: usize,

    /// OT: first message. Also the first operand of the paillier and elgamal demos.
    #[arg(long, default_value_t = 17)]
    pub x0: u64,

    /// OT: second message. Also the second operand of the paillier and elgamal demos.
    #[arg(long, default_value_t = 42)]
    pub x1: u64,

    /// OT: choice bit of the receiver.
    #[arg(long, default_value_t = 1)]
    pub choice: u8,

    /// Regression: Alice's features, comma separated.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = vec![1.5, -2.0])]
    pub x: Vec<f64>,

    /// Regression: Bob's parameters (intercept first), comma separated.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = vec![0.5, 2.0, 1.0])]
    pub theta: Vec<f64>,

    /// Verbose mode.
    ///
    /// If specified, print the intermediate ciphertexts.
    #[arg(long = "verbose", default_value_t = false)]
    pub verbose: bool,
}
