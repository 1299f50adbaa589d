use crate::channel_utils::sync_channel::create_unix_channels;
use crate::channel_utils::sync_channel_by_cb::create_crossbeam_channels;
use crate::channel_utils::Channel;
use crate::cli_utils::{Args, ChannelType, ProtocolType};
use crate::elgamal::{self, PublicParameters};
use crate::encoder::FixedDecimal;
use crate::homomorphic::{
    AdditivelyHomomorphic, DecryptionKey, EncryptionKey, MultiplicativelyHomomorphic,
    RandomnessMode,
};
use crate::paillier::{self, Ciphertext, PrivateKey, PublicKey};
use crate::params::ParamSet;
use crate::protocols::ot::{self, Choice, Offer};
use crate::protocols::pir::{self, Database};
use crate::protocols::regression::{self, EncryptedFeatures, EncryptedResult, RESULT_SCALE_LAYERS};
use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use num_bigint::BigUint;
use rand::thread_rng;
use std::io::{Read, Write};
use std::thread::JoinHandle;

fn send_ciphertexts<R: Read, W: Write>(
    channel: &mut Channel<R, W>,
    ciphertexts: &[Ciphertext],
) -> Result<usize> {
    let values = ciphertexts.iter().map(|c| c.value().clone()).collect_vec();

    channel
        .write_biguints(&values)
        .with_context(|| format!("@{}:{}", file!(), line!()))
}

fn receive_ciphertexts<R: Read, W: Write>(channel: &mut Channel<R, W>) -> Result<Vec<Ciphertext>> {
    let values = channel
        .read_biguints()
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    Ok(values.into_iter().map(Ciphertext::from).collect())
}

fn receive_public_key<R: Read, W: Write>(channel: &mut Channel<R, W>) -> Result<PublicKey> {
    let n = channel
        .read_biguint()
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    PublicKey::from_modulus(n).with_context(|| format!("@{}:{}", file!(), line!()))
}

fn send_public_key<R: Read, W: Write>(channel: &mut Channel<R, W>, pk: &PublicKey) -> Result<()> {
    channel.write_biguint(pk.modulus())?;
    channel.flush()
}

fn join<T>(handle: JoinHandle<Result<T>>) -> Result<T> {
    handle
        .join()
        .map_err(|_| anyhow!("a party thread panicked. @{}:{}", file!(), line!()))?
}

/// Called when a receive fails: the peer usually hung up because it failed, so its error wins.
fn peer_error(handle: JoinHandle<Result<()>>, err: anyhow::Error) -> anyhow::Error {
    match join(handle) {
        Err(peer) => peer.context(format!("the other party failed. @{}:{}", file!(), line!())),
        Ok(()) => err,
    }
}

fn paillier_key(params: ParamSet) -> Result<PrivateKey> {
    let (p, q) = params.paillier_primes()?;

    let sk = paillier::keygen(&p, &q).with_context(|| "Failed to generate a Paillier key pair.")?;

    println!(
        "paillier key prepared: {} bits.",
        sk.public_key().modulus().bits()
    );

    Ok(sk)
}

fn paillier_demo(params: ParamSet, m1: u64, m2: u64, verbose: bool) -> Result<(BigUint, BigUint)> {
    let mut rng = thread_rng();
    let sk = paillier_key(params)?;
    let pk = sk.public_key();

    let m1 = BigUint::from(m1);
    let m2 = BigUint::from(m2);
    let (_, c1) = pk.encrypt(&m1, &mut rng)?;
    let (_, c2) = pk.encrypt(&m2, &mut rng)?;

    if verbose {
        println!("Enc({}) = {}", m1, c1.value());
        println!("Enc({}) = {}", m2, c2.value());
    }

    let sum = sk
        .decrypt(&pk.add(&c1, &c2))
        .with_context(|| format!("@{}:{}", file!(), line!()))?;
    let product = sk
        .decrypt(&pk.scalar_mul(&c1, &m2))
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    println!("Dec(Enc({0}) * Enc({1})) = {2}", m1, m2, sum);
    println!("Dec(Enc({0})^{1}) = {2}", m1, m2, product);

    Ok((sum, product))
}

fn elgamal_demo(params: ParamSet, m1: u64, m2: u64, verbose: bool) -> Result<BigUint> {
    let mut rng = thread_rng();
    let (p, g) = params.elgamal_group()?;
    let group = PublicParameters::new(p, g).with_context(|| format!("@{}:{}", file!(), line!()))?;
    let sk = elgamal::keygen(group, &mut rng)
        .with_context(|| "Failed to generate an ElGamal key pair.")?;
    let pk = sk.public_key();

    println!(
        "elgamal key prepared: {} bits.",
        pk.params().modulus().bits()
    );

    let m1 = BigUint::from(m1);
    let m2 = BigUint::from(m2);
    let (_, c1) = pk.encrypt(&m1, &mut rng)?;
    let (_, c2) = pk.encrypt(&m2, &mut rng)?;

    if verbose {
        println!("Enc({}) = ({}, {})", m1, c1.c1(), c1.c2());
        println!("Enc({}) = ({}, {})", m2, c2.c1(), c2.c2());
    }

    let product = sk
        .decrypt(&pk.mul(&c1, &c2))
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    println!("Dec(Enc({0}) * Enc({1})) = {2}", m1, m2, product);

    Ok(product)
}

#[allow(clippy::too_many_arguments)]
fn pir_protocol<R, W>(
    mut client_channel: Channel<R, W>,
    mut server_channel: Channel<R, W>,
    sk: PrivateKey,
    db: Database,
    row: usize,
    col: usize,
    mode: RandomnessMode,
    verbose: bool,
) -> Result<BigUint>
where
    R: Read + Send + 'static,
    W: Write + Send + 'static,
{
    let cols = db.cols();

    let handle = std::thread::spawn(move || -> Result<()> {
        let pk = receive_public_key(&mut server_channel)?;
        let query = receive_ciphertexts(&mut server_channel)?;

        let answers = pir::respond(&pk, &db, &query).with_context(|| "Failed to run server.")?;

        send_ciphertexts(&mut server_channel, &answers)?;

        println!("server finished.");

        Ok(())
    });

    let mut rng = thread_rng();
    let pk = sk.public_key();

    send_public_key(&mut client_channel, pk)?;

    let query = pir::query(pk, cols, col, mode, &mut rng).with_context(|| "Failed to run client.")?;
    let len = send_ciphertexts(&mut client_channel, &query)?;

    println!("client sent a query of {} bytes.", len);

    let answers = match receive_ciphertexts(&mut client_channel) {
        Ok(answers) => answers,
        Err(e) => return Err(peer_error(handle, e)),
    };
    if verbose {
        for (i, a) in answers.iter().enumerate() {
            println!("answer[{}] = {}", i, a.value());
        }
    }

    let res = pir::extract(&sk, &answers, row).with_context(|| "Failed to run client.")?;

    join(handle)?;

    println!("client finished: D[{}][{}] = {}", row, col, res);

    Ok(res)
}

fn ot_protocol<R, W>(
    mut receiver_channel: Channel<R, W>,
    mut sender_channel: Channel<R, W>,
    sk: PrivateKey,
    x0: BigUint,
    x1: BigUint,
    choice: Choice,
    verbose: bool,
) -> Result<BigUint>
where
    R: Read + Send + 'static,
    W: Write + Send + 'static,
{
    let handle = std::thread::spawn(move || -> Result<()> {
        let mut rng = thread_rng();

        let pk = receive_public_key(&mut sender_channel)?;
        let request = receive_ciphertexts(&mut sender_channel)?
            .pop()
            .ok_or_else(|| anyhow!("empty request. @{}:{}", file!(), line!()))?;

        let Offer { c0, c1 } = ot::offer(&pk, &x0, &x1, &request, &mut rng)
            .with_context(|| "Failed to run sender.")?;

        send_ciphertexts(&mut sender_channel, &[c0, c1])?;

        println!("sender finished.");

        Ok(())
    });

    let mut rng = thread_rng();
    let pk = sk.public_key();

    send_public_key(&mut receiver_channel, pk)?;

    let request = ot::request(pk, choice, &mut rng).with_context(|| "Failed to run receiver.")?;
    if verbose {
        println!("Enc(choice) = {}", request.value());
    }
    send_ciphertexts(&mut receiver_channel, &[request])?;

    let mut offer = match receive_ciphertexts(&mut receiver_channel) {
        Ok(offer) => offer,
        Err(e) => return Err(peer_error(handle, e)),
    };
    let (c1, c0) = match (offer.pop(), offer.pop()) {
        (Some(c1), Some(c0)) if offer.is_empty() => (c1, c0),
        _ => anyhow::bail!("malformed offer. @{}:{}", file!(), line!()),
    };
    if verbose {
        println!("c0 = {}", c0.value());
        println!("c1 = {}", c1.value());
    }

    let res = ot::extract(&sk, choice, &Offer { c0, c1 })
        .with_context(|| "Failed to run receiver.")?;

    join(handle)?;

    println!("receiver finished: x{} = {}", choice, res);

    Ok(res)
}

fn regression_protocol<R, W>(
    mut alice_channel: Channel<R, W>,
    mut bob_channel: Channel<R, W>,
    sk: PrivateKey,
    x: Vec<f64>,
    theta: Vec<f64>,
    mode: RandomnessMode,
    verbose: bool,
) -> Result<FixedDecimal>
where
    R: Read + Send + 'static,
    W: Write + Send + 'static,
{
    let handle = std::thread::spawn(move || -> Result<()> {
        let mut rng = thread_rng();

        let pk = receive_public_key(&mut bob_channel)?;
        let features = EncryptedFeatures::new(receive_ciphertexts(&mut bob_channel)?);

        let result = regression::evaluate(&pk, &features, &theta, &mut rng)
            .with_context(|| "Failed to run Bob.")?;

        send_ciphertexts(&mut bob_channel, &[result.ciphertext().clone()])?;

        println!("bob finished.");

        Ok(())
    });

    let mut rng = thread_rng();
    let pk = sk.public_key();

    send_public_key(&mut alice_channel, pk)?;

    let features = regression::encrypt_features(pk, &x, mode, &mut rng)
        .with_context(|| "Failed to run Alice.")?;
    if verbose {
        for (i, c) in features.ciphertexts().iter().enumerate() {
            println!("Enc(x[{}]) = {}", i, c.value());
        }
    }
    send_ciphertexts(&mut alice_channel, features.ciphertexts())?;

    let ciphertext = match receive_ciphertexts(&mut alice_channel) {
        Ok(mut result) => result
            .pop()
            .ok_or_else(|| anyhow!("empty result. @{}:{}", file!(), line!()))?,
        Err(e) => return Err(peer_error(handle, e)),
    };
    if verbose {
        println!("Enc(f(theta, x)) = {}", ciphertext.value());
    }

    let res = regression::reveal(&sk, &EncryptedResult::new(ciphertext, RESULT_SCALE_LAYERS))
        .with_context(|| "Failed to run Alice.")?;

    join(handle)?;

    println!("alice finished: f(theta, x) = {}", res);

    Ok(res)
}

macro_rules! with_channels {
    ( $channel_type:expr, $protocol:ident ( $( $arg:expr ),* ) ) => {{
        match $channel_type {
            ChannelType::Unix => {
                let (left, right) =
                    create_unix_channels().with_context(|| "Failed to create channels.")?;
                $protocol(left, right, $( $arg ),*)
            }
            ChannelType::Crossbeam => {
                let (left, right) = create_crossbeam_channels();
                $protocol(left, right, $( $arg ),*)
            }
        }
    }};
}

/// Run the selected demonstration. Two-party protocols run each role on its own thread.
pub fn run(args: Args) -> Result<()> {
    let Args {
        protocol,
        params,
        randomness,
        channel_type,
        rows,
        cols,
        row,
        col,
        x0,
        x1,
        choice,
        x,
        theta,
        verbose,
    } = args;

    let params = ParamSet::from(params);
    let mode = RandomnessMode::from(randomness);

    match protocol {
        ProtocolType::Paillier => {
            paillier_demo(params, x0, x1, verbose)?;
        }
        ProtocolType::Elgamal => {
            elgamal_demo(params, x0, x1, verbose)?;
        }
        ProtocolType::Pir => {
            let db = Database::from_fn(rows, cols, |i, j| BigUint::from((i + 1) * (j + 1)))
                .with_context(|| "Failed to prepare the database.")?;

            println!("database prepared: {} x {}.", rows, cols);

            let sk = paillier_key(params)?;
            with_channels!(
                channel_type,
                pir_protocol(sk, db, row, col, mode, verbose)
            )?;
        }
        ProtocolType::Ot => {
            let choice = Choice::try_from(choice)?;
            let sk = paillier_key(params)?;
            with_channels!(
                channel_type,
                ot_protocol(
                    sk,
                    BigUint::from(x0),
                    BigUint::from(x1),
                    choice,
                    verbose
                )
            )?;
        }
        ProtocolType::Regression => {
            let sk = paillier_key(params)?;
            with_channels!(
                channel_type,
                regression_protocol(sk, x, theta, mode, verbose)
            )?;
        }
    }

    Ok(())
}
