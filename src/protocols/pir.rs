//! Computational PIR from an additively homomorphic scheme.
//!
//! The client encrypts a selector vector $`e_t`$ (a `1` at column $`t`$, `0` elsewhere).
//! For every row $`i`$ the server returns
//!
//! ```math
//! a_i = \prod_j \mathrm{Enc}(e_{t,j})^{D_{i,j}} = \mathrm{Enc}\Big(\sum_j D_{i,j} e_{t,j}\Big) = \mathrm{Enc}(D_{i,t})
//! ```
//!
//! and the client decrypts $`a_s`$. The server only sees ciphertexts, so $`t`$ stays hidden.

use crate::homomorphic::{AdditivelyHomomorphic, DecryptionKey, EncryptionKey, RandomnessMode};
use anyhow::{bail, Context, Result};
use itertools::Itertools;
use log::debug;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};

/// Server-side matrix of plaintexts. Rectangular and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Database {
    entries: Vec<Vec<BigUint>>,
    cols: usize,
}

impl Database {
    /// Wrap `entries`, checking that every row has the same non-zero length.
    pub fn new(entries: Vec<Vec<BigUint>>) -> Result<Self> {
        let cols = match entries.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => bail!("database must not be empty. @{}:{}", file!(), line!()),
        };

        if let Some(i) = entries.iter().position(|row| row.len() != cols) {
            bail!(
                "row {} has {} columns, expected {}. @{}:{}",
                i,
                entries[i].len(),
                cols,
                file!(),
                line!()
            );
        }

        Ok(Self { entries, cols })
    }

    /// Build a `rows` x `cols` database from `f(i, j)`.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> BigUint,
    {
        let entries = (0..rows)
            .map(|i| (0..cols).map(|j| f(i, j)).collect_vec())
            .collect_vec();

        Self::new(entries)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.entries.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at row `i` and column `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<&BigUint> {
        self.entries.get(i).and_then(|row| row.get(j))
    }

    /// Iterate over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[BigUint]> {
        self.entries.iter().map(|row| row.as_slice())
    }
}

/// Client: encrypt the selector vector for column `t` of a `cols`-column database.
pub fn query<K, RNG>(
    pk: &K,
    cols: usize,
    t: usize,
    mode: RandomnessMode,
    rng: &mut RNG,
) -> Result<Vec<K::Ciphertext>>
where
    K: AdditivelyHomomorphic,
    RNG: CryptoRng + Rng,
{
    if t >= cols {
        bail!(
            "column {} is out of range for {} columns. @{}:{}",
            t,
            cols,
            file!(),
            line!()
        );
    }

    let selector = (0..cols)
        .map(|j| {
            if j == t {
                BigUint::one()
            } else {
                BigUint::zero()
            }
        })
        .collect_vec();

    debug!("pir: encrypting a selector of {} columns ({} randomness)", cols, mode);

    pk.encrypt_vector(&selector, mode, rng)
        .with_context(|| format!("@{}:{}", file!(), line!()))
}

/// Server: fold every row of `db` against the encrypted selector.
pub fn respond<K>(pk: &K, db: &Database, query: &[K::Ciphertext]) -> Result<Vec<K::Ciphertext>>
where
    K: AdditivelyHomomorphic,
{
    if query.len() != db.cols() {
        bail!(
            "query has {} entries but the database has {} columns. @{}:{}",
            query.len(),
            db.cols(),
            file!(),
            line!()
        );
    }

    if db
        .iter_rows()
        .flatten()
        .any(|entry| entry >= pk.plaintext_modulus())
    {
        return Err(crate::Error::OutOfDomainPlaintext)
            .with_context(|| format!("database entry too large. @{}:{}", file!(), line!()));
    }

    debug!("pir: answering {} x {} database", db.rows(), db.cols());

    db.iter_rows()
        .map(|row| {
            pk.linear_combination(row, query)
                .with_context(|| format!("@{}:{}", file!(), line!()))
        })
        .collect()
}

/// Client: decrypt the answer of row `s`.
pub fn extract<D>(
    sk: &D,
    answers: &[<D::EncryptionKey as EncryptionKey>::Ciphertext],
    s: usize,
) -> Result<BigUint>
where
    D: DecryptionKey,
{
    let answer = match answers.get(s) {
        Some(answer) => answer,
        None => bail!(
            "row {} is out of range for {} answers. @{}:{}",
            s,
            answers.len(),
            file!(),
            line!()
        ),
    };

    sk.decrypt(answer)
        .with_context(|| format!("@{}:{}", file!(), line!()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paillier::{keygen, PrivateKey};
    use crate::params::toy_paillier_primes;
    use crate::Error;
    use rand::thread_rng;

    fn toy_key() -> PrivateKey {
        let (p, q) = toy_paillier_primes();
        keygen(&p, &q).unwrap()
    }

    fn products_db(rows: usize, cols: usize) -> Database {
        Database::from_fn(rows, cols, |i, j| BigUint::from((i + 1) * (j + 1))).unwrap()
    }

    fn test_pir_base(db: &Database, s: usize, t: usize, mode: RandomnessMode) -> BigUint {
        let mut rng = thread_rng();
        let sk = toy_key();
        let pk = sk.public_key();

        let q = query(pk, db.cols(), t, mode, &mut rng).unwrap();
        let answers = respond(pk, db, &q).unwrap();
        assert_eq!(answers.len(), db.rows());

        extract(&sk, &answers, s).unwrap()
    }

    #[test]
    fn test_pir_4x4() {
        let db = products_db(4, 4);

        let res = test_pir_base(&db, 2, 3, RandomnessMode::Fresh);

        assert_eq!(res, BigUint::from(12u32));
    }

    #[test]
    fn test_pir_every_cell() {
        let db = products_db(3, 5);

        for s in 0..db.rows() {
            for t in 0..db.cols() {
                let res = test_pir_base(&db, s, t, RandomnessMode::Fresh);
                assert_eq!(&res, db.get(s, t).unwrap());
            }
        }
    }

    #[test]
    fn test_pir_shared_randomness() {
        let db = products_db(4, 4);

        let res = test_pir_base(&db, 1, 0, RandomnessMode::Shared);

        assert_eq!(res, BigUint::from(2u32));
    }

    #[test]
    fn test_every_answer_decrypts_to_its_row() {
        let mut rng = thread_rng();
        let sk = toy_key();
        let pk = sk.public_key();
        let db = Database::new(vec![
            vec![BigUint::from(5u32), BigUint::from(0u32)],
            vec![BigUint::from(7u32), BigUint::from(9u32)],
        ])
        .unwrap();

        let q = query(pk, 2, 1, RandomnessMode::Fresh, &mut rng).unwrap();
        let answers = respond(pk, &db, &q).unwrap();

        let column = (0..db.rows())
            .map(|i| extract(&sk, &answers, i).unwrap())
            .collect_vec();

        assert_eq!(column, vec![BigUint::from(0u32), BigUint::from(9u32)]);
    }

    #[test]
    fn test_database_validation() {
        assert!(Database::new(vec![]).is_err());
        assert!(Database::new(vec![vec![]]).is_err());
        assert!(Database::new(vec![
            vec![BigUint::one(), BigUint::one()],
            vec![BigUint::one()],
        ])
        .is_err());
        assert!(Database::from_fn(0, 3, |_, _| BigUint::one()).is_err());
    }

    #[test]
    fn test_out_of_range_indices() {
        let mut rng = thread_rng();
        let sk = toy_key();
        let pk = sk.public_key();
        let db = products_db(2, 2);

        assert!(query(pk, 2, 2, RandomnessMode::Fresh, &mut rng).is_err());

        let q = query(pk, 3, 0, RandomnessMode::Fresh, &mut rng).unwrap();
        assert!(respond(pk, &db, &q).is_err());

        let q = query(pk, 2, 0, RandomnessMode::Fresh, &mut rng).unwrap();
        let answers = respond(pk, &db, &q).unwrap();
        assert!(extract(&sk, &answers, 2).is_err());
    }

    #[test]
    fn test_entry_outside_plaintext_space() {
        let mut rng = thread_rng();
        let sk = toy_key();
        let pk = sk.public_key();
        let db = Database::new(vec![vec![pk.modulus().clone()]]).unwrap();

        let q = query(pk, 1, 0, RandomnessMode::Fresh, &mut rng).unwrap();
        let err = respond(pk, &db, &q).unwrap_err();

        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::OutOfDomainPlaintext)
        );
    }
}
