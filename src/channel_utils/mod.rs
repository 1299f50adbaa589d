//! Message passing between the two roles of a protocol.
//!
//! Parties only ever exchange public keys and ciphertexts, i.e. big integers. [Channel] frames
//! them as a big-endian length prefix followed by the big-endian magnitude.
//!
//! Both transports are in-process: [sync_channel] over a unix socket pair and
//! [sync_channel_by_cb] over crossbeam channels.

use anyhow::{bail, Context, Result};
use num_bigint::BigUint;
use std::io::{Read, Write};

pub mod sync_channel;
pub mod sync_channel_by_cb;

/// Upper bound of a single frame. Larger length prefixes are treated as a corrupted stream.
pub const MAX_FRAME_LEN: usize = 1 << 24;

/// A duplex byte channel made of a reader and a writer.
pub struct Channel<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> Channel<R, W> {
    /// Make a channel from its two halves.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Write `n` as 8 big-endian bytes.
    pub fn write_usize(&mut self, n: usize) -> Result<()> {
        self.writer
            .write_all(&(n as u64).to_be_bytes())
            .with_context(|| format!("@{}:{}", file!(), line!()))
    }

    /// Read 8 big-endian bytes as a `usize`.
    pub fn read_usize(&mut self) -> Result<usize> {
        let mut buf = [0u8; 8];
        self.reader
            .read_exact(&mut buf)
            .with_context(|| format!("@{}:{}", file!(), line!()))?;

        usize::try_from(u64::from_be_bytes(buf)).with_context(|| format!("@{}:{}", file!(), line!()))
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .with_context(|| format!("@{}:{}", file!(), line!()))
    }

    /// Fill `bytes` from the stream.
    pub fn read_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.reader
            .read_exact(bytes)
            .with_context(|| format!("@{}:{}", file!(), line!()))
    }

    /// Flush the writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("@{}:{}", file!(), line!()))
    }

    /// Write one length-prefixed integer. Not flushed.
    pub fn write_biguint(&mut self, value: &BigUint) -> Result<usize> {
        let bytes = value.to_bytes_be();

        self.write_usize(bytes.len())?;
        self.write_bytes(&bytes)?;

        Ok(bytes.len() + 8)
    }

    /// Read one length-prefixed integer.
    pub fn read_biguint(&mut self) -> Result<BigUint> {
        let len = self.read_usize()?;
        if len > MAX_FRAME_LEN {
            bail!("frame of {} bytes is too long. @{}:{}", len, file!(), line!());
        }

        let mut bytes = vec![0u8; len];
        self.read_bytes(&mut bytes)?;

        Ok(BigUint::from_bytes_be(&bytes))
    }

    /// Write a count followed by every integer of `values`, then flush.
    ///
    /// Returns the number of bytes written.
    pub fn write_biguints(&mut self, values: &[BigUint]) -> Result<usize> {
        self.write_usize(values.len())?;

        let mut len = 8;
        for v in values {
            len += self.write_biguint(v)?;
        }

        self.flush()?;

        Ok(len)
    }

    /// Read a vector written by [Self::write_biguints].
    pub fn read_biguints(&mut self) -> Result<Vec<BigUint>> {
        let count = self.read_usize()?;
        if count > MAX_FRAME_LEN {
            bail!("vector of {} values is too long. @{}:{}", count, file!(), line!());
        }

        (0..count)
            .map(|_| self.read_biguint())
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("@{}:{}", file!(), line!()))
    }
}
