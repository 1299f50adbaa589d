//! Module about unix domain socket channel. See [UnixStream].
//! This module provides a function to create a connected pair of channels for the two roles of a protocol.

use super::Channel;
use anyhow::{Context, Result};
use std::{
    io::{BufReader, BufWriter},
    os::unix::net::UnixStream,
};

/// Buffered unix domain socket channel.
pub type UnixChannel = Channel<BufReader<UnixStream>, BufWriter<UnixStream>>;

fn unix_channel(stream: UnixStream) -> Result<UnixChannel> {
    let reader = stream
        .try_clone()
        .with_context(|| format!("@{}:{}", file!(), line!()))?;

    Ok(Channel::new(BufReader::new(reader), BufWriter::new(stream)))
}

/// Create a connected pair of unix domain socket channels. See [UnixStream::pair].
pub fn create_unix_channels() -> Result<(UnixChannel, UnixChannel)> {
    let (left, right) = UnixStream::pair().with_context(|| format!("@{}:{}", file!(), line!()))?;

    Ok((unix_channel(left)?, unix_channel(right)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn test_unix_channels() {
        let (mut left, mut right) = create_unix_channels().unwrap();

        let handle = std::thread::spawn(move || {
            let v = right.read_biguints().unwrap();
            let doubled = v.iter().map(|x| x * 2u32).collect::<Vec<_>>();
            right.write_biguints(&doubled).unwrap();
        });

        left.write_biguints(&[BigUint::from(21u32), BigUint::from(100u32)])
            .unwrap();
        let res = left.read_biguints().unwrap();

        handle.join().unwrap();

        assert_eq!(res, vec![BigUint::from(42u32), BigUint::from(200u32)]);
    }
}
