//! Module about native channel of Rust. See [crossbeam].
//! This module provides a function to create a connected pair of crossbeam channels for the two roles of a protocol.

use super::Channel;
pub mod crossbeam_wrapper;
use crossbeam_wrapper::cbch_pair;
pub use crossbeam_wrapper::{CrossbeamReceiver, CrossbeamSender};

/// Channel over a pair of crossbeam channels.
pub type CrossbeamChannel = Channel<CrossbeamReceiver, CrossbeamSender>;

/// Create a connected pair of crossbeam channels.
///
/// Whatever is written on one side is read on the other.
pub fn create_crossbeam_channels() -> (CrossbeamChannel, CrossbeamChannel) {
    let (sr, rl) = cbch_pair();
    let (sl, rr) = cbch_pair();

    (Channel::new(rl, sl), Channel::new(rr, sr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn test_crossbeam_channels() {
        let (mut left, mut right) = create_crossbeam_channels();

        let handle = std::thread::spawn(move || {
            let n = right.read_biguint().unwrap();
            assert_eq!(n, BigUint::from(123u32));
            right.write_biguint(&(n * 2u32)).unwrap();
            right.flush().unwrap();
        });

        left.write_biguint(&BigUint::from(123u32)).unwrap();
        left.flush().unwrap();
        let n = left.read_biguint().unwrap();
        assert_eq!(n, BigUint::from(246u32));

        handle.join().unwrap();
    }
}
