//! [Read]/[Write] adapters over crossbeam channels.

use crossbeam::channel::{unbounded, Receiver, RecvError, SendError, Sender};
use std::io::{Error, ErrorKind, Read, Result, Write};

/// [Write] half: every write is sent as one chunk.
pub struct CrossbeamSender(Sender<Vec<u8>>);

/// [Read] half: blocks until the next chunk arrives and serves it across reads.
pub struct CrossbeamReceiver {
    rx: Receiver<Vec<u8>>,
    chunk: Vec<u8>,
    pos: usize,
}

impl Write for CrossbeamSender {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if let Err(SendError(_)) = self.0.send(buf.to_vec()) {
            return Err(Error::new(ErrorKind::BrokenPipe, "receiver dropped"));
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Read for CrossbeamReceiver {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.pos == self.chunk.len() {
            match self.rx.recv() {
                Ok(chunk) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                Err(RecvError) => return Err(Error::new(ErrorKind::BrokenPipe, RecvError)),
            }
        }

        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;

        Ok(n)
    }
}

/// A connected sender/receiver pair.
pub fn cbch_pair() -> (CrossbeamSender, CrossbeamReceiver) {
    let (s, r) = unbounded();
    (
        CrossbeamSender(s),
        CrossbeamReceiver {
            rx: r,
            chunk: Vec::new(),
            pos: 0,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test() {
        let (mut s1, mut r1) = cbch_pair();

        let handle = std::thread::spawn(move || {
            let mut v = vec![0u8; 3];
            r1.read_exact(&mut v).unwrap();
            assert_eq!(v, [1, 2, 3]);
        });

        let v = [1, 2, 3];
        s1.write_all(&v).unwrap();

        handle.join().unwrap();
    }

    #[test]
    fn test_reads_across_chunks() {
        let (mut s1, mut r1) = cbch_pair();

        s1.write_all(&[1, 2]).unwrap();
        s1.write_all(&[3, 4, 5]).unwrap();

        let mut v = vec![0u8; 4];
        r1.read_exact(&mut v).unwrap();
        assert_eq!(v, [1, 2, 3, 4]);

        let mut v = vec![0u8; 1];
        r1.read_exact(&mut v).unwrap();
        assert_eq!(v, [5]);
    }

    #[test]
    fn test_broken_pipe() {
        let (mut s1, mut r1) = cbch_pair();

        let handle = std::thread::spawn(move || {
            let mut v = vec![0u8; 3];
            r1.read_exact(&mut v).unwrap();
            assert_eq!(v, [1, 2, 3]);

            let mut v = vec![0u8; 3];
            let e = r1.read_exact(&mut v).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::BrokenPipe);
        });

        let v = [1, 2, 3];
        s1.write_all(&v).unwrap();
        drop(s1);

        handle.join().unwrap();
    }

    #[test]
    fn test_write_after_receiver_dropped() {
        let (mut s1, r1) = cbch_pair();
        drop(r1);

        let e = s1.write_all(&[1]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::BrokenPipe);
    }
}
