//! Transport abstraction for session bytes.
//!
//! The core only ever sees "send bytes" / "bytes received"; connection
//! bring-up, retry and backoff belong to the embedding layer. The loopback
//! implementation backs the in-proc hub and every test.

use crate::channel::{self, Rx, Tx};

#[derive(Debug)]
pub enum TrySendError {
    Disconnected,
}

/// Minimal non-blocking transport for byte messages.
pub trait Transport: Send {
    fn try_send(&self, bytes: Vec<u8>) -> Result<(), TrySendError>;
    fn try_recv(&self) -> Option<Vec<u8>>;

    /// Drain everything queued since the last tick.
    fn drain(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(b) = self.try_recv() {
            out.push(b);
        }
        out
    }
}

/// In-process pair of endpoints wired back to back.
pub struct LocalLoopbackTransport {
    tx: Tx,
    rx: Rx,
}

impl LocalLoopbackTransport {
    #[must_use]
    pub fn pair() -> (Self, Self) {
        let (tx_a, rx_a) = channel::channel();
        let (tx_b, rx_b) = channel::channel();
        (Self { tx: tx_a, rx: rx_b }, Self { tx: tx_b, rx: rx_a })
    }

    #[must_use]
    pub fn from_parts(tx: Tx, rx: Rx) -> Self {
        Self { tx, rx }
    }
}

impl Transport for LocalLoopbackTransport {
    fn try_send(&self, bytes: Vec<u8>) -> Result<(), TrySendError> {
        if self.tx.try_send(bytes) {
            Ok(())
        } else {
            Err(TrySendError::Disconnected)
        }
    }

    fn try_recv(&self) -> Option<Vec<u8>> {
        self.rx.try_recv()
    }
}
