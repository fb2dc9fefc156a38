//! In-proc byte channel with non-blocking drain helpers.
//!
//! The transport buffers inbound messages here; the simulation drains them
//! at the start of whichever tick next observes them. Unbounded, because a
//! slow reader must never stall a sender's tick loop.

use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Clone)]
pub struct Tx(Sender<Vec<u8>>);
pub struct Rx(Receiver<Vec<u8>>);

#[must_use]
pub fn channel() -> (Tx, Rx) {
    let (s, r) = mpsc::channel::<Vec<u8>>();
    (Tx(s), Rx(r))
}

impl Tx {
    /// Try to send; returns false if the receiver is gone.
    #[must_use]
    pub fn try_send(&self, bytes: Vec<u8>) -> bool {
        self.0.send(bytes).is_ok()
    }
}

impl Rx {
    #[must_use]
    pub fn try_recv(&self) -> Option<Vec<u8>> {
        self.0.try_recv().ok()
    }

    /// Drain all currently queued messages without blocking.
    #[must_use]
    pub fn drain(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(b) = self.try_recv() {
            out.push(b);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_and_drain_in_order() {
        let (tx, rx) = channel();
        assert!(tx.try_send(vec![1]));
        assert!(tx.try_send(vec![2, 3]));
        let drained = rx.drain();
        assert_eq!(drained, vec![vec![1], vec![2, 3]]);
        assert!(rx.drain().is_empty());
    }

    #[test]
    fn send_fails_after_receiver_drop() {
        let (tx, rx) = channel();
        drop(rx);
        assert!(!tx.try_send(vec![0]));
    }
}
