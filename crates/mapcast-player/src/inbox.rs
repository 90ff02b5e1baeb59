//! A player's bounded mailbox.

use tokio::sync::{Mutex, mpsc};

use crate::TryRecvError;

/// Bounded FIFO of lines delivered to one player.
///
/// Only the room fan-out worker pushes into an inbox, and it never waits:
/// a push into a full inbox fails immediately and the line is lost for
/// this player alone. The caller that owns the player's connection drains
/// it with [`recv`](Self::recv), [`try_recv`](Self::try_recv) or
/// [`drain`](Self::drain).
///
/// The inbox keeps its own sender alive, so the channel never closes while
/// the player exists and `recv` simply waits when nothing is pending.
#[derive(Debug)]
pub struct Inbox {
    tx: mpsc::Sender<String>,
    rx: Mutex<mpsc::Receiver<String>>,
}

impl Inbox {
    /// Creates an empty inbox holding at most `capacity` lines.
    ///
    /// # Panics
    /// Panics if `capacity` is 0. Configuration validation rejects that
    /// before any player is created.
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Non-blocking push. Returns `false` if the inbox is full.
    pub(crate) fn push(&self, line: String) -> bool {
        self.tx.try_send(line).is_ok()
    }

    /// Waits for the next line.
    ///
    /// Consumers are serialized: a second concurrent `recv` waits for the
    /// first one to finish.
    pub async fn recv(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }

    /// Takes the next line if one is ready. Never waits.
    ///
    /// # Errors
    /// - [`TryRecvError::Empty`]: nothing is pending
    /// - [`TryRecvError::Busy`]: another consumer is inside `recv` or
    ///   `drain`, so lines may be pending but can't be taken here
    pub fn try_recv(&self) -> Result<String, TryRecvError> {
        let mut rx = self.rx.try_lock().map_err(|_| TryRecvError::Busy)?;
        rx.try_recv().map_err(|_| TryRecvError::Empty)
    }

    /// Takes every line that is ready right now, oldest first.
    pub async fn drain(&self) -> Vec<String> {
        let mut rx = self.rx.lock().await;
        let mut lines = Vec::with_capacity(self.len());
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    /// Number of lines waiting to be read.
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}
