//! A map: membership, pending queue, and the fan-out worker.
//!
//! The worker is a Tokio task that owns the receiving half of the queue.
//! It suspends only while the queue is empty. For each line it takes the
//! membership read lock and pushes a copy into every member's inbox
//! except the author's. Inbox pushes never wait: a full inbox loses that
//! line for that member only, so one slow reader cannot stall the map.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use mapcast_player::{Player, Seat};
use mapcast_protocol::{Envelope, MapId, PlayerKey};
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;

use crate::{RoomConfig, RoomError};

/// Normalized name → player. Weak: the map never keeps a player alive.
type Members = HashMap<PlayerKey, Weak<Player>>;

/// A snapshot of a map's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub map: MapId,
    /// Member keys, sorted.
    pub members: Vec<PlayerKey>,
    /// Lines queued but not yet fanned out.
    pub pending: usize,
}

/// A running map.
///
/// Created with [`Room::spawn`], which starts the fan-out worker on the
/// current Tokio runtime. The worker runs until [`Room::shutdown`] is
/// called or the room is dropped.
pub struct Room {
    id: MapId,
    members: Arc<RwLock<Members>>,
    queue: mpsc::Sender<Envelope>,
    worker: JoinHandle<()>,
}

impl Room {
    /// Creates the map and spawns its fan-out worker.
    ///
    /// # Panics
    /// Panics outside a Tokio runtime, or if `config.queue_capacity` is 0.
    pub fn spawn(id: MapId, config: &RoomConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let members = Arc::new(RwLock::new(Members::new()));

        let worker = FanOut {
            map: id,
            members: Arc::clone(&members),
            queue: rx,
        };

        Self {
            id,
            members,
            queue: tx,
            worker: tokio::spawn(worker.run()),
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    /// A seat pointing at this map's queue, for `Player::relocate`.
    pub fn seat(&self) -> Seat {
        Seat::new(self.id, self.queue.clone())
    }

    /// Adds (or replaces) a member under its normalized name.
    pub async fn insert(&self, player: &Arc<Player>) {
        self.members
            .write()
            .await
            .insert(player.key().clone(), Arc::downgrade(player));
    }

    /// Removes a member. Returns `false` if it wasn't there.
    pub async fn remove(&self, key: &PlayerKey) -> bool {
        self.members.write().await.remove(key).is_some()
    }

    pub async fn contains(&self, key: &PlayerKey) -> bool {
        self.members.read().await.contains_key(key)
    }

    /// The member registered under `key`, if it is still alive.
    pub async fn member(&self, key: &PlayerKey) -> Option<Arc<Player>> {
        self.members.read().await.get(key).and_then(Weak::upgrade)
    }

    /// Member keys, sorted.
    pub async fn members(&self) -> Vec<PlayerKey> {
        let mut keys: Vec<PlayerKey> = self.members.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn member_count(&self) -> usize {
        self.members.read().await.len()
    }

    /// Lines queued but not yet taken by the worker.
    pub fn pending(&self) -> usize {
        self.queue.max_capacity() - self.queue.capacity()
    }

    pub async fn info(&self) -> RoomInfo {
        RoomInfo {
            map: self.id,
            members: self.members().await,
            pending: self.pending(),
        }
    }

    /// Queues a line with no author. Every member receives it.
    ///
    /// # Errors
    /// [`RoomError::QueueFull`] or [`RoomError::Closed`]. Never waits.
    pub fn announce(&self, line: impl Into<String>) -> Result<(), RoomError> {
        self.queue
            .try_send(Envelope::announce(line))
            .map_err(|err| match err {
                mpsc::error::TrySendError::Full(_) => RoomError::QueueFull(self.id),
                mpsc::error::TrySendError::Closed(_) => RoomError::Closed(self.id),
            })
    }

    /// Stops the fan-out worker. Lines still queued are discarded and
    /// later sends to this map fail with a closed error.
    pub fn shutdown(&self) {
        if !self.worker.is_finished() {
            tracing::info!(map = %self.id, "stopping fan-out worker");
            self.worker.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.worker.is_finished()
    }
}

impl Drop for Room {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

/// The fan-out worker's state. Lives inside the spawned task.
struct FanOut {
    map: MapId,
    members: Arc<RwLock<Members>>,
    queue: mpsc::Receiver<Envelope>,
}

impl FanOut {
    async fn run(mut self) {
        tracing::info!(map = %self.map, "fan-out worker started");

        while let Some(envelope) = self.queue.recv().await {
            self.broadcast(envelope).await;
        }

        tracing::info!(map = %self.map, "fan-out worker stopped");
    }

    async fn broadcast(&self, envelope: Envelope) {
        // Read lock for the whole pass: a concurrent switch can't be seen
        // half-applied, and inbox pushes never wait, so the pass is short.
        let members = self.members.read().await;
        let mut dropped = 0usize;

        for (key, member) in members.iter() {
            if envelope.is_from(key) {
                continue;
            }
            let Some(player) = member.upgrade() else {
                continue;
            };
            if !player.deliver(envelope.line.clone()) {
                dropped += 1;
            }
        }

        if dropped > 0 {
            tracing::debug!(map = %self.map, dropped, "inboxes full, line dropped for some members");
        }
    }
}
