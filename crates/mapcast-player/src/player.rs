//! The player: identity, seat, and messaging.
//!
//! # Locking
//!
//! A player owns two locks and never holds either while waiting on
//! anything else:
//!
//! - `seat` (`RwLock`) guards the room back-reference. Readers
//!   (`send_message`, `current_map`) share it, `relocate` takes it
//!   exclusively and releases it before returning.
//! - `relocation` (`Mutex<()>`) is a gate the game layer holds for the
//!   whole duration of a map switch. It is always the first lock taken
//!   in that path, so it cannot take part in a lock cycle.

use mapcast_protocol::{Envelope, MapId, PlayerKey, PlayerName};
use tokio::sync::{Mutex, MutexGuard, RwLock, mpsc};

use crate::{Inbox, PlayerError};

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// Where a player currently sits: a map id plus the sending half of that
/// map's message queue.
///
/// Rooms hand these out (see `Room::seat` in `mapcast-room`). Holding a
/// seat does not keep the room alive; once the room's worker stops, sends
/// through the seat fail with [`PlayerError::RoomClosed`].
#[derive(Debug, Clone)]
pub struct Seat {
    map: MapId,
    queue: mpsc::Sender<Envelope>,
}

impl Seat {
    pub fn new(map: MapId, queue: mpsc::Sender<Envelope>) -> Self {
        Self { map, queue }
    }

    pub fn map(&self) -> MapId {
        self.map
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A connected player.
///
/// Created by the game registry with no seat. The name never changes.
#[derive(Debug)]
pub struct Player {
    name: PlayerName,
    seat: RwLock<Option<Seat>>,
    relocation: Mutex<()>,
    inbox: Inbox,
}

impl Player {
    /// Creates an unseated player with an empty inbox of the given capacity.
    pub fn new(name: PlayerName, inbox_capacity: usize) -> Self {
        Self {
            name,
            seat: RwLock::new(None),
            relocation: Mutex::new(()),
            inbox: Inbox::new(inbox_capacity),
        }
    }

    /// The display name, exactly as the player connected with it.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn player_name(&self) -> &PlayerName {
        &self.name
    }

    /// The normalized lookup key.
    pub fn key(&self) -> &PlayerKey {
        self.name.key()
    }

    pub fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    /// The map the player is in, if any.
    pub async fn current_map(&self) -> Option<MapId> {
        self.seat.read().await.as_ref().map(Seat::map)
    }

    /// Acquires the relocation gate. Hold the guard for the whole switch.
    pub async fn relocation_gate(&self) -> MutexGuard<'_, ()> {
        self.relocation.lock().await
    }

    /// Points the player at a new seat and returns the map it left.
    ///
    /// The "already there" check and the swap happen under one write
    /// lock, which is released before this returns.
    ///
    /// # Errors
    /// [`PlayerError::AlreadyInMap`] if `seat` is for the current map. The
    /// seat is left untouched in that case.
    pub async fn relocate(&self, seat: Seat) -> Result<Option<MapId>, PlayerError> {
        let mut current = self.seat.write().await;
        if current.as_ref().map(Seat::map) == Some(seat.map) {
            return Err(PlayerError::AlreadyInMap(self.name.to_string(), seat.map));
        }
        Ok(current.replace(seat).map(|old| old.map))
    }

    /// Broadcasts `text` to everyone else in the player's map.
    ///
    /// The line is formatted as `"<Title Name> says: <text>"` and queued
    /// on the map. Queuing never waits.
    ///
    /// # Errors
    /// - [`PlayerError::NotInAnyRoom`]: no seat yet
    /// - [`PlayerError::QueueFull`]: the map's queue is at capacity
    /// - [`PlayerError::RoomClosed`]: the map's worker has stopped
    pub async fn send_message(&self, text: &str) -> Result<(), PlayerError> {
        let seat = self.seat.read().await;
        let Some(seat) = seat.as_ref() else {
            return Err(PlayerError::NotInAnyRoom(self.name.to_string()));
        };

        let envelope = Envelope::chat(&self.name, text);
        seat.queue.try_send(envelope).map_err(|err| {
            tracing::debug!(
                player = %self.name,
                map = %seat.map,
                error = %err,
                "message rejected"
            );
            match err {
                mpsc::error::TrySendError::Full(_) => PlayerError::QueueFull(seat.map),
                mpsc::error::TrySendError::Closed(_) => PlayerError::RoomClosed(seat.map),
            }
        })
    }

    /// Pushes a delivered line into the inbox without waiting.
    ///
    /// Returns `false` if the inbox was full and the line was dropped.
    pub fn deliver(&self, line: String) -> bool {
        let delivered = self.inbox.push(line);
        if !delivered {
            tracing::trace!(player = %self.name, "inbox full, line dropped");
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for `Player`, driven with a bare channel standing in for
    //! a room queue so nothing drains it behind our back.

    use super::*;

    fn player(raw: &str) -> Player {
        Player::new(PlayerName::parse(raw).unwrap(), crate::DEFAULT_INBOX_CAPACITY)
    }

    fn seat(map: u64, capacity: usize) -> (Seat, mpsc::Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Seat::new(MapId(map), tx), rx)
    }

    #[tokio::test]
    async fn test_new_player_has_no_seat() {
        let p = player("Alice");
        assert_eq!(p.name(), "Alice");
        assert_eq!(p.key().as_str(), "alice");
        assert_eq!(p.current_map().await, None);
        assert!(p.inbox().is_empty());
    }

    #[tokio::test]
    async fn test_send_message_without_seat_fails() {
        let p = player("alice");
        let err = p.send_message("hi").await.unwrap_err();
        assert_eq!(err, PlayerError::NotInAnyRoom("alice".into()));
    }

    #[tokio::test]
    async fn test_send_message_formats_and_queues() {
        let p = player("alice");
        let (s, mut rx) = seat(1, 4);
        p.relocate(s).await.unwrap();

        p.send_message("hi").await.unwrap();

        let env = rx.try_recv().unwrap();
        assert_eq!(env.line, "Alice says: hi");
        assert_eq!(env.sender.as_ref(), Some(p.key()));
    }

    #[tokio::test]
    async fn test_send_message_101st_fails_with_queue_full() {
        let p = player("alice");
        let (s, _rx) = seat(1, 100);
        p.relocate(s).await.unwrap();

        for i in 0..100 {
            p.send_message(&format!("msg {i}")).await.unwrap();
        }
        let err = p.send_message("one too many").await.unwrap_err();
        assert_eq!(err, PlayerError::QueueFull(MapId(1)));
    }

    #[tokio::test]
    async fn test_send_message_to_closed_room() {
        let p = player("alice");
        let (s, rx) = seat(2, 4);
        p.relocate(s).await.unwrap();
        drop(rx);

        let err = p.send_message("anyone?").await.unwrap_err();
        assert_eq!(err, PlayerError::RoomClosed(MapId(2)));
    }

    #[tokio::test]
    async fn test_relocate_returns_previous_map() {
        let p = player("alice");
        let (first, _rx1) = seat(1, 1);
        let (second, _rx2) = seat(2, 1);

        assert_eq!(p.relocate(first).await.unwrap(), None);
        assert_eq!(p.relocate(second).await.unwrap(), Some(MapId(1)));
        assert_eq!(p.current_map().await, Some(MapId(2)));
    }

    #[tokio::test]
    async fn test_relocate_to_same_map_fails_and_keeps_seat() {
        let p = player("alice");
        let (first, _rx1) = seat(1, 1);
        let (again, _rx2) = seat(1, 1);
        p.relocate(first).await.unwrap();

        let err = p.relocate(again).await.unwrap_err();
        assert_eq!(err, PlayerError::AlreadyInMap("alice".into(), MapId(1)));
        assert_eq!(p.current_map().await, Some(MapId(1)));
    }

    #[tokio::test]
    async fn test_deliver_drops_when_inbox_full() {
        let p = Player::new(PlayerName::parse("bob").unwrap(), 1);
        assert!(p.deliver("first".into()));
        assert!(!p.deliver("second".into()));
        assert_eq!(p.inbox().drain().await, vec!["first".to_string()]);
    }
}
