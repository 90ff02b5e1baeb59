//! Caller-facing views of players and maps.
//!
//! [`Game`](crate::Game) hands these out instead of the underlying
//! `Player` and `Room`. They expose reads, messaging and inboxes, but not
//! the seat or membership mutators, so the only way to move a player is
//! [`Game::switch_player_map`](crate::Game::switch_player_map).
//!
//! ```compile_fail
//! # use mapcast::prelude::*;
//! # async fn demo(game: &Game) -> Result<(), GameError> {
//! let alice = game.connect_player("alice").await?;
//! game.get_room(MapId(2))?.insert(&alice).await;
//! # Ok(())
//! # }
//! ```
//!
//! ```compile_fail
//! # use mapcast::prelude::*;
//! # async fn demo(game: &Game) -> Result<(), GameError> {
//! let alice = game.connect_player("alice").await?;
//! alice.relocate(game.get_room(MapId(2))?.seat()).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use mapcast_player::{Inbox, Player};
use mapcast_protocol::{MapId, PlayerKey};
use mapcast_room::{Room, RoomInfo};

use crate::GameError;

/// A connected player, as seen from outside the game.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    player: Arc<Player>,
}

impl PlayerHandle {
    pub(crate) fn new(player: Arc<Player>) -> Self {
        Self { player }
    }

    /// The display name, exactly as the player connected with it.
    pub fn name(&self) -> &str {
        self.player.name()
    }

    pub fn key(&self) -> &PlayerKey {
        self.player.key()
    }

    pub fn inbox(&self) -> &Inbox {
        self.player.inbox()
    }

    pub async fn current_map(&self) -> Option<MapId> {
        self.player.current_map().await
    }

    /// Broadcasts `text` to everyone else in the player's map.
    ///
    /// # Errors
    /// [`GameError::NotInAnyRoom`], [`GameError::QueueFull`] or
    /// [`GameError::RoomClosed`]. Never waits for queue space.
    pub async fn send_message(&self, text: &str) -> Result<(), GameError> {
        Ok(self.player.send_message(text).await?)
    }

    /// Returns `true` if both handles refer to the same connected player.
    pub fn same_player(&self, other: &PlayerHandle) -> bool {
        Arc::ptr_eq(&self.player, &other.player)
    }
}

/// A read-only view of one map.
#[derive(Clone)]
pub struct RoomHandle {
    room: Arc<Room>,
}

impl RoomHandle {
    pub(crate) fn new(room: Arc<Room>) -> Self {
        Self { room }
    }

    pub fn id(&self) -> MapId {
        self.room.id()
    }

    pub async fn contains(&self, key: &PlayerKey) -> bool {
        self.room.contains(key).await
    }

    /// Member keys, sorted.
    pub async fn members(&self) -> Vec<PlayerKey> {
        self.room.members().await
    }

    pub async fn member_count(&self) -> usize {
        self.room.member_count().await
    }

    /// Lines queued but not yet fanned out.
    pub fn pending(&self) -> usize {
        self.room.pending()
    }

    pub async fn info(&self) -> RoomInfo {
        self.room.info().await
    }

    /// Queues a line with no author. Every member receives it.
    pub fn announce(&self, line: impl Into<String>) -> Result<(), GameError> {
        Ok(self.room.announce(line)?)
    }

    pub fn is_running(&self) -> bool {
        self.room.is_running()
    }
}
