//! The game registry: players, maps, and the switch-map protocol.
//!
//! # Locking
//!
//! - The player registry is a `RwLock<HashMap>`. Lookups share it,
//!   `connect_player` takes it exclusively. It is never held while any
//!   other lock is requested.
//! - The map registry is filled once in [`Game::with_config`] and never
//!   mutated, so it needs no lock.
//! - [`Game::switch_player_map`] takes the player's relocation gate
//!   first, then the player's seat lock (released inside `relocate`),
//!   then each map's membership lock one at a time. No path acquires
//!   those in the opposite order.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use mapcast_player::Player;
use mapcast_protocol::{MapId, PlayerKey, PlayerName};
use mapcast_room::Room;
use tokio::sync::RwLock;

use crate::{GameConfig, GameError, PlayerHandle, RoomHandle};

/// The top-level registry of maps and players.
///
/// The map set is fixed at construction. Players are added with
/// [`connect_player`](Self::connect_player) and live as long as the game.
///
/// Every map's fan-out worker is stopped when the game is dropped.
pub struct Game {
    players: RwLock<HashMap<PlayerKey, Arc<Player>>>,
    rooms: HashMap<MapId, Arc<Room>>,
    inbox_capacity: usize,
}

impl Game {
    /// Builds a game with one map per id and default buffer sizes.
    ///
    /// # Errors
    /// [`GameError::InvalidConfig`] if any id is ≤ 0. No map is spawned
    /// in that case.
    ///
    /// # Panics
    /// Panics outside a Tokio runtime: each map spawns its fan-out worker
    /// immediately.
    pub fn new(map_ids: &[i64]) -> Result<Self, GameError> {
        Self::with_config(GameConfig::new(map_ids))
    }

    /// Builds a game from a full configuration. Duplicate ids yield one map.
    ///
    /// # Errors
    /// [`GameError::InvalidConfig`] for a non-positive id or a zero
    /// capacity. Validation runs before any worker is spawned.
    ///
    /// # Panics
    /// Panics outside a Tokio runtime, like [`Game::new`].
    pub fn with_config(config: GameConfig) -> Result<Self, GameError> {
        let map_ids = config.validate()?;
        let room_config = config.room_config();

        let rooms: HashMap<MapId, Arc<Room>> = map_ids
            .iter()
            .map(|&id| (id, Arc::new(Room::spawn(id, &room_config))))
            .collect();

        tracing::info!(
            maps = rooms.len(),
            queue_capacity = config.queue_capacity,
            inbox_capacity = config.inbox_capacity,
            "game started"
        );

        Ok(Self {
            players: RwLock::new(HashMap::new()),
            rooms,
            inbox_capacity: config.inbox_capacity,
        })
    }

    /// Registers a new player with no map.
    ///
    /// # Errors
    /// - [`GameError::EmptyName`]: `name` is blank
    /// - [`GameError::DuplicatePlayer`]: the lowercase name is taken
    pub async fn connect_player(&self, name: &str) -> Result<PlayerHandle, GameError> {
        let name = PlayerName::parse(name)?;

        let mut players = self.players.write().await;
        match players.entry(name.key().clone()) {
            Entry::Occupied(_) => {
                tracing::debug!(player = %name, "duplicate player name rejected");
                Err(GameError::DuplicatePlayer(name.to_string()))
            }
            Entry::Vacant(slot) => {
                let player = Arc::new(Player::new(name, self.inbox_capacity));
                slot.insert(Arc::clone(&player));
                tracing::info!(player = %player.name(), "player connected");
                Ok(PlayerHandle::new(player))
            }
        }
    }

    /// Moves a player into `map`, leaving whatever map it was in.
    ///
    /// The seat is updated first, then the player is removed from the old
    /// map's membership and added to the new one. Between those steps a
    /// line fanned out by either map may still follow the old membership.
    ///
    /// # Errors
    /// - [`GameError::PlayerNotFound`]
    /// - [`GameError::RoomNotFound`]
    /// - [`GameError::AlreadyInRoom`]: nothing is changed
    pub async fn switch_player_map(&self, name: &str, map: MapId) -> Result<(), GameError> {
        let player = self.player(name).await?;
        let target = self.room(map)?;

        // Serializes switches of this player; two interleaved switches
        // could otherwise leave it listed in two maps.
        let _gate = player.relocation_gate().await;

        let previous = player.relocate(target.seat()).await?;

        if let Some(old) = previous.and_then(|id| self.rooms.get(&id)) {
            old.remove(player.key()).await;
        }
        target.insert(&player).await;

        tracing::info!(
            player = %player.name(),
            from = ?previous,
            to = %map,
            "player switched map"
        );
        Ok(())
    }

    /// Looks a player up by case-insensitive name.
    pub async fn get_player(&self, name: &str) -> Result<PlayerHandle, GameError> {
        self.player(name).await.map(PlayerHandle::new)
    }

    /// A read-only view of one map.
    pub fn get_room(&self, map: MapId) -> Result<RoomHandle, GameError> {
        self.room(map).map(|room| RoomHandle::new(Arc::clone(room)))
    }

    async fn player(&self, name: &str) -> Result<Arc<Player>, GameError> {
        self.players
            .read()
            .await
            .get(&PlayerKey::normalize(name))
            .cloned()
            .ok_or_else(|| GameError::PlayerNotFound(name.to_string()))
    }

    fn room(&self, map: MapId) -> Result<&Arc<Room>, GameError> {
        self.rooms.get(&map).ok_or(GameError::RoomNotFound(map))
    }

    /// The map a player currently sits in.
    pub async fn player_map(&self, name: &str) -> Result<Option<MapId>, GameError> {
        Ok(self.player(name).await?.current_map().await)
    }

    /// Sends a chat line on behalf of a player. See
    /// [`PlayerHandle::send_message`].
    pub async fn send_message(&self, name: &str, text: &str) -> Result<(), GameError> {
        let player = self.player(name).await?;
        Ok(player.send_message(text).await?)
    }

    /// Queues an authorless line that every member of `map` receives.
    pub fn announce(&self, map: MapId, line: impl Into<String>) -> Result<(), GameError> {
        Ok(self.room(map)?.announce(line)?)
    }

    /// All map ids, ascending.
    pub fn map_ids(&self) -> Vec<MapId> {
        let mut ids: Vec<MapId> = self.rooms.keys().copied().collect();
        ids.sort();
        ids
    }

    pub async fn player_count(&self) -> usize {
        self.players.read().await.len()
    }

    /// Stops every map's fan-out worker.
    ///
    /// Not part of the steady-state lifecycle: workers otherwise run as
    /// long as the game. Afterwards sends fail with
    /// [`GameError::RoomClosed`]; registry reads keep working.
    pub fn shutdown(&self) {
        for room in self.rooms.values() {
            room.shutdown();
        }
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.shutdown();
    }
}
