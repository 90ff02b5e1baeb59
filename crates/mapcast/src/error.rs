//! Unified error type for Mapcast.

use mapcast_player::PlayerError;
use mapcast_protocol::{MapId, ProtocolError};
use mapcast_room::RoomError;

/// Every failure a [`Game`](crate::Game) operation can report.
///
/// The layer errors ([`ProtocolError`], [`PlayerError`], [`RoomError`])
/// convert into the matching variant here, so `?` works across layers and
/// callers match on one flat set of kinds. All of them are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The startup configuration was rejected. Nothing was spawned.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The configuration source could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("player name must not be blank")]
    EmptyName,

    /// A player with the same case-insensitive name is already connected.
    #[error("player name {0} already exists")]
    DuplicatePlayer(String),

    #[error("player {0} not found")]
    PlayerNotFound(String),

    #[error("map {0} not found")]
    RoomNotFound(MapId),

    #[error("player {0} is already in map {1}")]
    AlreadyInRoom(String, MapId),

    #[error("player {0} is not in any map")]
    NotInAnyRoom(String),

    /// The map's pending queue is at capacity; the line was not queued.
    #[error("message queue of map {0} is full")]
    QueueFull(MapId),

    /// The map's worker has been shut down.
    #[error("map {0} is closed")]
    RoomClosed(MapId),
}

impl From<ProtocolError> for GameError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::EmptyName => Self::EmptyName,
            ProtocolError::InvalidMapId(_) => Self::InvalidConfig(err.to_string()),
        }
    }
}

impl From<PlayerError> for GameError {
    fn from(err: PlayerError) -> Self {
        match err {
            PlayerError::NotInAnyRoom(name) => Self::NotInAnyRoom(name),
            PlayerError::QueueFull(map) => Self::QueueFull(map),
            PlayerError::RoomClosed(map) => Self::RoomClosed(map),
            PlayerError::AlreadyInMap(name, map) => Self::AlreadyInRoom(name, map),
        }
    }
}

impl From<RoomError> for GameError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::QueueFull(map) => Self::QueueFull(map),
            RoomError::Closed(map) => Self::RoomClosed(map),
        }
    }
}
