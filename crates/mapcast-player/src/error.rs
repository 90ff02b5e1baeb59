//! Error types for the player layer.

use mapcast_protocol::MapId;

/// Errors a player operation can report to its caller.
///
/// None of these are fatal. Retrying is the caller's decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// The player has no seat yet, so there is nobody to talk to.
    #[error("player {0} is not in any map")]
    NotInAnyRoom(String),

    /// The map's pending queue is at capacity. The message was not sent.
    #[error("message queue of map {0} is full")]
    QueueFull(MapId),

    /// The map's fan-out worker has been shut down.
    #[error("map {0} is closed")]
    RoomClosed(MapId),

    /// A relocation targeted the map the player already sits in.
    #[error("player {0} is already in map {1}")]
    AlreadyInMap(String, MapId),
}

/// Why [`Inbox::try_recv`](crate::Inbox::try_recv) returned no line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TryRecvError {
    #[error("inbox is empty")]
    Empty,

    /// Another consumer holds the inbox inside `recv` or `drain`. Lines
    /// may be waiting; retry or await `recv` instead.
    #[error("inbox is busy with another consumer")]
    Busy,
}
