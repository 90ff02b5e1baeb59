//! Error types for the room layer.

use mapcast_protocol::MapId;

/// Errors that can occur when queuing directly on a map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// The pending queue is at capacity.
    #[error("message queue of map {0} is full")]
    QueueFull(MapId),

    /// The fan-out worker has been shut down.
    #[error("map {0} is closed")]
    Closed(MapId),
}
