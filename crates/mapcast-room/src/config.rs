//! Room configuration.

use serde::{Deserialize, Serialize};

/// Sizing for a map's pending-message queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Lines that may wait for the fan-out worker before `send_message`
    /// starts failing with `QueueFull`. Must be at least 1.
    pub queue_capacity: usize,
}

impl RoomConfig {
    pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

    pub fn with_capacity(queue_capacity: usize) -> Self {
        Self { queue_capacity }
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            queue_capacity: Self::DEFAULT_QUEUE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_config_default() {
        assert_eq!(RoomConfig::default().queue_capacity, 100);
    }

    #[test]
    fn test_room_config_with_capacity() {
        assert_eq!(RoomConfig::with_capacity(8).queue_capacity, 8);
    }
}
