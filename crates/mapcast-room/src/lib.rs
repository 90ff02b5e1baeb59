//! Map (room) layer for Mapcast.
//!
//! Each map is a broadcast domain: a membership set plus a bounded queue
//! of pending lines, drained by one Tokio task (the fan-out worker) for
//! the map's whole lifetime.
//!
//! # Key types
//!
//! - [`Room`]: membership, queue, and the handle to its worker
//! - [`RoomConfig`]: queue sizing
//! - [`RoomInfo`]: a point-in-time snapshot for inspection

mod config;
mod error;
mod room;

pub use config::RoomConfig;
pub use error::RoomError;
pub use room::{Room, RoomInfo};
