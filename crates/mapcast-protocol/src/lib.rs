//! Shared vocabulary for Mapcast.
//!
//! This crate defines the small set of types every other layer speaks:
//!
//! - **Identity** ([`PlayerName`], [`PlayerKey`], [`MapId`]): who a
//!   player is and which map (room) they are in.
//! - **Messages** ([`Envelope`]): the unit a room queues and fans out.
//! - **Errors** ([`ProtocolError`]): what can go wrong when raw caller
//!   input is turned into those types.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about locks, tasks or rooms. It only
//! validates and formats.
//!
//! ```text
//! Caller input (strings, ints) → Protocol (PlayerName, MapId) → Player / Room / Game
//! ```

mod error;
mod types;

pub use error::ProtocolError;
pub use types::{Envelope, MapId, PlayerKey, PlayerName};
