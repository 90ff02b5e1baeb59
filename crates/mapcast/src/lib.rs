//! # Mapcast
//!
//! In-process presence and broadcast across a fixed set of maps (rooms).
//!
//! Players connect to a [`Game`], sit in at most one map at a time, and
//! chat. Callers get [`PlayerHandle`]s and [`RoomHandle`]s back; moving a
//! player between maps only happens through
//! [`Game::switch_player_map`].
//!
//! Each map fans every line out to the inboxes of its other members from
//! a dedicated background task. Transport, auth and persistence are left
//! to the caller; this crate is the concurrent core they sit on.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mapcast::prelude::*;
//!
//! # async fn demo() -> Result<(), GameError> {
//! let game = Game::new(&[1, 2])?;
//! let alice = game.connect_player("alice").await?;
//! let bob = game.connect_player("bob").await?;
//! game.switch_player_map("alice", MapId(1)).await?;
//! game.switch_player_map("bob", MapId(1)).await?;
//!
//! alice.send_message("hi").await?;
//! assert_eq!(bob.inbox().recv().await.as_deref(), Some("Alice says: hi"));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod game;
mod handle;
pub mod logging;

pub use config::GameConfig;
pub use error::GameError;
pub use game::Game;
pub use handle::{PlayerHandle, RoomHandle};

pub use mapcast_player::{Inbox, PlayerError, TryRecvError};
pub use mapcast_protocol::{Envelope, MapId, PlayerKey, PlayerName, ProtocolError};
pub use mapcast_room::{RoomConfig, RoomError, RoomInfo};

pub mod prelude {
    //! The types most callers need.
    pub use crate::{Game, GameConfig, GameError, Inbox, MapId, PlayerHandle, RoomHandle, RoomInfo};
}
