//! Player layer for Mapcast.
//!
//! A [`Player`] is the leaf of the system:
//!
//! 1. **Identity**: an immutable [`PlayerName`](mapcast_protocol::PlayerName)
//! 2. **Seat**: a nullable back-reference to the map the player is in
//!    ([`Seat`]), which doubles as the path to that map's message queue
//! 3. **Inbox**: a bounded FIFO of delivered lines ([`Inbox`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Game (above)   ← owns players, moves them between maps
//!     ↕
//! Room           ← holds weak references to players, fills their inboxes
//!     ↕
//! Player (this crate)  ← identity, seat, inbox, SendMessage
//!     ↕
//! Protocol (below)     ← PlayerName, MapId, Envelope
//! ```

mod error;
mod inbox;
mod player;

pub use error::{PlayerError, TryRecvError};
pub use inbox::Inbox;
pub use player::{Player, Seat};

/// Default inbox capacity, in lines.
pub const DEFAULT_INBOX_CAPACITY: usize = 100;
