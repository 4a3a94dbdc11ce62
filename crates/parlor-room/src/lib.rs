//! Room registry and state store for the Parlor relay.
//!
//! Each room runs as an isolated Tokio task (actor model) owning two things:
//! the ordered set of connected players and the latest game-state snapshot.
//! All mutations for one room are serialized through the actor's mailbox —
//! the single-writer-per-room discipline that replaces the original's
//! global mutable maps — while different rooms proceed fully in parallel.
//!
//! # Key types
//!
//! - [`RoomManager`] — creates rooms on first join, destroys them on last
//!   leave, routes operations
//! - [`RoomHandle`] — sends commands to a running room actor
//! - [`PlayerSender`] — the outbound channel a joined connection listens on

mod error;
mod manager;
mod room;

pub use error::RoomError;
pub use manager::RoomManager;
pub use room::{PlayerSender, RoomHandle};
