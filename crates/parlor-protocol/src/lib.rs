//! Wire protocol for Parlor.
//!
//! This crate defines the "language" that game clients and the relay speak:
//!
//! - **Identity** ([`RoomId`], [`PlayerId`]) — opaque string identifiers
//!   minted by the external room/join API.
//! - **Messages** ([`ClientMessage`], [`ServerMessage`]) — the event
//!   vocabulary of the relay (`joinRoom`, `pushState`, `playersUpdate`, ...).
//! - **Game state** ([`GameState`] and the per-game snapshot types) — the
//!   tagged union that replaces the untyped JSON blob: every pushed snapshot
//!   is validated against one of the three game variants at the relay
//!   boundary, so malformed pushes fail fast instead of propagating to all
//!   room members.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how messages become bytes.
//!
//! The protocol layer sits between transport (raw frames) and the room
//! layer (membership, storage). It knows nothing about connections or
//! rooms — only shapes.

mod codec;
mod error;
pub mod state;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use state::{
    Card, Category, CoinMarker, FishingMove, FishingPhase, FishingState,
    GameKind, GameState, KniffelState, KniffelWinner, NimMove, NimState,
    PendingAsk, Rank, ScoreSheet, Seat, Suit,
};
pub use types::{ClientMessage, PlayerId, RoomId, ServerMessage};
