//! The typed game-state model.
//!
//! The original wire format for snapshots was an untyped JSON blob the relay
//! stored and forwarded blindly. Here it is a tagged union — one variant per
//! game kind, discriminated by a `"game"` tag — so a malformed push fails at
//! the decode boundary instead of corrupting every member's view. The relay
//! remains deliberately state-agnostic beyond that structural check: it
//! never judges whether a transition was *legal*, only whether it parses.

mod cards;
mod fishing;
mod kniffel;
mod nim;

pub use cards::{Card, Rank, Suit};
pub use fishing::{FishingMove, FishingPhase, FishingState, PendingAsk};
pub use kniffel::{Category, KniffelState, KniffelWinner, ScoreSheet};
pub use nim::{CoinMarker, NimMove, NimState};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::PlayerId;

// ---------------------------------------------------------------------------
// Game kind
// ---------------------------------------------------------------------------

/// The game a room is playing. Derived from the stored snapshot; the relay
/// records it for logging and introspection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameKind {
    Nim,
    Kniffel,
    Fishing,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nim => write!(f, "nim"),
            Self::Kniffel => write!(f, "kniffel"),
            Self::Fishing => write!(f, "fishing"),
        }
    }
}

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// A player's seat at the table: identity plus display name.
///
/// Rosters come from the external room API (`getPlayers`), in join order.
/// Turn pointers across all three games index into this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
}

impl Seat {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// A complete snapshot of one game, replaced wholesale by every push.
///
/// `#[serde(tag = "game")]` nests the discriminator inside the snapshot:
/// `{ "game": "nim", "heaps": [1,3,5,7], ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "camelCase")]
pub enum GameState {
    Nim(NimState),
    Kniffel(KniffelState),
    Fishing(FishingState),
}

impl GameState {
    /// The game kind this snapshot belongs to.
    pub fn kind(&self) -> GameKind {
        match self {
            Self::Nim(_) => GameKind::Nim,
            Self::Kniffel(_) => GameKind::Kniffel,
            Self::Fishing(_) => GameKind::Fishing,
        }
    }

    /// Whether the snapshot says the game has ended. Used by the relay for
    /// logging only.
    pub fn is_game_over(&self) -> bool {
        match self {
            Self::Nim(s) => s.game_over,
            Self::Kniffel(s) => s.game_over,
            Self::Fishing(s) => s.game_over,
        }
    }

    /// Generic repair applied by the relay when a player departs mid-game.
    ///
    /// Two rules, both game-agnostic from the relay's point of view:
    /// per-player score entries for the departed player are deleted, and a
    /// current-player index that is now out of range for the remaining
    /// member count is reset to 0. Anything smarter (advancing past a
    /// finished sheet, ending a drained game) is game-specific repair and
    /// belongs to the engines, driven by the clients.
    ///
    /// Returns `true` if the snapshot was modified and must be re-broadcast.
    pub fn prune_player(&mut self, departed: &PlayerId, remaining: usize) -> bool {
        let mut modified = false;

        if let Self::Kniffel(s) = self {
            if s.scores.remove(departed).is_some() {
                modified = true;
            }
        }

        let index = match self {
            Self::Nim(s) => &mut s.current_player_index,
            Self::Kniffel(s) => &mut s.current_player_index,
            Self::Fishing(s) => &mut s.current_player_index,
        };
        if *index >= remaining && remaining > 0 {
            *index = 0;
            modified = true;
        }

        modified
    }
}

// =========================================================================
// Tests
// =========================================================================
