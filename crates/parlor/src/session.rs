//! Per-connection session: which player a connection speaks for, and which
//! room they occupy.
//!
//! The state machine is
//!
//! ```text
//! Anonymous ──(join)──→ Joined(room, player) ──(leave)──→ Left(player)
//!                            │        ↑                      │
//!                            └─(rejoin, same player)─────────┘
//! ```
//!
//! A connection carries exactly one player identifier for its lifetime:
//! the first successful join binds it, and every later join on the same
//! connection must name the same player. Reconnection is a *new*
//! connection re-joining with the same player id — idempotent for the
//! room, hydrating for the client.

use parlor_protocol::{PlayerId, RoomId};

/// Errors from the connection-session state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The connection already speaks for a different player.
    #[error("connection is bound to player {bound}, cannot act as {attempted}")]
    PlayerMismatch {
        bound: PlayerId,
        attempted: PlayerId,
    },
}

/// The lifecycle state of one connection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionSession {
    /// Connected, no join yet.
    #[default]
    Anonymous,
    /// Joined a room as a player.
    Joined { room: RoomId, player: PlayerId },
    /// Explicitly left; the player binding persists for the connection's
    /// lifetime.
    Left { player: PlayerId },
}

impl ConnectionSession {
    pub fn new() -> Self {
        Self::Anonymous
    }

    /// Checks whether this connection may join as `player`.
    pub fn authorize_join(&self, player: &PlayerId) -> Result<(), SessionError> {
        match self {
            Self::Anonymous => Ok(()),
            Self::Joined { player: bound, .. } | Self::Left { player: bound } => {
                if bound == player {
                    Ok(())
                } else {
                    Err(SessionError::PlayerMismatch {
                        bound: bound.clone(),
                        attempted: player.clone(),
                    })
                }
            }
        }
    }

    /// Records a successful join.
    pub fn mark_joined(&mut self, room: RoomId, player: PlayerId) {
        *self = Self::Joined { room, player };
    }

    /// Records an explicit leave, if it matches the current binding.
    /// A leave sent on another player's behalf (a kick) leaves this
    /// connection's state untouched.
    pub fn mark_left(&mut self, room: &RoomId, player: &PlayerId) {
        if let Self::Joined { room: r, player: p } = self {
            if r == room && p == player {
                *self = Self::Left { player: player.clone() };
            }
        }
    }

    /// The room/player binding while joined.
    pub fn joined(&self) -> Option<(&RoomId, &PlayerId)> {
        match self {
            Self::Joined { room, player } => Some((room, player)),
            _ => None,
        }
    }

    /// The player this connection speaks for, if any join ever succeeded.
    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            Self::Anonymous => None,
            Self::Joined { player, .. } | Self::Left { player } => Some(player),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
