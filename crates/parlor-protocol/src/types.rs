//! Identity types and the relay's message vocabulary.
//!
//! Everything here travels on the wire as JSON. Field and variant names are
//! camelCase to match what browser clients send and receive.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::state::GameState;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// An opaque player identifier.
///
/// Players are minted by the external room/join API (a relational store the
/// relay never talks to); the relay treats the identifier as a token of
/// identity without validating its provenance. Possession of a valid room
/// code plus a player id is the whole trust model.
///
/// `#[serde(transparent)]` makes `PlayerId("p1")` serialize as `"p1"`, not
/// `{"0":"p1"}`, so ids can be used directly as JSON map keys.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Returns `true` if the identifier is empty (invalid at the relay
    /// boundary).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An opaque room identifier. Same trust model as [`PlayerId`].
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Returns `true` if the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// Client → server messages
// ---------------------------------------------------------------------------

/// A message sent by a client to the relay.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON, e.g.
/// `{ "type": "joinRoom", "roomId": "r1", "playerId": "p1" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Join a room (or reconnect to it). Triggers registry join plus
    /// snapshot/membership hydration for the joining connection.
    JoinRoom {
        room_id: RoomId,
        player_id: PlayerId,
        #[serde(default)]
        player_name: Option<String>,
    },

    /// Ask for the current membership of a room. Answered with a one-shot
    /// [`ServerMessage::PlayersUpdate`] to the requester only.
    RequestPlayerList { room_id: RoomId },

    /// Replace the room's stored snapshot and fan it out to every member.
    /// Only accepted from current members of the room; the relay validates
    /// membership, not game legality.
    PushState { room_id: RoomId, state: GameState },

    /// Explicitly depart from a room. The `player_id` names the departing
    /// player, which is not necessarily the sender — the host kicks a
    /// player by sending a leave on their behalf.
    LeaveRoom { room_id: RoomId, player_id: PlayerId },
}

// ---------------------------------------------------------------------------
// Server → client messages
// ---------------------------------------------------------------------------

/// A message sent by the relay to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// The latest snapshot for the room. Sent to a joiner on hydration and
    /// broadcast to all members (including the pusher) after every accepted
    /// push.
    GameState { state: GameState },

    /// The room's current membership, in join order. Broadcast on every
    /// membership change and sent on request.
    PlayersUpdate { players: Vec<PlayerId> },

    /// A join was rejected. Sent only to the connection that attempted it.
    JoinError { message: String },
}

// =========================================================================
// Tests
// =========================================================================
