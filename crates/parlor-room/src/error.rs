//! Error types for the room layer.

use parlor_protocol::{PlayerId, RoomId};

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// Room and player identifiers must be non-empty on join/leave.
    #[error("room and player identifiers are required")]
    MissingIdentifier,

    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The player is not a member of this room.
    #[error("player {0} is not in room {1}")]
    NotAMember(PlayerId, RoomId),

    /// The player is already a member of a different room.
    #[error("player {0} is already in room {1}")]
    AlreadyInRoom(PlayerId, RoomId),

    /// The room's command channel is closed or full.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}
