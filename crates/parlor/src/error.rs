//! Unified error type for the relay.

use parlor_protocol::ProtocolError;
use parlor_room::RoomError;
use parlor_transport::TransportError;

use crate::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attributes generate the `From` impls, so `?` converts
/// layer errors automatically anywhere in the relay.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (unknown room, membership violations).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A connection-session error (player binding violations).
    #[error(transparent)]
    Session(#[from] SessionError),
}
