//! # Parlor
//!
//! State-relay backend for browser parlor games.
//!
//! Clients compute game transitions locally with the `parlor-games`
//! engines and push complete snapshots through this relay, which stores
//! the latest snapshot per room and fans it out to every member. The relay
//! is deliberately *not* a referee: it validates snapshot structure and
//! pusher membership, nothing else. That client-authoritative trust model
//! is a design boundary, not an omission — adding server-side legality
//! checks would change the consistency and latency model.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use parlor::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), RelayError> {
//!     let server = RelayServerBuilder::new()
//!         .bind("0.0.0.0:4000")
//!         .build()
//!         .await?;
//!     server.run().await
//! }
//! ```

mod error;
mod handler;
mod server;
mod session;

pub use error::RelayError;
pub use server::{RelayServer, RelayServerBuilder};
pub use session::{ConnectionSession, SessionError};

/// The commonly needed imports in one place.
pub mod prelude {
    pub use crate::{
        ConnectionSession, RelayError, RelayServer, RelayServerBuilder,
        SessionError,
    };
    pub use parlor_protocol::{
        ClientMessage, Codec, GameKind, GameState, JsonCodec, PlayerId,
        RoomId, ServerMessage,
    };
    pub use parlor_room::RoomManager;
}
