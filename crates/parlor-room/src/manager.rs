//! Room manager: creates rooms on first join, destroys them on last leave,
//! and routes operations to the right actor.

use std::collections::HashMap;

use parlor_protocol::{GameState, PlayerId, RoomId};

use crate::room::spawn_room;
use crate::{PlayerSender, RoomError, RoomHandle};

/// Default mailbox size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Tracks every live room and which room each player occupies.
///
/// This is the entry point for room operations from the connection layer.
/// It is not internally synchronized — the server wraps it in a mutex and
/// holds the lock only long enough to reach the right [`RoomHandle`]; the
/// per-room serialization happens in the actors.
pub struct RoomManager {
    /// Live rooms, keyed by room id.
    rooms: HashMap<RoomId, RoomHandle>,

    /// Maps each player to the room they occupy. A player is in at most
    /// one room at a time.
    player_rooms: HashMap<PlayerId, RoomId>,
}

impl RoomManager {
    /// Creates a new, empty room manager.
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
        }
    }

    /// Adds a player to a room, creating the room if this is its first
    /// join.
    ///
    /// Rejects empty identifiers before any side effect, and rejects a
    /// join while the player occupies a *different* room. Joining a room
    /// the player is already in is a reconnect: idempotent for
    /// membership, and the new `sender` replaces the old connection's.
    pub async fn join_room(
        &mut self,
        room_id: &RoomId,
        player_id: &PlayerId,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        if room_id.is_empty() || player_id.is_empty() {
            return Err(RoomError::MissingIdentifier);
        }
        if let Some(current) = self.player_rooms.get(player_id) {
            if current != room_id {
                return Err(RoomError::AlreadyInRoom(
                    player_id.clone(),
                    current.clone(),
                ));
            }
        }

        let handle = self
            .rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::info!(room_id = %room_id, "room created");
                spawn_room(room_id.clone(), DEFAULT_CHANNEL_SIZE)
            })
            .clone();

        handle.join(player_id.clone(), sender).await?;
        self.player_rooms
            .insert(player_id.clone(), room_id.clone());
        Ok(())
    }

    /// Removes a player from a room, destroying the room if it empties.
    pub async fn leave_room(
        &mut self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<(), RoomError> {
        if room_id.is_empty() || player_id.is_empty() {
            return Err(RoomError::MissingIdentifier);
        }
        let handle = self
            .rooms
            .get(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?
            .clone();

        let remaining = handle.leave(player_id.clone()).await?;
        self.player_rooms.remove(player_id);

        if remaining == 0 {
            tracing::info!(room_id = %room_id, "room empty, destroying");
            if let Some(handle) = self.rooms.remove(room_id) {
                let _ = handle.shutdown().await;
            }
        }
        Ok(())
    }

    /// Stores a snapshot and fans it out to the room's members.
    ///
    /// A push to a room that doesn't exist is dropped with a warning, the
    /// same silent treatment a non-member push gets inside the actor.
    pub async fn push_state(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
        state: GameState,
    ) -> Result<(), RoomError> {
        match self.rooms.get(room_id) {
            Some(handle) => handle.push(player_id.clone(), state).await,
            None => {
                tracing::warn!(
                    room_id = %room_id,
                    player_id = %player_id,
                    "push to unknown room dropped"
                );
                Ok(())
            }
        }
    }

    /// Returns the room's membership in join order, empty for unknown
    /// rooms.
    pub async fn members(&self, room_id: &RoomId) -> Vec<PlayerId> {
        match self.rooms.get(room_id) {
            Some(handle) => handle.members().await.unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Returns the room's stored snapshot, `None` if the room doesn't
    /// exist or nothing has been pushed yet.
    pub async fn state(&self, room_id: &RoomId) -> Option<GameState> {
        match self.rooms.get(room_id) {
            Some(handle) => handle.state().await.unwrap_or_default(),
            None => None,
        }
    }

    /// The room a player currently occupies, if any.
    pub fn player_room(&self, player_id: &PlayerId) -> Option<&RoomId> {
        self.player_rooms.get(player_id)
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}
