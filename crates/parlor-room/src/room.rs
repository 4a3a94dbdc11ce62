//! Room actor: an isolated Tokio task owning one room's membership and its
//! latest snapshot.
//!
//! The actor never interprets game rules. It checks exactly one thing about
//! a push — that the pusher is a current member — and otherwise behaves as
//! a last-writer-wins store with fan-out. Two members pushing
//! "simultaneously" race, and the second push fully overwrites the first;
//! that weak-consistency model is the documented contract, not an
//! oversight.

use std::collections::HashMap;

use parlor_protocol::{GameState, PlayerId, RoomId, ServerMessage};
use tokio::sync::{mpsc, oneshot};

use crate::RoomError;

/// Channel on which a joined connection receives room broadcasts.
pub type PlayerSender = mpsc::UnboundedSender<ServerMessage>;

/// Commands sent to a room actor through its mailbox.
pub(crate) enum RoomCommand {
    /// Add a player (or re-attach a reconnecting one) and hydrate them.
    Join {
        player: PlayerId,
        sender: PlayerSender,
        reply: oneshot::Sender<()>,
    },

    /// Remove a player. Replies with the remaining member count so the
    /// manager can destroy an emptied room.
    Leave {
        player: PlayerId,
        reply: oneshot::Sender<Result<usize, RoomError>>,
    },

    /// Store a snapshot and fan it out, if the pusher is a member.
    Push { player: PlayerId, state: GameState },

    /// Request the current membership.
    Members {
        reply: oneshot::Sender<Vec<PlayerId>>,
    },

    /// Request the stored snapshot.
    GetState {
        reply: oneshot::Sender<Option<GameState>>,
    },

    /// Shut down the actor, dropping membership and state.
    Shutdown,
}

/// Handle to a running room actor. Cheap to clone.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's identifier.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Joins (or re-joins) a player, replacing their outbound channel.
    pub async fn join(
        &self,
        player: PlayerId,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                player,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Removes a player. Returns how many members remain.
    pub async fn leave(&self, player: PlayerId) -> Result<usize, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                player,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?
    }

    /// Submits a snapshot push (fire-and-forget; non-members are dropped
    /// inside the actor).
    pub async fn push(
        &self,
        player: PlayerId,
        state: GameState,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Push { player, state })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Returns the current membership, in join order.
    pub async fn members(&self) -> Result<Vec<PlayerId>, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Members { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Returns the stored snapshot, if any.
    pub async fn state(&self) -> Result<Option<GameState>, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::GetState { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room_id: RoomId,
    /// Members in join order. Linear scans are fine at table sizes.
    members: Vec<PlayerId>,
    /// Per-member outbound channels.
    senders: HashMap<PlayerId, PlayerSender>,
    /// The latest accepted snapshot.
    state: Option<GameState>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    async fn run(mut self) {
        tracing::info!(room_id = %self.room_id, "room opened");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    player,
                    sender,
                    reply,
                } => {
                    self.handle_join(player, sender);
                    let _ = reply.send(());
                }
                RoomCommand::Leave { player, reply } => {
                    let _ = reply.send(self.handle_leave(player));
                }
                RoomCommand::Push { player, state } => {
                    self.handle_push(player, state);
                }
                RoomCommand::Members { reply } => {
                    let _ = reply.send(self.members.clone());
                }
                RoomCommand::GetState { reply } => {
                    let _ = reply.send(self.state.clone());
                }
                RoomCommand::Shutdown => break,
            }
        }

        tracing::info!(room_id = %self.room_id, "room closed");
    }

    /// Join is idempotent: the same player joining again is a reconnect.
    /// Either way the connection's outbound channel is (re)attached, the
    /// joiner is hydrated with the stored snapshot, and the whole room
    /// hears the membership.
    fn handle_join(&mut self, player: PlayerId, sender: PlayerSender) {
        if self.members.contains(&player) {
            tracing::info!(
                room_id = %self.room_id,
                player_id = %player,
                "player rejoined"
            );
        } else {
            self.members.push(player.clone());
            tracing::info!(
                room_id = %self.room_id,
                player_id = %player,
                members = self.members.len(),
                "player joined"
            );
        }
        self.senders.insert(player.clone(), sender);

        if let Some(state) = &self.state {
            self.send_to(
                &player,
                ServerMessage::GameState {
                    state: state.clone(),
                },
            );
        }
        self.broadcast_members();
    }

    /// Membership is the only authorization a push needs — and the only
    /// one it gets. Non-member pushes are dropped without a reply; the
    /// relay assumes cooperative clients and refuses to referee.
    fn handle_push(&mut self, player: PlayerId, state: GameState) {
        if !self.members.contains(&player) {
            tracing::warn!(
                room_id = %self.room_id,
                player_id = %player,
                "push from non-member dropped"
            );
            return;
        }

        tracing::info!(
            room_id = %self.room_id,
            player_id = %player,
            game = %state.kind(),
            game_over = state.is_game_over(),
            "state accepted"
        );

        let msg = ServerMessage::GameState {
            state: state.clone(),
        };
        self.state = Some(state);
        for member in &self.members {
            self.send_to(member, msg.clone());
        }
    }

    fn handle_leave(&mut self, player: PlayerId) -> Result<usize, RoomError> {
        let Some(pos) = self.members.iter().position(|p| *p == player) else {
            return Err(RoomError::NotAMember(player, self.room_id.clone()));
        };
        self.members.remove(pos);
        self.senders.remove(&player);
        let remaining = self.members.len();

        tracing::info!(
            room_id = %self.room_id,
            player_id = %player,
            members = remaining,
            "player left"
        );

        // Generic departure repair: drop the departed player's score entry
        // and re-range the turn pointer, then let everyone see the result.
        if let Some(state) = &mut self.state {
            if state.prune_player(&player, remaining) {
                let msg = ServerMessage::GameState {
                    state: state.clone(),
                };
                for member in &self.members {
                    self.send_to(member, msg.clone());
                }
            }
        }
        self.broadcast_members();

        Ok(remaining)
    }

    fn broadcast_members(&self) {
        let msg = ServerMessage::PlayersUpdate {
            players: self.members.clone(),
        };
        for member in &self.members {
            self.send_to(member, msg.clone());
        }
    }

    /// Sends to a single member, silently dropping if their receiver is
    /// gone (connection already dead; the disconnect path will catch up).
    fn send_to(&self, player: &PlayerId, msg: ServerMessage) {
        if let Some(sender) = self.senders.get(player) {
            let _ = sender.send(msg);
        }
    }
}

/// Spawns a new room actor task and returns a handle to it.
pub(crate) fn spawn_room(room_id: RoomId, channel_size: usize) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room_id: room_id.clone(),
        members: Vec::new(),
        senders: HashMap::new(),
        state: None,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
