//! Per-connection handler: message routing, heartbeats, and disconnect
//! cleanup.
//!
//! There is no handshake — possession of a room id and a player id is the
//! whole credential (both are minted by the external room API). The flow:
//!
//!   1. Loop: relay room broadcasts out, dispatch client messages in.
//!   2. Ping a silent connection after the heartbeat interval; a second
//!      silent interval means the transport is dead.
//!   3. On exit — clean close, transport error, or timeout — run the same
//!      registry/state cleanup an explicit leave runs.

use std::sync::Arc;
use std::time::Duration;

use parlor_protocol::{ClientMessage, Codec, ServerMessage};
use parlor_transport::{Connection, Frame, WebSocketConnection};
use tokio::sync::mpsc;

use crate::RelayError;
use crate::server::ServerState;
use crate::session::ConnectionSession;

/// Handles a single connection from accept to cleanup.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
    heartbeat: Duration,
) {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (tx, rx) = mpsc::unbounded_channel();
    let mut session = ConnectionSession::new();

    if let Err(e) =
        run_loop(&conn, &state, &mut session, &tx, rx, heartbeat).await
    {
        tracing::debug!(%conn_id, error = %e, "connection ended with error");
    }

    // Transport loss gets the same cleanup as an explicit leave: registry
    // removal, departure repair, broadcasts, and room destruction when the
    // last member is gone.
    if let Some((room, player)) = session.joined() {
        let (room, player) = (room.clone(), player.clone());
        tracing::info!(
            %conn_id,
            room_id = %room,
            player_id = %player,
            "disconnect cleanup"
        );
        let mut rooms = state.rooms.lock().await;
        if let Err(e) = rooms.leave_room(&room, &player).await {
            // Usually means the player was already kicked or left.
            tracing::debug!(
                %conn_id,
                error = %e,
                "disconnect cleanup found nothing to do"
            );
        }
    }
}

async fn run_loop<C: Codec>(
    conn: &WebSocketConnection,
    state: &Arc<ServerState<C>>,
    session: &mut ConnectionSession,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    heartbeat: Duration,
) -> Result<(), RelayError> {
    let mut awaiting_pong = false;

    loop {
        tokio::select! {
            // Room broadcasts queued for this connection.
            Some(msg) = rx.recv() => {
                let bytes = state.codec.encode(&msg)?;
                conn.send(&bytes).await.map_err(RelayError::Transport)?;
            }

            // Inbound traffic, bounded by the heartbeat interval.
            result = tokio::time::timeout(heartbeat, conn.recv()) => {
                match result {
                    Err(_elapsed) => {
                        if awaiting_pong {
                            tracing::info!(
                                conn_id = %conn.id(),
                                "heartbeat timed out"
                            );
                            return Ok(());
                        }
                        conn.ping().await.map_err(RelayError::Transport)?;
                        awaiting_pong = true;
                    }
                    Ok(Ok(Some(Frame::Pong))) => {
                        awaiting_pong = false;
                    }
                    Ok(Ok(Some(Frame::Data(data)))) => {
                        awaiting_pong = false;
                        let msg: ClientMessage = match state.codec.decode(&data)
                        {
                            Ok(msg) => msg,
                            Err(e) => {
                                // Fail fast at the boundary: a frame that
                                // doesn't parse (including a snapshot that
                                // matches no game variant) never reaches
                                // the store.
                                tracing::debug!(
                                    conn_id = %conn.id(),
                                    error = %e,
                                    "undecodable frame skipped"
                                );
                                continue;
                            }
                        };
                        dispatch(conn, state, session, tx, msg).await?;
                    }
                    Ok(Ok(None)) => {
                        tracing::info!(
                            conn_id = %conn.id(),
                            "connection closed cleanly"
                        );
                        return Ok(());
                    }
                    Ok(Err(e)) => {
                        tracing::debug!(
                            conn_id = %conn.id(),
                            error = %e,
                            "recv error"
                        );
                        return Ok(());
                    }
                }
            }
        }
    }
}

async fn dispatch<C: Codec>(
    conn: &WebSocketConnection,
    state: &Arc<ServerState<C>>,
    session: &mut ConnectionSession,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    msg: ClientMessage,
) -> Result<(), RelayError> {
    match msg {
        ClientMessage::JoinRoom {
            room_id,
            player_id,
            player_name,
        } => {
            if let Err(e) = session.authorize_join(&player_id) {
                send_join_error(conn, &state.codec, &e.to_string()).await?;
                return Ok(());
            }

            // Lock only for the join itself; hydration and broadcasts run
            // in the room actor.
            let join_result = {
                let mut rooms = state.rooms.lock().await;
                rooms.join_room(&room_id, &player_id, tx.clone()).await
            };

            match join_result {
                Ok(()) => {
                    tracing::info!(
                        room_id = %room_id,
                        player_id = %player_id,
                        player_name = player_name.as_deref().unwrap_or("-"),
                        "join accepted"
                    );
                    session.mark_joined(room_id, player_id);
                }
                Err(e) => {
                    tracing::debug!(
                        room_id = %room_id,
                        player_id = %player_id,
                        error = %e,
                        "join rejected"
                    );
                    send_join_error(conn, &state.codec, &e.to_string())
                        .await?;
                }
            }
        }

        ClientMessage::RequestPlayerList { room_id } => {
            let players = state.rooms.lock().await.members(&room_id).await;
            let reply = ServerMessage::PlayersUpdate { players };
            let bytes = state.codec.encode(&reply)?;
            conn.send(&bytes).await.map_err(RelayError::Transport)?;
        }

        ClientMessage::PushState {
            room_id,
            state: snapshot,
        } => {
            // The pusher is whoever this connection is bound to, not
            // whatever the payload claims; membership is checked in the
            // room actor. Unidentified pushes are dropped silently by
            // design — the relay assumes a cooperative client.
            let Some(player) = session.player().cloned() else {
                tracing::warn!(
                    conn_id = %conn.id(),
                    room_id = %room_id,
                    "push from unidentified connection dropped"
                );
                return Ok(());
            };
            let result = {
                let rooms = state.rooms.lock().await;
                rooms.push_state(&room_id, &player, snapshot).await
            };
            if let Err(e) = result {
                tracing::debug!(
                    room_id = %room_id,
                    player_id = %player,
                    error = %e,
                    "push not delivered"
                );
            }
        }

        ClientMessage::LeaveRoom { room_id, player_id } => {
            // The departing player comes from the payload, not the
            // session: the host kicks a player by sending a leave on
            // their behalf.
            let result = {
                let mut rooms = state.rooms.lock().await;
                rooms.leave_room(&room_id, &player_id).await
            };
            if let Err(e) = result {
                tracing::debug!(
                    room_id = %room_id,
                    player_id = %player_id,
                    error = %e,
                    "leave failed"
                );
            }
            session.mark_left(&room_id, &player_id);
        }
    }

    Ok(())
}

/// Reports a rejected join to the attempting connection only.
async fn send_join_error<C: Codec>(
    conn: &WebSocketConnection,
    codec: &C,
    message: &str,
) -> Result<(), RelayError> {
    let reply = ServerMessage::JoinError {
        message: message.to_string(),
    };
    let bytes = codec.encode(&reply)?;
    conn.send(&bytes).await.map_err(RelayError::Transport)
}
