//! End-to-end tests: real WebSocket clients against a running relay.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use parlor::prelude::*;
use parlor_protocol::{KniffelState, NimState, Seat};
use tokio_tungstenite::tungstenite::Message;

// =========================================================================
// Helpers
// =========================================================================

type Ws = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Starts a relay on a random port and returns its address.
async fn start_server() -> String {
    let server = RelayServerBuilder::new()
        .bind("127.0.0.1:0")
        .build()
        .await
        .expect("server should build");
    let addr = server.local_addr().expect("local addr").to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn connect(addr: &str) -> Ws {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("client should connect");
    ws
}

fn rid(id: &str) -> RoomId {
    RoomId::from(id)
}

fn pid(id: &str) -> PlayerId {
    PlayerId::from(id)
}

async fn send(ws: &mut Ws, msg: &ClientMessage) {
    let bytes = serde_json::to_vec(msg).expect("encode");
    ws.send(Message::Binary(bytes.into())).await.expect("send");
}

async fn recv(ws: &mut Ws) -> ServerMessage {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for message")
            .expect("stream ended")
            .expect("recv failed");
        // Heartbeat frames from the relay are answered by tungstenite;
        // only data frames carry messages.
        if msg.is_ping() || msg.is_pong() {
            continue;
        }
        return serde_json::from_slice(&msg.into_data()).expect("decode");
    }
}

/// Asserts that nothing arrives within a short window.
async fn assert_silent(ws: &mut Ws) {
    let result =
        tokio::time::timeout(Duration::from_millis(100), ws.next()).await;
    assert!(result.is_err(), "expected silence, got {result:?}");
}

async fn join(ws: &mut Ws, room: &str, player: &str) {
    send(
        ws,
        &ClientMessage::JoinRoom {
            room_id: rid(room),
            player_id: pid(player),
            player_name: Some(player.to_uppercase()),
        },
    )
    .await;
}

fn nim_state() -> GameState {
    GameState::Nim(NimState::new(&[1, 3, 5, 7]))
}

// =========================================================================
// Join and hydration
// =========================================================================

#[tokio::test]
async fn test_join_delivers_membership() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    join(&mut ws, "r1", "p1").await;

    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::PlayersUpdate {
            players: vec![pid("p1")],
        }
    );
}

#[tokio::test]
async fn test_join_with_empty_player_id_is_rejected() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send(
        &mut ws,
        &ClientMessage::JoinRoom {
            room_id: rid("r1"),
            player_id: pid(""),
            player_name: None,
        },
    )
    .await;

    match recv(&mut ws).await {
        ServerMessage::JoinError { message } => {
            assert!(message.contains("required"), "got: {message}");
        }
        other => panic!("expected JoinError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_second_join_as_different_player_is_rejected() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;
    join(&mut ws, "r1", "p1").await;
    let _ = recv(&mut ws).await; // playersUpdate

    join(&mut ws, "r1", "p2").await;

    assert!(matches!(
        recv(&mut ws).await,
        ServerMessage::JoinError { .. }
    ));
}

#[tokio::test]
async fn test_joiner_is_hydrated_with_stored_snapshot() {
    let addr = start_server().await;
    let mut p1 = connect(&addr).await;
    join(&mut p1, "r1", "p1").await;
    let _ = recv(&mut p1).await; // playersUpdate

    send(
        &mut p1,
        &ClientMessage::PushState {
            room_id: rid("r1"),
            state: nim_state(),
        },
    )
    .await;
    let _ = recv(&mut p1).await; // own gameState broadcast

    let mut p2 = connect(&addr).await;
    join(&mut p2, "r1", "p2").await;

    // Hydration first, then the membership broadcast.
    assert_eq!(
        recv(&mut p2).await,
        ServerMessage::GameState { state: nim_state() }
    );
    assert_eq!(
        recv(&mut p2).await,
        ServerMessage::PlayersUpdate {
            players: vec![pid("p1"), pid("p2")],
        }
    );
}

// =========================================================================
// Push
// =========================================================================

#[tokio::test]
async fn test_push_fans_out_to_every_member_including_pusher() {
    let addr = start_server().await;
    let mut p1 = connect(&addr).await;
    let mut p2 = connect(&addr).await;
    join(&mut p1, "r1", "p1").await;
    let _ = recv(&mut p1).await;
    join(&mut p2, "r1", "p2").await;
    let _ = recv(&mut p1).await; // second playersUpdate
    let _ = recv(&mut p2).await;

    send(
        &mut p1,
        &ClientMessage::PushState {
            room_id: rid("r1"),
            state: nim_state(),
        },
    )
    .await;

    let expected = ServerMessage::GameState { state: nim_state() };
    assert_eq!(recv(&mut p1).await, expected);
    assert_eq!(recv(&mut p2).await, expected);
}

#[tokio::test]
async fn test_push_before_join_is_dropped() {
    let addr = start_server().await;
    let mut member = connect(&addr).await;
    join(&mut member, "r1", "p1").await;
    let _ = recv(&mut member).await;

    // An anonymous connection pushes into the room: dropped, no error
    // surfaced to anyone.
    let mut outsider = connect(&addr).await;
    send(
        &mut outsider,
        &ClientMessage::PushState {
            room_id: rid("r1"),
            state: nim_state(),
        },
    )
    .await;

    assert_silent(&mut member).await;
    assert_silent(&mut outsider).await;
}

#[tokio::test]
async fn test_malformed_snapshot_is_rejected_at_the_boundary() {
    let addr = start_server().await;
    let mut p1 = connect(&addr).await;
    join(&mut p1, "r1", "p1").await;
    let _ = recv(&mut p1).await;

    // Structurally invalid: "chess" is no known game variant. The frame
    // is skipped before it can reach the store or the members.
    let raw = r#"{"type":"pushState","roomId":"r1","state":{"game":"chess"}}"#;
    p1.send(Message::Binary(raw.as_bytes().to_vec().into()))
        .await
        .unwrap();

    assert_silent(&mut p1).await;
}

// =========================================================================
// Leave, kick, disconnect
// =========================================================================

#[tokio::test]
async fn test_leave_broadcasts_membership_to_remaining() {
    let addr = start_server().await;
    let mut p1 = connect(&addr).await;
    let mut p2 = connect(&addr).await;
    join(&mut p1, "r1", "p1").await;
    let _ = recv(&mut p1).await;
    join(&mut p2, "r1", "p2").await;
    let _ = recv(&mut p1).await;
    let _ = recv(&mut p2).await;

    send(
        &mut p2,
        &ClientMessage::LeaveRoom {
            room_id: rid("r1"),
            player_id: pid("p2"),
        },
    )
    .await;

    assert_eq!(
        recv(&mut p1).await,
        ServerMessage::PlayersUpdate {
            players: vec![pid("p1")],
        }
    );
}

#[tokio::test]
async fn test_leave_repairs_and_rebroadcasts_kniffel_state() {
    let addr = start_server().await;
    let mut p1 = connect(&addr).await;
    let mut p2 = connect(&addr).await;
    join(&mut p1, "r1", "p1").await;
    let _ = recv(&mut p1).await;
    join(&mut p2, "r1", "p2").await;
    let _ = recv(&mut p1).await;
    let _ = recv(&mut p2).await;

    let state = GameState::Kniffel(KniffelState::new(&[pid("p1"), pid("p2")]));
    send(
        &mut p1,
        &ClientMessage::PushState {
            room_id: rid("r1"),
            state,
        },
    )
    .await;
    let _ = recv(&mut p1).await;
    let _ = recv(&mut p2).await;

    send(
        &mut p2,
        &ClientMessage::LeaveRoom {
            room_id: rid("r1"),
            player_id: pid("p2"),
        },
    )
    .await;

    // The departed sheet is pruned and the repaired state re-broadcast,
    // followed by the membership update.
    match recv(&mut p1).await {
        ServerMessage::GameState {
            state: GameState::Kniffel(s),
        } => {
            assert!(!s.scores.contains_key(&pid("p2")));
            assert!(s.scores.contains_key(&pid("p1")));
        }
        other => panic!("expected repaired state, got {other:?}"),
    }
    assert_eq!(
        recv(&mut p1).await,
        ServerMessage::PlayersUpdate {
            players: vec![pid("p1")],
        }
    );
}

#[tokio::test]
async fn test_host_kicks_by_leaving_on_anothers_behalf() {
    let addr = start_server().await;
    let mut host = connect(&addr).await;
    let mut p2 = connect(&addr).await;
    join(&mut host, "r1", "host").await;
    let _ = recv(&mut host).await;
    join(&mut p2, "r1", "p2").await;
    let _ = recv(&mut host).await;
    let _ = recv(&mut p2).await;

    send(
        &mut host,
        &ClientMessage::LeaveRoom {
            room_id: rid("r1"),
            player_id: pid("p2"),
        },
    )
    .await;

    // The host stays and sees the shrunken membership; the kicked player
    // is out of the loop.
    assert_eq!(
        recv(&mut host).await,
        ServerMessage::PlayersUpdate {
            players: vec![pid("host")],
        }
    );
    assert_silent(&mut p2).await;
}

#[tokio::test]
async fn test_disconnect_runs_the_same_cleanup_as_leave() {
    let addr = start_server().await;
    let mut p1 = connect(&addr).await;
    let mut p2 = connect(&addr).await;
    join(&mut p1, "r1", "p1").await;
    let _ = recv(&mut p1).await;
    join(&mut p2, "r1", "p2").await;
    let _ = recv(&mut p1).await;
    let _ = recv(&mut p2).await;

    // p2's transport drops without a leaveRoom.
    p2.close(None).await.unwrap();
    drop(p2);

    assert_eq!(
        recv(&mut p1).await,
        ServerMessage::PlayersUpdate {
            players: vec![pid("p1")],
        }
    );
}

#[tokio::test]
async fn test_unresponsive_connection_is_disconnected_by_heartbeat() {
    // A short heartbeat interval: after two silent intervals with no pong
    // the relay treats the transport as dead and runs leave cleanup.
    let server = RelayServerBuilder::new()
        .bind("127.0.0.1:0")
        .heartbeat_interval(Duration::from_millis(100))
        .build()
        .await
        .expect("server should build");
    let addr = server.local_addr().expect("local addr").to_string();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    tokio::time::sleep(Duration::from_millis(10)).await;

    let mut p1 = connect(&addr).await;
    let mut p2 = connect(&addr).await;
    join(&mut p1, "r1", "p1").await;
    let _ = recv(&mut p1).await;
    join(&mut p2, "r1", "p2").await;
    let _ = recv(&mut p1).await;
    let _ = recv(&mut p2).await;

    // p2 keeps its TCP connection open but is never polled again, so its
    // client never answers the relay's pings. p1 keeps reading and must
    // eventually see p2 drop out.
    let _silent = p2;

    assert_eq!(
        recv(&mut p1).await,
        ServerMessage::PlayersUpdate {
            players: vec![pid("p1")],
        }
    );
}

#[tokio::test]
async fn test_reconnect_rejoins_and_rehydrates() {
    let addr = start_server().await;
    let mut p1 = connect(&addr).await;
    let mut p2 = connect(&addr).await;
    join(&mut p1, "r1", "p1").await;
    let _ = recv(&mut p1).await;
    join(&mut p2, "r1", "p2").await;
    let _ = recv(&mut p1).await;
    let _ = recv(&mut p2).await;

    send(
        &mut p1,
        &ClientMessage::PushState {
            room_id: rid("r1"),
            state: nim_state(),
        },
    )
    .await;
    let _ = recv(&mut p1).await;
    let _ = recv(&mut p2).await;

    // p2 loses their transport...
    p2.close(None).await.unwrap();
    drop(p2);
    let _ = recv(&mut p1).await; // playersUpdate [p1]

    // ...and comes back with the same player id on a new connection.
    let mut p2 = connect(&addr).await;
    join(&mut p2, "r1", "p2").await;

    assert_eq!(
        recv(&mut p2).await,
        ServerMessage::GameState { state: nim_state() }
    );
    assert_eq!(
        recv(&mut p2).await,
        ServerMessage::PlayersUpdate {
            players: vec![pid("p1"), pid("p2")],
        }
    );
}

// =========================================================================
// Player list, engine integration
// =========================================================================

#[tokio::test]
async fn test_request_player_list_for_unknown_room_is_empty() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send(
        &mut ws,
        &ClientMessage::RequestPlayerList {
            room_id: rid("nowhere"),
        },
    )
    .await;

    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::PlayersUpdate { players: vec![] }
    );
}

#[tokio::test]
async fn test_engine_computed_states_flow_through_the_relay() {
    // The intended end-to-end loop: a client computes a transition with a
    // rule engine and pushes the snapshot; the other client renders it.
    use parlor_games::nim;

    let addr = start_server().await;
    let mut p1 = connect(&addr).await;
    let mut p2 = connect(&addr).await;
    join(&mut p1, "r1", "p1").await;
    let _ = recv(&mut p1).await;
    join(&mut p2, "r1", "p2").await;
    let _ = recv(&mut p1).await;
    let _ = recv(&mut p2).await;

    let roster = vec![Seat::new("p1", "P1"), Seat::new("p2", "P2")];
    let mut state = nim::new_game();
    nim::select_first_player(&mut state, &pid("p1"), &roster).unwrap();
    nim::remove_coin(&mut state, &pid("p1"), 3, 0, &roster).unwrap();
    nim::end_turn(&mut state, roster.len());

    send(
        &mut p1,
        &ClientMessage::PushState {
            room_id: rid("r1"),
            state: GameState::Nim(state.clone()),
        },
    )
    .await;

    match recv(&mut p2).await {
        ServerMessage::GameState {
            state: GameState::Nim(received),
        } => {
            assert_eq!(received, state);
            assert_eq!(received.remaining_coins(), vec![1, 3, 5, 6]);
            assert_eq!(received.current_player_index, 1);
        }
        other => panic!("expected nim state, got {other:?}"),
    }
    let _ = recv(&mut p1).await;
}
