//! Misère Nim: remove coins from rows, the player who takes the last coin
//! loses.
//!
//! The board is a fixed set of rows whose original sizes never change;
//! removals accumulate as markers, and the effective remaining count of a
//! row is derived (see [`NimState::remaining_coins`]). A turn may remove
//! several coins but only from one row — the row lock is enforced by the
//! UI layer, not the engine, which is a deliberately permissive design
//! kept from the original rules.

use parlor_protocol::{CoinMarker, NimMove, NimState, PlayerId, Seat};

use crate::GameError;

/// The classic opening position.
pub const DEFAULT_HEAPS: [u32; 4] = [1, 3, 5, 7];

/// Creates a fresh game on the default board, awaiting the first-player
/// choice.
pub fn new_game() -> NimState {
    NimState::new(&DEFAULT_HEAPS)
}

/// Chooses who takes the first turn. Legal exactly once per game.
pub fn select_first_player(
    state: &mut NimState,
    first: &PlayerId,
    players: &[Seat],
) -> Result<(), GameError> {
    if state.first_player_selected {
        return Err(GameError::FirstPlayerAlreadySelected);
    }
    let index = players
        .iter()
        .position(|s| s.id == *first)
        .ok_or_else(|| GameError::UnknownPlayer(first.clone()))?;

    state.first_player_selected = true;
    state.first_player_id = Some(first.clone());
    state.current_player_index = index;
    Ok(())
}

/// Removes one coin. Several calls per turn model a multi-coin removal.
///
/// Sets `game_over` when the last coin leaves the board. On that move the
/// mover *loses* (misère); with exactly two players the other player is
/// recorded as the winner, with more players no winner is recorded.
pub fn remove_coin(
    state: &mut NimState,
    mover: &PlayerId,
    row: usize,
    coin: usize,
    players: &[Seat],
) -> Result<(), GameError> {
    if state.game_over {
        return Err(GameError::GameOver);
    }
    let mover_name = players
        .iter()
        .find(|s| s.id == *mover)
        .map(|s| s.name.clone())
        .ok_or_else(|| GameError::UnknownPlayer(mover.clone()))?;
    let row_size = *state
        .heaps
        .get(row)
        .ok_or(GameError::CoinOutOfRange { row, coin })?;
    if coin as u32 >= row_size {
        return Err(GameError::CoinOutOfRange { row, coin });
    }
    if state.is_coin_removed(row, coin) {
        return Err(GameError::CoinAlreadyRemoved { row, coin });
    }

    state.removed_coins.push(CoinMarker { row, coin });
    state.last_move = Some(NimMove {
        player_id: mover.clone(),
        player_name: mover_name,
        row,
        coin,
    });

    if state.remaining_coins().iter().all(|&r| r == 0) {
        state.game_over = true;
        // Misère winner is only defined for two players.
        state.winner = if players.len() == 2 {
            players.iter().find(|s| s.id != *mover).map(|s| s.id.clone())
        } else {
            None
        };
    }
    Ok(())
}

/// Passes the turn to the next seat. Does not require that a coin was
/// removed this turn (kept from the original rules).
pub fn end_turn(state: &mut NimState, player_count: usize) {
    if player_count > 0 {
        state.current_player_index =
            (state.current_player_index + 1) % player_count;
    }
}

/// XOR of the remaining row counts. Zero after your move means the
/// position is losing-optimal for the opponent; exposed for UI hinting
/// only and never consulted for legality.
pub fn nim_sum(state: &NimState) -> u32 {
    state.remaining_coins().iter().fold(0, |acc, &r| acc ^ r)
}

// =========================================================================
// Tests
// =========================================================================
