//! Snapshot types for the coin-removal game (misère Nim).

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// A single removed coin, addressed by row and position within the row.
///
/// Partial-row removal within a turn is modelled by accumulating markers
/// rather than decrementing heap sizes: `heaps` always holds the *original*
/// row sizes, and the effective remaining count of a row is its size minus
/// the markers pointing at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinMarker {
    pub row: usize,
    pub coin: usize,
}

/// The most recent removal, kept for the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NimMove {
    pub player_id: PlayerId,
    pub player_name: String,
    pub row: usize,
    pub coin: usize,
}

/// The full Nim snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NimState {
    /// Original row sizes. Never mutated after creation.
    pub heaps: Vec<u32>,
    /// Index into the room roster of the player whose turn it is.
    pub current_player_index: usize,
    pub game_over: bool,
    /// Set only for two-player games (misère winner). `None` otherwise,
    /// including for 3+ players at game end.
    pub winner: Option<PlayerId>,
    pub last_move: Option<NimMove>,
    /// Coins removed so far, in removal order.
    pub removed_coins: Vec<CoinMarker>,
    /// The first move of a match is choosing who starts.
    pub first_player_selected: bool,
    pub first_player_id: Option<PlayerId>,
}

impl NimState {
    /// Creates a fresh board with the given row sizes.
    pub fn new(heap_sizes: &[u32]) -> Self {
        Self {
            heaps: heap_sizes.to_vec(),
            current_player_index: 0,
            game_over: false,
            winner: None,
            last_move: None,
            removed_coins: Vec::new(),
            first_player_selected: false,
            first_player_id: None,
        }
    }

    /// Returns `true` if the coin at `(row, coin)` has been removed.
    pub fn is_coin_removed(&self, row: usize, coin: usize) -> bool {
        self.removed_coins
            .iter()
            .any(|m| m.row == row && m.coin == coin)
    }

    /// Effective remaining coins per row: original size minus the removal
    /// markers pointing at that row.
    pub fn remaining_coins(&self) -> Vec<u32> {
        self.heaps
            .iter()
            .enumerate()
            .map(|(row, &size)| {
                let removed = self
                    .removed_coins
                    .iter()
                    .filter(|m| m.row == row)
                    .count() as u32;
                size.saturating_sub(removed)
            })
            .collect()
    }
}
