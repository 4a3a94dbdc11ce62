//! Snapshot types for the card-collection game (Fishing).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::PlayerId;
use crate::state::{Card, Rank, Seat, Suit};

/// The phase of the current turn.
///
/// Most turns live entirely in `Asking`; `Guessing` is the window between
/// an ask that found cards and the asker's suit guess. `Complete` marks a
/// finished game.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FishingPhase {
    #[default]
    Asking,
    Guessing,
    Complete,
}

/// An ask that found cards and is now waiting for the asker's suit guess.
///
/// `shown_cards` is what the target revealed — visible to the asker only,
/// by UI convention; the snapshot itself is shared, which is part of the
/// client-authoritative trust model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAsk {
    pub asking_player_id: PlayerId,
    pub target_player_id: PlayerId,
    pub requested_rank: Rank,
    pub shown_cards: Vec<Card>,
}

/// The last completed ask/guess, kept for the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishingMove {
    pub player_id: PlayerId,
    pub player_name: String,
    pub target_player_id: PlayerId,
    pub requested_rank: Rank,
    /// Cards the target revealed (empty when the ask found nothing).
    pub shown_cards: Vec<Card>,
    /// The suits guessed, `None` when no guess phase happened.
    pub guessed_suits: Option<Vec<Suit>>,
    /// Whether every shown card was claimed, `None` when no guess happened.
    pub guess_correct: Option<bool>,
    /// Cards that actually changed hands.
    pub cards_exchanged: Vec<Card>,
}

/// The full Fishing snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishingState {
    /// Seats in roster order; the turn pointer indexes into this.
    pub players: Vec<Seat>,
    pub current_player_index: usize,
    pub game_over: bool,
    /// Strict-maximum banked-set holder; `None` also encodes a tie.
    pub winner: Option<PlayerId>,
    pub last_move: Option<FishingMove>,
    /// Each player's hand, keyed by player id.
    pub hands: BTreeMap<PlayerId, Vec<Card>>,
    /// Banked four-of-a-kind sets per player, one point each.
    pub stockpiles: BTreeMap<PlayerId, Vec<Vec<Card>>>,
    /// Banked-set counts per player.
    pub scores: BTreeMap<PlayerId, u32>,
    /// The draw pile, drawn from the back.
    pub deck: Vec<Card>,
    pub phase: FishingPhase,
    pub current_ask: Option<PendingAsk>,
}

impl FishingState {
    /// The hand of a player, empty if unknown.
    pub fn hand(&self, player: &PlayerId) -> &[Card] {
        self.hands.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// How many cards of `rank` a player holds.
    pub fn count_of_rank(&self, player: &PlayerId, rank: Rank) -> usize {
        self.hand(player).iter().filter(|c| c.rank == rank).count()
    }

    /// The seat whose turn it is, if the pointer is in range.
    pub fn current_seat(&self) -> Option<&Seat> {
        self.players.get(self.current_player_index)
    }

    /// Total cards across hands, stockpiles, and the draw pile. Always 52
    /// in a dealt game (card conservation).
    pub fn total_cards(&self) -> usize {
        let in_hands: usize = self.hands.values().map(Vec::len).sum();
        let banked: usize = self
            .stockpiles
            .values()
            .flat_map(|sets| sets.iter())
            .map(Vec::len)
            .sum();
        in_hands + banked + self.deck.len()
    }
}
