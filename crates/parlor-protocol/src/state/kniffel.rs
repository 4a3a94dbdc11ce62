//! Snapshot types for the dice-scoring game (Kniffel).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::PlayerId;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// One of the 13 scoring slots on a Kniffel sheet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Kniffel,
    Chance,
}

impl Category {
    /// All categories, upper section first.
    pub const ALL: [Category; 13] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Kniffel,
        Category::Chance,
    ];

    /// The six upper-section categories (ones through sixes). The upper sum
    /// drives the 35-point bonus.
    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    /// The seven lower-section categories.
    pub const LOWER: [Category; 7] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Kniffel,
        Category::Chance,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ones => "ones",
            Self::Twos => "twos",
            Self::Threes => "threes",
            Self::Fours => "fours",
            Self::Fives => "fives",
            Self::Sixes => "sixes",
            Self::ThreeOfAKind => "threeOfAKind",
            Self::FourOfAKind => "fourOfAKind",
            Self::FullHouse => "fullHouse",
            Self::SmallStraight => "smallStraight",
            Self::LargeStraight => "largeStraight",
            Self::Kniffel => "kniffel",
            Self::Chance => "chance",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Score sheet
// ---------------------------------------------------------------------------

/// One player's sheet: every category either unset or a recorded value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSheet {
    pub ones: Option<u32>,
    pub twos: Option<u32>,
    pub threes: Option<u32>,
    pub fours: Option<u32>,
    pub fives: Option<u32>,
    pub sixes: Option<u32>,
    pub three_of_a_kind: Option<u32>,
    pub four_of_a_kind: Option<u32>,
    pub full_house: Option<u32>,
    pub small_straight: Option<u32>,
    pub large_straight: Option<u32>,
    pub kniffel: Option<u32>,
    pub chance: Option<u32>,
}

impl ScoreSheet {
    /// Returns the recorded value for a category, if set.
    pub fn get(&self, category: Category) -> Option<u32> {
        match category {
            Category::Ones => self.ones,
            Category::Twos => self.twos,
            Category::Threes => self.threes,
            Category::Fours => self.fours,
            Category::Fives => self.fives,
            Category::Sixes => self.sixes,
            Category::ThreeOfAKind => self.three_of_a_kind,
            Category::FourOfAKind => self.four_of_a_kind,
            Category::FullHouse => self.full_house,
            Category::SmallStraight => self.small_straight,
            Category::LargeStraight => self.large_straight,
            Category::Kniffel => self.kniffel,
            Category::Chance => self.chance,
        }
    }

    /// Records a value for a category, overwriting any previous value.
    /// Legality (category must be unset) is the engine's concern.
    pub fn set(&mut self, category: Category, value: u32) {
        let slot = match category {
            Category::Ones => &mut self.ones,
            Category::Twos => &mut self.twos,
            Category::Threes => &mut self.threes,
            Category::Fours => &mut self.fours,
            Category::Fives => &mut self.fives,
            Category::Sixes => &mut self.sixes,
            Category::ThreeOfAKind => &mut self.three_of_a_kind,
            Category::FourOfAKind => &mut self.four_of_a_kind,
            Category::FullHouse => &mut self.full_house,
            Category::SmallStraight => &mut self.small_straight,
            Category::LargeStraight => &mut self.large_straight,
            Category::Kniffel => &mut self.kniffel,
            Category::Chance => &mut self.chance,
        };
        *slot = Some(value);
    }

    /// `true` if at least one category is still unset.
    pub fn has_unset(&self) -> bool {
        Category::ALL.iter().any(|c| self.get(*c).is_none())
    }

    /// `true` if all 13 categories are set.
    pub fn is_complete(&self) -> bool {
        !self.has_unset()
    }

    /// Sum of the upper section (unset counts as 0).
    pub fn upper_sum(&self) -> u32 {
        Category::UPPER.iter().filter_map(|c| self.get(*c)).sum()
    }

    /// Sum of the lower section (unset counts as 0).
    pub fn lower_sum(&self) -> u32 {
        Category::LOWER.iter().filter_map(|c| self.get(*c)).sum()
    }

    /// 35 points when the upper section reaches 63.
    pub fn bonus(&self) -> u32 {
        if self.upper_sum() >= 63 { 35 } else { 0 }
    }

    /// Upper sum + bonus + lower sum.
    pub fn grand_total(&self) -> u32 {
        self.upper_sum() + self.bonus() + self.lower_sum()
    }
}

// ---------------------------------------------------------------------------
// Winner and state
// ---------------------------------------------------------------------------

/// The recorded winner of a finished game. Ties store no winner; callers
/// recompute the tie set from the per-player totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KniffelWinner {
    pub player_id: PlayerId,
    pub player_name: String,
    pub score: u32,
}

/// The full Kniffel snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KniffelState {
    /// Face values of the five dice (1-6).
    pub dice: [u8; 5],
    /// Indices (0-4) of dice held between rolls.
    pub held_dice: Vec<usize>,
    /// Rolls used this turn (0-3).
    pub roll_count: u8,
    pub current_player_index: usize,
    /// Per-player sheets, keyed by player id. A departed player's entry is
    /// deleted when they leave.
    pub scores: BTreeMap<PlayerId, ScoreSheet>,
    pub game_over: bool,
    pub winner: Option<KniffelWinner>,
}

impl KniffelState {
    /// Creates a fresh game with a blank sheet per player. Dice start at
    /// all ones with no rolls used, so the first player must roll before
    /// scoring.
    pub fn new(players: &[PlayerId]) -> Self {
        Self {
            dice: [1; 5],
            held_dice: Vec::new(),
            roll_count: 0,
            current_player_index: 0,
            scores: players
                .iter()
                .map(|p| (p.clone(), ScoreSheet::default()))
                .collect(),
            game_over: false,
            winner: None,
        }
    }

    /// The sheet for a player, blank if they have none yet.
    pub fn sheet(&self, player: &PlayerId) -> ScoreSheet {
        self.scores.get(player).cloned().unwrap_or_default()
    }
}

// =========================================================================
// Tests
// =========================================================================
