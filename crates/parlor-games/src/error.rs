//! Error type shared by the three rule engines.

use parlor_protocol::{Category, PlayerId, Rank};

/// An action that violates a game rule.
///
/// Callers are expected to gate their UIs so these are never offered; the
/// engine still refuses them explicitly rather than silently no-opping, so
/// a desynchronized client fails loudly instead of drifting. The snapshot
/// is never mutated on the error path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The game has already ended; no further actions are legal.
    #[error("the game is already over")]
    GameOver,

    /// The acting player is not the current player.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// The named player is not part of this game.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    /// Nim: the first player may only be chosen once.
    #[error("the first player has already been chosen")]
    FirstPlayerAlreadySelected,

    /// Nim: the coordinates point outside the board.
    #[error("no coin at row {row}, position {coin}")]
    CoinOutOfRange { row: usize, coin: usize },

    /// Nim: the targeted coin was already removed.
    #[error("coin at row {row}, position {coin} is already removed")]
    CoinAlreadyRemoved { row: usize, coin: usize },

    /// Kniffel: the three-roll budget for this turn is spent.
    #[error("no rolls left this turn")]
    NoRollsLeft,

    /// Kniffel: scoring requires at least one roll this turn.
    #[error("the dice have not been rolled yet")]
    NothingRolled,

    /// Kniffel: each category can be scored once per player.
    #[error("category {0} is already scored")]
    CategoryAlreadyScored(Category),

    /// Fishing: an ask is open and awaiting a suit guess.
    #[error("a suit guess is already pending")]
    GuessAlreadyPending,

    /// Fishing: there is no open ask to guess against.
    #[error("no suit guess is pending")]
    NoGuessPending,

    /// Fishing: players ask opponents, not themselves.
    #[error("a player cannot ask themself for cards")]
    CannotAskSelf,

    /// Fishing: a player may only ask for ranks they hold.
    #[error("player holds no card of rank {0}")]
    RankNotHeld(Rank),
}
