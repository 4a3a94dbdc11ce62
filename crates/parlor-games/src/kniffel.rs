//! Kniffel: three rolls per turn, thirteen categories, highest grand total
//! wins.
//!
//! The turn cycle is roll (up to three times, holding dice between rolls),
//! then score exactly one unset category. The turn pointer skips players
//! whose sheets are already full; when nobody has an unset category the
//! pointer stops moving, which is the terminal signal picked up by
//! [`finish_if_complete`].

use rand::Rng;

use parlor_protocol::{
    Category, KniffelState, KniffelWinner, PlayerId, Seat,
};

use crate::GameError;

/// Creates a fresh game with a blank sheet for every seat. The first seat
/// opens.
pub fn new_game(players: &[Seat]) -> KniffelState {
    let ids: Vec<PlayerId> = players.iter().map(|s| s.id.clone()).collect();
    KniffelState::new(&ids)
}

fn require_turn(
    state: &KniffelState,
    players: &[Seat],
    actor: &PlayerId,
) -> Result<(), GameError> {
    match players.get(state.current_player_index) {
        Some(seat) if seat.id == *actor => Ok(()),
        _ => Err(GameError::NotYourTurn(actor.clone())),
    }
}

/// Re-rolls every die whose index is not in `held`. Costs one of the three
/// rolls this turn.
pub fn roll(
    state: &mut KniffelState,
    players: &[Seat],
    roller: &PlayerId,
    held: &[usize],
    rng: &mut impl Rng,
) -> Result<(), GameError> {
    if state.game_over {
        return Err(GameError::GameOver);
    }
    require_turn(state, players, roller)?;
    if state.roll_count >= 3 {
        return Err(GameError::NoRollsLeft);
    }

    for (i, die) in state.dice.iter_mut().enumerate() {
        if !held.contains(&i) {
            *die = rng.random_range(1..=6);
        }
    }
    state.held_dice = held.to_vec();
    state.roll_count += 1;
    Ok(())
}

/// Records `value` into an unset category on the scorer's sheet, resets
/// the dice for the next turn, and advances the pointer to the next player
/// with an unset category.
///
/// The value is whatever the caller computed (usually via
/// [`potential_score`]; a voluntary zero is how a player passes). The
/// relay's trust model applies here too: other clients accept the pushed
/// sheet as-is.
pub fn score(
    state: &mut KniffelState,
    players: &[Seat],
    scorer: &PlayerId,
    category: Category,
    value: u32,
) -> Result<(), GameError> {
    if state.game_over {
        return Err(GameError::GameOver);
    }
    require_turn(state, players, scorer)?;
    if state.roll_count == 0 {
        return Err(GameError::NothingRolled);
    }
    let sheet = state.scores.entry(scorer.clone()).or_default();
    if sheet.get(category).is_some() {
        return Err(GameError::CategoryAlreadyScored(category));
    }
    sheet.set(category, value);

    state.dice = [1; 5];
    state.held_dice.clear();
    state.roll_count = 0;
    state.current_player_index =
        next_player_index(state, players, state.current_player_index);
    Ok(())
}

/// The next seat index (after `from`) whose sheet still has an unset
/// category. Returns `from` unchanged when no such seat exists — the
/// terminal signal.
fn next_player_index(
    state: &KniffelState,
    players: &[Seat],
    from: usize,
) -> usize {
    let len = players.len();
    if len == 0 {
        return from;
    }
    for step in 1..=len {
        let idx = (from + step) % len;
        if state.sheet(&players[idx].id).has_unset() {
            return idx;
        }
    }
    from
}

/// What the current dice are worth in a category. Faces outside 1-6
/// (possible in a hostile snapshot) count for nothing.
pub fn potential_score(dice: &[u8; 5], category: Category) -> u32 {
    let mut counts = [0u32; 7]; // index by face value, 1-6
    let mut sum: u32 = 0;
    for &d in dice {
        if (1..=6).contains(&d) {
            counts[d as usize] += 1;
            sum += d as u32;
        }
    }
    let max_count = *counts[1..].iter().max().unwrap_or(&0);

    let face = |f: u32| counts[f as usize] * f;
    let has_run = |run: &[u8]| run.iter().all(|&f| counts[f as usize] > 0);

    match category {
        Category::Ones => face(1),
        Category::Twos => face(2),
        Category::Threes => face(3),
        Category::Fours => face(4),
        Category::Fives => face(5),
        Category::Sixes => face(6),
        Category::ThreeOfAKind => {
            if max_count >= 3 { sum } else { 0 }
        }
        Category::FourOfAKind => {
            if max_count >= 4 { sum } else { 0 }
        }
        Category::FullHouse => {
            let has_pair = counts[1..].iter().any(|&c| c == 2);
            if max_count == 3 && has_pair { 25 } else { 0 }
        }
        Category::SmallStraight => {
            if has_run(&[1, 2, 3, 4])
                || has_run(&[2, 3, 4, 5])
                || has_run(&[3, 4, 5, 6])
            {
                30
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if has_run(&[1, 2, 3, 4, 5]) || has_run(&[2, 3, 4, 5, 6]) {
                40
            } else {
                0
            }
        }
        Category::Kniffel => {
            if max_count == 5 { 50 } else { 0 }
        }
        Category::Chance => sum,
    }
}

/// Per-player final totals, best first. Sheets belonging to players no
/// longer seated fall back to a generated display name.
pub fn standings(state: &KniffelState, players: &[Seat]) -> Vec<KniffelWinner> {
    let mut all: Vec<KniffelWinner> = state
        .scores
        .iter()
        .map(|(id, sheet)| {
            let name = players
                .iter()
                .find(|s| s.id == *id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| {
                    let prefix: String = id.as_str().chars().take(8).collect();
                    format!("Player {prefix}")
                });
            KniffelWinner {
                player_id: id.clone(),
                player_name: name,
                score: sheet.grand_total(),
            }
        })
        .collect();
    all.sort_by(|a, b| b.score.cmp(&a.score));
    all
}

/// Ends the game when no seated player has an unset category left.
///
/// The winner is the strict highest grand total; a tie records no winner
/// and callers recompute the tie set from [`standings`]. Returns `true`
/// if the state transitioned to game over.
pub fn finish_if_complete(state: &mut KniffelState, players: &[Seat]) -> bool {
    if state.game_over || players.is_empty() {
        return false;
    }
    let all_done = players
        .iter()
        .all(|s| !state.sheet(&s.id).has_unset());
    if !all_done {
        return false;
    }

    let ranked = standings(state, players);
    state.winner = match ranked.as_slice() {
        [] => None,
        [single] => Some(single.clone()),
        [first, second, ..] if first.score == second.score => None,
        [first, ..] => Some(first.clone()),
    };
    state.game_over = true;
    true
}

/// Repairs the state after a player departs mid-game: their sheet is
/// deleted, a dangling turn pointer is re-aimed at the next eligible
/// player (resetting the turn's dice), and the game ends immediately if no
/// one has categories left.
pub fn remove_player(
    state: &mut KniffelState,
    departed: &PlayerId,
    remaining: &[Seat],
) {
    state.scores.remove(departed);
    if remaining.is_empty() {
        return;
    }

    let mut repaired = false;
    if state.current_player_index >= remaining.len() {
        state.current_player_index = 0;
        repaired = true;
    }
    let current = &remaining[state.current_player_index];
    if !state.sheet(&current.id).has_unset() {
        let next =
            next_player_index(state, remaining, state.current_player_index);
        if next != state.current_player_index {
            state.current_player_index = next;
            repaired = true;
        }
    }
    if repaired {
        state.dice = [1; 5];
        state.held_dice.clear();
        state.roll_count = 0;
    }

    finish_if_complete(state, remaining);
}

// =========================================================================
// Tests
// =========================================================================
