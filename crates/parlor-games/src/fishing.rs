//! Fishing: ask an opponent for a rank, guess suits to claim the cards,
//! bank four-of-a-kind sets.
//!
//! An ask has three resolutions. If the target holds nothing of the rank,
//! the asker "goes fishing" (draws) and the turn passes. If the asker
//! already holds three of the rank and the target the fourth, the card
//! transfers automatically. Otherwise the matching cards are shown and the
//! asker must guess their suits before anything transfers — and cancelling
//! that guess costs the same as guessing nothing, so peeking at the shown
//! count is never free.

use rand::Rng;
use rand::seq::SliceRandom;

use parlor_protocol::{
    Card, FishingMove, FishingPhase, FishingState, PendingAsk, PlayerId,
    Rank, Seat, Suit,
};

use crate::GameError;

/// Cards dealt to each seat at the start of a game.
pub const CARDS_PER_PLAYER: usize = 5;

/// How an ask resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskOutcome {
    /// The target held nothing of the rank; the asker drew and the turn
    /// passed.
    WentFishing,
    /// The asker held three of the rank and the target the fourth; it
    /// transferred without a guess.
    AutoTransferred,
    /// Cards were shown; the state is now awaiting the asker's suit guess.
    MustGuess,
}

/// How a suit guess resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    /// Cards claimed by the asker.
    pub claimed: Vec<Card>,
    /// Whether the asker drew a consolation card.
    pub drew_card: bool,
    /// Whether the asker keeps the turn (guessed everything and still
    /// holds cards).
    pub kept_turn: bool,
}

/// Shuffles a fresh deck, deals five cards to each seat, and picks a
/// random opener. Any four-of-a-kind dealt outright is banked before the
/// first turn.
pub fn deal(seats: &[Seat], rng: &mut impl Rng) -> FishingState {
    let mut state = FishingState::default();
    if seats.is_empty() {
        return state;
    }

    let mut deck = Card::full_deck();
    deck.shuffle(rng);

    state.players = seats.to_vec();
    for seat in seats {
        let take = CARDS_PER_PLAYER.min(deck.len());
        let hand: Vec<Card> = deck.drain(..take).collect();
        state.hands.insert(seat.id.clone(), hand);
        state.scores.insert(seat.id.clone(), 0);
        state.stockpiles.insert(seat.id.clone(), Vec::new());
    }
    state.deck = deck;
    state.current_player_index = rng.random_range(0..seats.len());

    bank_completed_sets(&mut state);
    state
}

/// Asks `target` for every card of `rank`.
pub fn ask_for_rank(
    state: &mut FishingState,
    asker: &PlayerId,
    target: &PlayerId,
    rank: Rank,
) -> Result<AskOutcome, GameError> {
    if state.game_over {
        return Err(GameError::GameOver);
    }
    if state.phase == FishingPhase::Guessing {
        return Err(GameError::GuessAlreadyPending);
    }
    let seat = state
        .current_seat()
        .ok_or_else(|| GameError::NotYourTurn(asker.clone()))?;
    if seat.id != *asker {
        return Err(GameError::NotYourTurn(asker.clone()));
    }
    let asker_name = seat.name.clone();
    if asker == target {
        return Err(GameError::CannotAskSelf);
    }
    if !state.hands.contains_key(target) {
        return Err(GameError::UnknownPlayer(target.clone()));
    }
    if state.count_of_rank(asker, rank) == 0 {
        return Err(GameError::RankNotHeld(rank));
    }

    let matching: Vec<Card> = state
        .hand(target)
        .iter()
        .filter(|c| c.rank == rank)
        .copied()
        .collect();

    if matching.is_empty() {
        // Go fish: draw, then pass regardless of what the draw completes.
        draw_card(state, asker);
        bank_completed_sets(state);
        state.last_move = Some(FishingMove {
            player_id: asker.clone(),
            player_name: asker_name,
            target_player_id: target.clone(),
            requested_rank: rank,
            shown_cards: Vec::new(),
            guessed_suits: None,
            guess_correct: None,
            cards_exchanged: Vec::new(),
        });
        pass_turn_to_next_with_cards(state);
        check_game_over(state);
        return Ok(AskOutcome::WentFishing);
    }

    if state.count_of_rank(asker, rank) == 3 && matching.len() == 1 {
        // The target provably holds the fourth card: it transfers without
        // a guess.
        transfer_cards(state, target, asker, &matching);
        bank_completed_sets(state);
        state.last_move = Some(FishingMove {
            player_id: asker.clone(),
            player_name: asker_name,
            target_player_id: target.clone(),
            requested_rank: rank,
            shown_cards: matching.clone(),
            guessed_suits: None,
            guess_correct: Some(true),
            cards_exchanged: matching,
        });
        if state.hand(asker).is_empty() {
            pass_turn_to_next_with_cards(state);
        }
        check_game_over(state);
        return Ok(AskOutcome::AutoTransferred);
    }

    state.current_ask = Some(PendingAsk {
        asking_player_id: asker.clone(),
        target_player_id: target.clone(),
        requested_rank: rank,
        shown_cards: matching,
    });
    state.phase = FishingPhase::Guessing;
    Ok(AskOutcome::MustGuess)
}

/// Resolves the pending ask with a suit guess.
///
/// Shown cards whose suit was guessed transfer to the asker; missing any
/// costs a consolation draw and the turn.
pub fn guess_suits(
    state: &mut FishingState,
    asker: &PlayerId,
    guessed: &[Suit],
) -> Result<GuessOutcome, GameError> {
    if state.game_over {
        return Err(GameError::GameOver);
    }
    let ask = match &state.current_ask {
        Some(a) if a.asking_player_id == *asker => a.clone(),
        Some(_) => return Err(GameError::NotYourTurn(asker.clone())),
        None => return Err(GameError::NoGuessPending),
    };
    state.current_ask = None;
    state.phase = FishingPhase::Asking;

    let claimed: Vec<Card> = ask
        .shown_cards
        .iter()
        .filter(|c| guessed.contains(&c.suit))
        .copied()
        .collect();
    let all_correct = claimed.len() == ask.shown_cards.len();

    if !claimed.is_empty() {
        transfer_cards(state, &ask.target_player_id, asker, &claimed);
    }
    let mut drew_card = false;
    if !all_correct {
        drew_card = draw_card(state, asker);
    }
    bank_completed_sets(state);

    let kept_turn = all_correct && !state.hand(asker).is_empty();
    if !kept_turn {
        pass_turn_to_next_with_cards(state);
    }

    let asker_name = state
        .players
        .iter()
        .find(|s| s.id == *asker)
        .map(|s| s.name.clone())
        .unwrap_or_default();
    state.last_move = Some(FishingMove {
        player_id: asker.clone(),
        player_name: asker_name,
        target_player_id: ask.target_player_id.clone(),
        requested_rank: ask.requested_rank,
        shown_cards: ask.shown_cards.clone(),
        guessed_suits: Some(guessed.to_vec()),
        guess_correct: Some(all_correct),
        cards_exchanged: claimed.clone(),
    });
    check_game_over(state);

    Ok(GuessOutcome {
        claimed,
        drew_card,
        kept_turn,
    })
}

/// Abandons the pending guess. Costs exactly what guessing zero suits
/// costs: a consolation draw and the turn. Closing the dialog after seeing
/// how many cards were shown must not be a free peek.
pub fn cancel_guess(
    state: &mut FishingState,
    asker: &PlayerId,
) -> Result<GuessOutcome, GameError> {
    guess_suits(state, asker, &[])
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Moves the given cards from one hand to another.
fn transfer_cards(
    state: &mut FishingState,
    from: &PlayerId,
    to: &PlayerId,
    cards: &[Card],
) {
    if let Some(hand) = state.hands.get_mut(from) {
        for card in cards {
            if let Some(pos) = hand.iter().position(|c| c == card) {
                hand.remove(pos);
            }
        }
    }
    state.hands.entry(to.clone()).or_default().extend(cards);
}

/// Draws the top card of the pile into a hand. Returns `false` on an
/// empty pile.
fn draw_card(state: &mut FishingState, player: &PlayerId) -> bool {
    match state.deck.pop() {
        Some(card) => {
            state.hands.entry(player.clone()).or_default().push(card);
            true
        }
        None => false,
    }
}

/// Banks every four-of-a-kind held in any hand. Run after every hand
/// mutation.
fn bank_completed_sets(state: &mut FishingState) {
    let ids: Vec<PlayerId> = state.hands.keys().cloned().collect();
    for id in ids {
        for rank in Rank::ALL {
            let count = state.count_of_rank(&id, rank);
            if count == 4 {
                let hand = state.hands.get_mut(&id).expect("hand exists");
                let set: Vec<Card> =
                    hand.iter().filter(|c| c.rank == rank).copied().collect();
                hand.retain(|c| c.rank != rank);
                state.stockpiles.entry(id.clone()).or_default().push(set);
                *state.scores.entry(id.clone()).or_insert(0) += 1;
            }
        }
    }
}

/// Advances the turn, skipping players with empty hands. With every hand
/// empty the pointer comes back around unchanged and the game-over check
/// takes it from there.
fn pass_turn_to_next_with_cards(state: &mut FishingState) {
    let len = state.players.len();
    if len == 0 {
        return;
    }
    let mut index = state.current_player_index;
    for _ in 0..len {
        index = (index + 1) % len;
        if !state.hand(&state.players[index].id).is_empty() {
            break;
        }
    }
    state.current_player_index = index;
}

/// Ends the game once every hand is empty. The winner is the strict
/// maximum banked-set count; a tie records no winner.
fn check_game_over(state: &mut FishingState) {
    let all_empty = state.hands.values().all(|h| h.is_empty());
    if !all_empty {
        return;
    }
    state.game_over = true;
    state.phase = FishingPhase::Complete;

    let max = state.scores.values().copied().max().unwrap_or(0);
    let mut leaders =
        state.scores.iter().filter(|(_, score)| **score == max);
    state.winner = match (leaders.next(), leaders.next()) {
        (Some((id, _)), None) => Some(id.clone()),
        _ => None,
    };
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seats(names: &[&str]) -> Vec<Seat> {
        names.iter().map(|n| Seat::new(*n, n.to_uppercase())).collect()
    }

    fn pid(id: &str) -> PlayerId {
        PlayerId::from(id)
    }

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// A two-player state with fixed hands, bypassing the shuffle.
    fn fixed_state(a_hand: Vec<Card>, b_hand: Vec<Card>) -> FishingState {
        let mut state = FishingState::default();
        state.players = seats(&["a", "b"]);
        state.hands.insert(pid("a"), a_hand);
        state.hands.insert(pid("b"), b_hand);
        state.scores.insert(pid("a"), 0);
        state.scores.insert(pid("b"), 0);
        state.stockpiles.insert(pid("a"), Vec::new());
        state.stockpiles.insert(pid("b"), Vec::new());
        state.current_player_index = 0;
        state
    }

    // ---------------------------------------------------------------
    // deal()
    // ---------------------------------------------------------------

    #[test]
    fn test_deal_gives_five_cards_each_and_conserves_52() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = deal(&seats(&["a", "b", "c"]), &mut rng);

        for id in ["a", "b", "c"] {
            let held = state.hand(&pid(id)).len()
                + state.stockpiles[&pid(id)]
                    .iter()
                    .map(Vec::len)
                    .sum::<usize>();
            assert_eq!(held, CARDS_PER_PLAYER);
        }
        assert_eq!(state.total_cards(), 52);
        assert!(state.current_player_index < 3);
        assert!(!state.game_over);
    }

    #[test]
    fn test_deal_is_deterministic_under_a_seed() {
        let a = deal(&seats(&["a", "b"]), &mut StdRng::seed_from_u64(9));
        let b = deal(&seats(&["a", "b"]), &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_deal_banks_a_dealt_four_of_a_kind() {
        // A hand dealt with all four of a rank banks it before any turn.
        // Rather than fishing for a seed, wire the state manually through
        // the same banking path deal() uses.
        let mut state = fixed_state(
            vec![
                card(Rank::Nine, Suit::Spades),
                card(Rank::Nine, Suit::Hearts),
                card(Rank::Nine, Suit::Diamonds),
                card(Rank::Nine, Suit::Clubs),
                card(Rank::Ace, Suit::Spades),
            ],
            vec![card(Rank::King, Suit::Clubs)],
        );
        bank_completed_sets(&mut state);

        assert_eq!(state.hand(&pid("a")).len(), 1);
        assert_eq!(state.scores[&pid("a")], 1);
        assert_eq!(state.stockpiles[&pid("a")].len(), 1);
        assert_eq!(state.stockpiles[&pid("a")][0].len(), 4);
    }

    // ---------------------------------------------------------------
    // ask_for_rank()
    // ---------------------------------------------------------------

    #[test]
    fn test_ask_with_no_match_draws_and_passes() {
        let mut state = fixed_state(
            vec![card(Rank::Seven, Suit::Spades)],
            vec![card(Rank::King, Suit::Clubs)],
        );
        state.deck = vec![card(Rank::Two, Suit::Hearts)];

        let outcome =
            ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Seven)
                .unwrap();

        assert_eq!(outcome, AskOutcome::WentFishing);
        assert_eq!(state.hand(&pid("a")).len(), 2);
        assert!(state.deck.is_empty());
        assert_eq!(state.current_player_index, 1);
        let last = state.last_move.as_ref().unwrap();
        assert!(last.shown_cards.is_empty());
        assert_eq!(last.guess_correct, None);
    }

    #[test]
    fn test_ask_with_empty_deck_still_passes_turn() {
        let mut state = fixed_state(
            vec![card(Rank::Seven, Suit::Spades)],
            vec![card(Rank::King, Suit::Clubs)],
        );

        ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Seven).unwrap();

        assert_eq!(state.hand(&pid("a")).len(), 1);
        assert_eq!(state.current_player_index, 1);
    }

    #[test]
    fn test_ask_auto_transfer_banks_fourth_card() {
        // Three sevens ask into the lone fourth seven.
        let mut state = fixed_state(
            vec![
                card(Rank::Seven, Suit::Spades),
                card(Rank::Seven, Suit::Hearts),
                card(Rank::Seven, Suit::Diamonds),
                card(Rank::Ace, Suit::Clubs),
            ],
            vec![
                card(Rank::Seven, Suit::Clubs),
                card(Rank::King, Suit::Clubs),
            ],
        );

        let outcome =
            ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Seven)
                .unwrap();

        assert_eq!(outcome, AskOutcome::AutoTransferred);
        // The completed set banked immediately: one point, no guess dialog.
        assert_eq!(state.scores[&pid("a")], 1);
        assert_eq!(state.stockpiles[&pid("a")].len(), 1);
        assert_eq!(state.hand(&pid("a")), &[card(Rank::Ace, Suit::Clubs)]);
        assert_eq!(state.hand(&pid("b")), &[card(Rank::King, Suit::Clubs)]);
        assert!(state.current_ask.is_none());
        // The asker still holds a card, so the turn stays.
        assert_eq!(state.current_player_index, 0);
    }

    #[test]
    fn test_ask_auto_transfer_passes_turn_when_hand_empties() {
        let mut state = fixed_state(
            vec![
                card(Rank::Seven, Suit::Spades),
                card(Rank::Seven, Suit::Hearts),
                card(Rank::Seven, Suit::Diamonds),
            ],
            vec![
                card(Rank::Seven, Suit::Clubs),
                card(Rank::King, Suit::Clubs),
            ],
        );

        ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Seven).unwrap();

        assert!(state.hand(&pid("a")).is_empty());
        assert_eq!(state.current_player_index, 1);
    }

    #[test]
    fn test_ask_with_partial_match_opens_guess() {
        let mut state = fixed_state(
            vec![card(Rank::Seven, Suit::Spades)],
            vec![
                card(Rank::Seven, Suit::Hearts),
                card(Rank::Seven, Suit::Clubs),
                card(Rank::King, Suit::Clubs),
            ],
        );

        let outcome =
            ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Seven)
                .unwrap();

        assert_eq!(outcome, AskOutcome::MustGuess);
        assert_eq!(state.phase, FishingPhase::Guessing);
        let ask = state.current_ask.as_ref().unwrap();
        assert_eq!(ask.shown_cards.len(), 2);
        // Nothing has transferred yet.
        assert_eq!(state.hand(&pid("a")).len(), 1);
        assert_eq!(state.hand(&pid("b")).len(), 3);
    }

    #[test]
    fn test_ask_validations() {
        let mut state = fixed_state(
            vec![card(Rank::Seven, Suit::Spades)],
            vec![card(Rank::King, Suit::Clubs)],
        );

        assert_eq!(
            ask_for_rank(&mut state, &pid("b"), &pid("a"), Rank::King),
            Err(GameError::NotYourTurn(pid("b")))
        );
        assert_eq!(
            ask_for_rank(&mut state, &pid("a"), &pid("a"), Rank::Seven),
            Err(GameError::CannotAskSelf)
        );
        assert_eq!(
            ask_for_rank(&mut state, &pid("a"), &pid("ghost"), Rank::Seven),
            Err(GameError::UnknownPlayer(pid("ghost")))
        );
        assert_eq!(
            ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Queen),
            Err(GameError::RankNotHeld(Rank::Queen))
        );
    }

    #[test]
    fn test_ask_rejected_while_guess_pending() {
        let mut state = fixed_state(
            vec![
                card(Rank::Seven, Suit::Spades),
                card(Rank::Two, Suit::Spades),
            ],
            vec![card(Rank::Seven, Suit::Hearts)],
        );
        ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Seven).unwrap();

        let err = ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Two);

        assert_eq!(err, Err(GameError::GuessAlreadyPending));
    }

    // ---------------------------------------------------------------
    // guess_suits() / cancel_guess()
    // ---------------------------------------------------------------

    /// Opens a guess: a holds one seven + filler, b holds two sevens.
    fn state_with_pending_guess() -> FishingState {
        let mut state = fixed_state(
            vec![
                card(Rank::Seven, Suit::Spades),
                card(Rank::Two, Suit::Spades),
            ],
            vec![
                card(Rank::Seven, Suit::Hearts),
                card(Rank::Seven, Suit::Clubs),
                card(Rank::King, Suit::Clubs),
            ],
        );
        state.deck = vec![card(Rank::Three, Suit::Diamonds)];
        ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Seven).unwrap();
        state
    }

    #[test]
    fn test_guess_all_correct_keeps_turn_and_skips_draw() {
        let mut state = state_with_pending_guess();

        let outcome = guess_suits(
            &mut state,
            &pid("a"),
            &[Suit::Hearts, Suit::Clubs],
        )
        .unwrap();

        assert!(outcome.kept_turn);
        assert!(!outcome.drew_card);
        assert_eq!(outcome.claimed.len(), 2);
        // Both sevens moved over; the deck was not touched.
        assert_eq!(state.count_of_rank(&pid("a"), Rank::Seven), 3);
        assert_eq!(state.count_of_rank(&pid("b"), Rank::Seven), 0);
        assert_eq!(state.deck.len(), 1);
        assert_eq!(state.current_player_index, 0);
        assert_eq!(state.phase, FishingPhase::Asking);
        assert_eq!(
            state.last_move.as_ref().unwrap().guess_correct,
            Some(true)
        );
    }

    #[test]
    fn test_guess_partially_correct_transfers_draws_and_passes() {
        let mut state = state_with_pending_guess();

        let outcome =
            guess_suits(&mut state, &pid("a"), &[Suit::Hearts]).unwrap();

        assert!(!outcome.kept_turn);
        assert!(outcome.drew_card);
        assert_eq!(outcome.claimed, vec![card(Rank::Seven, Suit::Hearts)]);
        // One seven claimed plus the consolation draw.
        assert_eq!(state.hand(&pid("a")).len(), 4);
        assert_eq!(state.count_of_rank(&pid("b"), Rank::Seven), 1);
        assert!(state.deck.is_empty());
        assert_eq!(state.current_player_index, 1);
    }

    #[test]
    fn test_guess_wrong_suits_transfer_nothing() {
        let mut state = state_with_pending_guess();

        let outcome = guess_suits(&mut state, &pid("a"), &[Suit::Diamonds])
            .unwrap();

        assert!(outcome.claimed.is_empty());
        assert!(outcome.drew_card);
        assert_eq!(state.count_of_rank(&pid("b"), Rank::Seven), 2);
        assert_eq!(state.current_player_index, 1);
    }

    #[test]
    fn test_cancel_guess_costs_a_draw_and_the_turn() {
        let mut state = state_with_pending_guess();

        let outcome = cancel_guess(&mut state, &pid("a")).unwrap();

        assert!(outcome.claimed.is_empty());
        assert!(outcome.drew_card);
        assert!(!outcome.kept_turn);
        assert!(state.current_ask.is_none());
        assert_eq!(state.current_player_index, 1);
        assert_eq!(
            state.last_move.as_ref().unwrap().guess_correct,
            Some(false)
        );
    }

    #[test]
    fn test_guess_without_pending_ask_is_rejected() {
        let mut state = fixed_state(
            vec![card(Rank::Seven, Suit::Spades)],
            vec![card(Rank::King, Suit::Clubs)],
        );

        let err = guess_suits(&mut state, &pid("a"), &[Suit::Spades]);

        assert_eq!(err, Err(GameError::NoGuessPending));
    }

    #[test]
    fn test_guess_by_wrong_player_is_rejected() {
        let mut state = state_with_pending_guess();

        let err = guess_suits(&mut state, &pid("b"), &[Suit::Hearts]);

        assert_eq!(err, Err(GameError::NotYourTurn(pid("b"))));
        assert!(state.current_ask.is_some());
    }

    // ---------------------------------------------------------------
    // Conservation, turn skipping, game end
    // ---------------------------------------------------------------

    #[test]
    fn test_card_conservation_through_a_played_sequence() {
        let mut rng = StdRng::seed_from_u64(1234);
        let roster = seats(&["a", "b", "c"]);
        let mut state = deal(&roster, &mut rng);
        assert_eq!(state.total_cards(), 52);

        // Play a handful of asks; whoever's turn it is asks the next seat
        // for the first rank in their hand.
        for _ in 0..12 {
            if state.game_over {
                break;
            }
            let asker = state.current_seat().unwrap().id.clone();
            let target = state
                .players
                .iter()
                .find(|s| s.id != asker && !state.hand(&s.id).is_empty())
                .map(|s| s.id.clone());
            let Some(target) = target else { break };
            let Some(rank) = state.hand(&asker).first().map(|c| c.rank)
            else {
                break;
            };

            match ask_for_rank(&mut state, &asker, &target, rank).unwrap() {
                AskOutcome::MustGuess => {
                    // Guess a single arbitrary suit.
                    guess_suits(&mut state, &asker, &[Suit::Spades]).unwrap();
                }
                AskOutcome::WentFishing | AskOutcome::AutoTransferred => {}
            }
            assert_eq!(state.total_cards(), 52, "cards must be conserved");
        }
    }

    #[test]
    fn test_turn_passes_skip_empty_hands() {
        let mut state = fixed_state(
            vec![card(Rank::Seven, Suit::Spades)],
            vec![],
        );
        state.players = seats(&["a", "b", "c"]);
        state
            .hands
            .insert(pid("c"), vec![card(Rank::King, Suit::Hearts)]);
        state.scores.insert(pid("c"), 0);
        state.stockpiles.insert(pid("c"), Vec::new());
        state.deck = vec![card(Rank::Two, Suit::Hearts)];

        // a asks c (b's hand is empty) and misses; the turn must skip b.
        ask_for_rank(&mut state, &pid("a"), &pid("c"), Rank::Seven).unwrap();

        assert_eq!(state.current_player_index, 2);
    }

    #[test]
    fn test_game_ends_when_all_hands_empty_with_strict_winner() {
        let mut state = fixed_state(
            vec![
                card(Rank::Seven, Suit::Spades),
                card(Rank::Seven, Suit::Hearts),
                card(Rank::Seven, Suit::Diamonds),
            ],
            vec![card(Rank::Seven, Suit::Clubs)],
        );

        // The auto-transfer empties both hands and banks a's set.
        ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Seven).unwrap();

        assert!(state.game_over);
        assert_eq!(state.phase, FishingPhase::Complete);
        assert_eq!(state.winner, Some(pid("a")));
    }

    #[test]
    fn test_tied_scores_yield_no_winner() {
        let mut state = fixed_state(vec![], vec![]);
        state.scores.insert(pid("a"), 2);
        state.scores.insert(pid("b"), 2);

        check_game_over(&mut state);

        assert!(state.game_over);
        assert_eq!(state.winner, None);
    }

    #[test]
    fn test_actions_rejected_after_game_over() {
        let mut state = fixed_state(vec![], vec![]);
        check_game_over(&mut state);
        assert!(state.game_over);

        assert_eq!(
            ask_for_rank(&mut state, &pid("a"), &pid("b"), Rank::Ace),
            Err(GameError::GameOver)
        );
        assert_eq!(
            guess_suits(&mut state, &pid("a"), &[]),
            Err(GameError::GameOver)
        );
    }
}
