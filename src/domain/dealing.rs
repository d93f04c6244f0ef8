//! Deterministic deck shuffling and dealing.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::cards::Card;
use crate::domain::rows::Row;
use crate::domain::rules::{DECK_SIZE, ROW_COUNT};
use crate::error::GameError;

/// The full deck in value order, `1..=104`.
pub fn full_deck() -> Vec<Card> {
    (Card::MIN..=Card::MAX)
        .map(Card::from_value_unchecked)
        .collect()
}

/// A uniformly shuffled deck for a seed. Same seed, same permutation.
pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut deck = full_deck();
    let mut rng = StdRng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
    deck
}

/// Everything one deal produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealResult {
    /// The four rows, each seeded with one card.
    pub rows: [Row; ROW_COUNT],
    /// One sorted hand per active participant, in join order.
    pub hands: Vec<Vec<Card>>,
    /// Undealt remainder of the deck.
    pub stock: Vec<Card>,
}

/// Deal a game: seed the four rows, then deal `hand_size` cards to each of
/// `active_count` participants, from a deck shuffled with `seed`.
///
/// Cards come off the back of the shuffled deck, rows first, then hands in
/// join order. Hands are sorted ascending for presentation. A deal the deck
/// cannot cover is rejected outright rather than dealt short.
pub fn deal(active_count: usize, hand_size: usize, seed: u64) -> Result<DealResult, GameError> {
    let required = ROW_COUNT + active_count * hand_size;
    if required > DECK_SIZE {
        return Err(GameError::InsufficientDeck {
            required,
            available: DECK_SIZE,
        });
    }

    let mut deck = shuffled_deck(seed);

    let mut rows: [Row; ROW_COUNT] = Default::default();
    for row in rows.iter_mut() {
        // The size check above reserved these cards.
        if let Some(card) = deck.pop() {
            *row = Row::starting_with(card);
        }
    }

    let mut hands = Vec::with_capacity(active_count);
    for _ in 0..active_count {
        let mut hand = deck.split_off(deck.len() - hand_size);
        hand.sort();
        hands.push(hand);
    }

    Ok(DealResult {
        rows,
        hands,
        stock: deck,
    })
}
