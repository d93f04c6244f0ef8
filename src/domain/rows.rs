//! The four shared rows and the placement rules that pick between them.

use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::rules::ROW_CAPACITY;
use crate::domain::scoring::total_penalty;

/// One shared row: cards in placement order, ascending by value.
///
/// Empty only before the first deal. During play a row holds one to five
/// cards; a sixth placement busts it and it restarts from the placed card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cards: Vec<Card>,
}

impl Row {
    /// Start a row from its seed card.
    pub fn starting_with(card: Card) -> Self {
        Row { cards: vec![card] }
    }

    /// Cards in the row, oldest first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// True once the row holds five cards; the next placement busts it.
    pub fn is_full(&self) -> bool {
        self.cards.len() >= ROW_CAPACITY
    }

    /// The most recently placed card.
    pub fn last(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Sum of the penalties of every card in the row.
    pub fn penalty(&self) -> u32 {
        total_penalty(&self.cards)
    }

    /// Append a card. Callers check [`Row::is_full`] first; appending to a
    /// full row is a rules violation, not a supported operation.
    pub fn append(&mut self, card: Card) {
        debug_assert!(!self.is_full(), "append to a full row");
        self.cards.push(card);
    }

    /// Replace the row with a single card, returning the swept cards.
    pub fn restart(&mut self, card: Card) -> Vec<Card> {
        std::mem::replace(&mut self.cards, vec![card])
    }
}

/// Index of the row a card lands on: among rows whose last card is strictly
/// lower, the one with the smallest gap. `None` when no row qualifies.
///
/// Card values are unique, so two rows can never tie on the gap.
pub fn eligible_row(rows: &[Row], card: Card) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for (idx, row) in rows.iter().enumerate() {
        let Some(last) = row.last() else { continue };
        if last >= card {
            continue;
        }
        let gap = card.value() - last.value();
        match best {
            Some((_, best_gap)) if best_gap <= gap => {}
            _ => best = Some((idx, gap)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Index of the row a capped-out player must take: strictly smallest
/// penalty, lowest index on ties.
///
/// # Panics
///
/// Panics if `rows` is empty; the board always has four rows.
pub fn cheapest_row(rows: &[Row]) -> usize {
    let mut best_idx = 0;
    let mut best_penalty = rows[0].penalty();
    for (idx, row) in rows.iter().enumerate().skip(1) {
        let p = row.penalty();
        if p < best_penalty {
            best_idx = idx;
            best_penalty = p;
        }
    }
    best_idx
}
