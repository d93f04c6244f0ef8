//! Penalty scoring.
//!
//! Every card carries a penalty derived from its face value. Precedence is
//! part of the rules: 55 is checked before the divisibility tests, and 11
//! before 10 and 5 (so 55 scores 7, 33 scores 5, 40 scores 3, 45 scores 2).

use crate::domain::cards::Card;

/// Penalty points printed on a card.
pub fn penalty(card: Card) -> u32 {
    let value = card.value();
    if value == 55 {
        7
    } else if value % 11 == 0 {
        5
    } else if value % 10 == 0 {
        3
    } else if value % 5 == 0 {
        2
    } else {
        1
    }
}

/// Total penalty across a slice of cards. Zero for an empty slice.
pub fn total_penalty(cards: &[Card]) -> u32 {
    cards.iter().copied().map(penalty).sum()
}
