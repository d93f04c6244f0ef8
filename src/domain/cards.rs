//! Card values for the 104-card deck.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A single card, identified by its face value in `1..=104`.
///
/// Cards have no suit and no identity beyond the value. The penalty printed
/// on a physical card is derived from the value (see
/// [`crate::domain::scoring::penalty`]), so it is not stored here.
///
/// Ordering is by value; the resolution order of simultaneous plays relies
/// on values being globally unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Lowest card value.
    pub const MIN: u8 = 1;
    /// Highest card value.
    pub const MAX: u8 = 104;

    /// Construct a card, rejecting values outside `1..=104`.
    pub fn new(value: u8) -> Result<Self, GameError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Card(value))
        } else {
            Err(GameError::InvalidCard { value })
        }
    }

    /// Construct without range checking. Callers must pass `1..=104`.
    pub(crate) const fn from_value_unchecked(value: u8) -> Self {
        Card(value)
    }

    /// Face value of the card.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Card {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Card::new(value)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
