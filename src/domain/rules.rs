//! Fixed table rules: deck size, board shape, and session limits.

/// Number of distinct cards in the deck (values `1..=104`).
pub const DECK_SIZE: usize = 104;

/// Number of shared rows on the board.
pub const ROW_COUNT: usize = 4;

/// Cards a row can hold; a sixth placement busts the row.
pub const ROW_CAPACITY: usize = 5;

/// Default cards dealt to each active participant per game.
pub const DEFAULT_HAND_SIZE: usize = 10;

/// Default fewest active participants required to deal.
pub const DEFAULT_MIN_ACTIVE: usize = 2;

/// Default cap on participants in one session, active plus spectators.
pub const DEFAULT_MAX_PARTICIPANTS: usize = 10;

/// Largest active-player count a deal of `hand_size` cards can cover.
///
/// Four cards seed the rows before any hand is dealt.
///
/// # Panics
///
/// Panics if `hand_size` is zero (configuration validation rejects that
/// before it can reach here).
pub fn max_active_for(hand_size: usize) -> usize {
    (DECK_SIZE - ROW_COUNT) / hand_size
}
