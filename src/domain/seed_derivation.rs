//! RNG seed derivation for deterministic dealing.
//!
//! Each session draws one base seed from OS entropy at creation. Every deal
//! in that session (the first game and any rematch) derives its own shuffle
//! seed from the base seed and the deal counter, so replays of a recorded
//! session reshuffle identically while consecutive games differ.

/// Derive the shuffle seed for one deal.
///
/// Deterministic per `(session_seed, game_no)` pair, distinct across
/// consecutive games of the same session.
pub fn derive_deal_seed(session_seed: u64, game_no: u32) -> u64 {
    session_seed
        .wrapping_add((game_no as u64).wrapping_mul(1_000_003))
        .wrapping_add(1)
}
