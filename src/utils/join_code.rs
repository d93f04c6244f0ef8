//! Room code generation for sessions.
//!
//! Room codes are 6-character strings using Crockford's Base32 alphabet,
//! chosen so codes survive being read aloud or typed from a screen.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

/// Length of a room code.
pub const ROOM_CODE_LEN: usize = 6;

/// Generate a random room code.
///
/// Uniqueness within a registry is the caller's problem; collisions are
/// handled by regenerating.
///
/// # Example
/// ```
/// use cowtaker::utils::join_code::{generate_room_code, ROOM_CODE_LEN};
///
/// let code = generate_room_code();
/// assert_eq!(code.len(), ROOM_CODE_LEN);
/// assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
/// ```
pub fn generate_room_code() -> String {
    let mut rng = rand::rng();
    let mut code = String::with_capacity(ROOM_CODE_LEN);
    for _ in 0..ROOM_CODE_LEN {
        let idx = rng.random_range(0..CROCKFORD.len());
        code.push(CROCKFORD[idx] as char);
    }
    code
}
