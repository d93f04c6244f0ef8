// General test utilities

/// Generate a deterministic seed for a test based on its name.
///
/// Each test gets a unique, stable seed, so deterministic tests never share
/// shuffles with each other and never change between runs.
pub fn test_seed(test_name: &str) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(test_name.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Participant id namespaced by test, to keep concurrent sessions apart in
/// shared logs.
pub fn test_participant(test_name: &str, seat: usize) -> String {
    format!("{}_{}", test_name.replace("::", "_"), seat)
}
