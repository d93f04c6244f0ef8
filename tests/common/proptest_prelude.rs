// Shared proptest configuration, pulled into each property-test binary
// with include!.
//
// Env knobs:
// - PROPTEST_CASES: cases per property (default 8, clamped to at least 1).
// - PROPTEST_MAX_SHRINK_MS: optional cap on shrinking time in milliseconds.
//
// Generators in this crate are valid by construction; prop_assume! stays
// out so the acceptance rate is always 100%.

pub fn proptest_prelude_config() -> proptest::prelude::ProptestConfig {
    let base = proptest::prelude::ProptestConfig::default();

    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(8)
        .max(1);

    let max_shrink_time = std::env::var("PROPTEST_MAX_SHRINK_MS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(base.max_shrink_time);

    proptest::prelude::ProptestConfig {
        // No regression files for integration runs
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}
