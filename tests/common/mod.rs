#![allow(dead_code)]
//! Shared integration test utilities.

use proptest::prelude::ProptestConfig;
use proptest::test_runner::RngSeed;
use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Seed used for property tests under CI.
pub const DEFAULT_PROPTEST_SEED: u64 = 0x5EED5EED;

/// Property test config; fixed seed when `CI` is set.
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    let mut config = ProptestConfig::with_cases(cases);
    if matches!(config.rng_seed, RngSeed::Random) && std::env::var("CI").is_ok() {
        config.rng_seed = RngSeed::Fixed(DEFAULT_PROPTEST_SEED);
    }
    config
}

/// Route `tracing` output through the test harness once per binary.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .with_ansi(false)
            .try_init();
    });
}
