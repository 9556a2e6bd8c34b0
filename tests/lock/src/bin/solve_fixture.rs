//! Binary that runs a seeded cube solve and prints deterministic output
//! lines for cross-process verification.
//!
//! Usage: `solve_fixture`
//!
//! Environment (all optional): `CUBIST_FIXTURE_SIZE`, `CUBIST_FIXTURE_LENGTH`,
//! `CUBIST_FIXTURE_SEED`.
//!
//! Output: key=value lines (see `CubeReport::lines`).

use cubist_search::SearchPolicy;
use lock_tests::scenarios::{run_cube_scenario, CubeScenario};

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() {
    let base = CubeScenario::default();
    let scenario = CubeScenario {
        size: env_or("CUBIST_FIXTURE_SIZE", base.size),
        scramble_length: env_or("CUBIST_FIXTURE_LENGTH", base.scramble_length),
        seed: env_or("CUBIST_FIXTURE_SEED", base.seed),
        ..base
    };
    let report = run_cube_scenario(scenario, &SearchPolicy::default());
    for line in report.lines() {
        println!("{line}");
    }
}
