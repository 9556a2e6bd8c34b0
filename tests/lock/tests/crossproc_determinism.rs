//! Cross-process determinism: the `solve_fixture` binary must print the
//! same report under different environments, and the same report as an
//! in-process run of the same scenario.

use std::path::Path;
use std::process::Command;

use cubist_search::SearchPolicy;
use lock_tests::scenarios::{run_cube_scenario, CubeScenario};

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("solve_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("CUBIST_FIXTURE_SIZE")
        .env_remove("CUBIST_FIXTURE_LENGTH")
        .env_remove("CUBIST_FIXTURE_SEED");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "solve_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    assert!(
        baseline.contains("start_fingerprint=sha256:"),
        "baseline output missing start_fingerprint"
    );
    assert!(
        baseline.contains("policy_digest=sha256:"),
        "baseline output missing policy_digest"
    );
    assert!(
        baseline.contains("replay_solved=true"),
        "baseline did not solve: {baseline}"
    );

    let tmp = tempfile::tempdir().expect("tempdir");
    let tmp_dir = tmp.path().to_string_lossy().to_string();
    let variants: [(&str, Vec<(&str, &str)>); 3] = [
        ("LC_ALL=C", vec![("LC_ALL", "C")]),
        ("TZ=UTC+12", vec![("TZ", "Etc/GMT+12")]),
        ("RUST_LOG=trace", vec![("RUST_LOG", "trace")]),
    ];
    for (label, overrides) in &variants {
        let out = run_variant(&root, overrides);
        assert_eq!(baseline, out, "variant {label} diverged from baseline");
    }
    let out = run_variant(&tmp_dir, &[]);
    assert_eq!(baseline, out, "different working directory diverged");
}

#[test]
fn fixture_matches_in_process_run() {
    let root = workspace_root();
    let scenario = CubeScenario {
        size: 3,
        scramble_length: 4,
        seed: 2024,
        ..CubeScenario::default()
    };
    let printed = run_variant(
        &root,
        &[
            ("CUBIST_FIXTURE_SIZE", "3"),
            ("CUBIST_FIXTURE_LENGTH", "4"),
            ("CUBIST_FIXTURE_SEED", "2024"),
        ],
    );
    let expected = run_cube_scenario(scenario, &SearchPolicy::default()).lines();
    let printed: Vec<&str> = printed.lines().collect();
    assert_eq!(printed, expected);
}

#[test]
fn different_seeds_give_different_scrambles() {
    let root = workspace_root();
    let a = run_variant(&root, &[("CUBIST_FIXTURE_SEED", "1")]);
    let b = run_variant(&root, &[("CUBIST_FIXTURE_SEED", "2")]);
    let scramble = |out: &str| {
        out.lines()
            .find(|l| l.starts_with("scramble="))
            .map(str::to_string)
    };
    assert_ne!(scramble(&a), scramble(&b));
}
