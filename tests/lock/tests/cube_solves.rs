//! End-to-end cube solves through the public harness surface: config file,
//! world, oracle provider, driver.

use std::io::Write;

use cubist_harness::config::{OracleConfig, SolverConfig};
use cubist_harness::oracles::stickers::StickerOracle;
use cubist_harness::worlds::cube::{CubeWorld, MoveSet};
use cubist_kernel::puzzle::encode::encoded_len;
use cubist_kernel::puzzle::moves::parse_sequence;
use cubist_search::{replay_path, search, CancelToken, NoopObserver, SearchPolicy, Termination};
use lock_tests::scenarios::{run_cube_scenario, CubeScenario};

fn solve_with_stickers(size: usize, move_set: MoveSet, scramble: &str) -> Vec<String> {
    let world = CubeWorld::new(size, move_set).unwrap();
    let start = world.scrambled(&parse_sequence(scramble).unwrap()).unwrap();
    let oracle = StickerOracle::for_geometry(world.geometry());
    let result = search(
        start.clone(),
        &world,
        &oracle,
        &SearchPolicy::default(),
        &CancelToken::new(),
        &mut NoopObserver,
    )
    .unwrap();
    assert!(result.is_solved(), "{size}x{size} {scramble}: {:?}", result.termination);
    assert!(replay_path(&world, &start, &result.path).is_solved());
    result.path.iter().map(ToString::to_string).collect()
}

#[test]
fn solves_short_scrambles_on_every_size() {
    for (size, scramble) in [(2, "R U F'"), (3, "R U' F"), (4, "L D"), (5, "B U'")] {
        let path = solve_with_stickers(size, MoveSet::Full, scramble);
        assert!(!path.is_empty());
    }
}

#[test]
fn single_turn_is_undone_in_one_move() {
    let path = solve_with_stickers(3, MoveSet::Full, "R");
    assert_eq!(path, vec!["R'".to_string()]);
}

#[test]
fn fixed_corner_2x2_solves_seeded_scrambles() {
    for seed in 0..4 {
        let report = run_cube_scenario(
            CubeScenario {
                seed,
                ..CubeScenario::default()
            },
            &SearchPolicy::default(),
        );
        assert!(report.replay_solved, "seed {seed}: {report:?}");
        assert_eq!(report.termination, "\"goal_reached\"");
    }
}

#[test]
fn budget_exhaustion_is_not_a_solution() {
    let world = CubeWorld::new(3, MoveSet::Full).unwrap();
    let start = world
        .scrambled(&parse_sequence("R U F L D B R' U'").unwrap())
        .unwrap();
    let oracle = StickerOracle::for_geometry(world.geometry());
    let policy = SearchPolicy {
        max_expansions: Some(10),
        round_size: 5,
        ..SearchPolicy::default()
    };
    let result = search(start, &world, &oracle, &policy, &CancelToken::new(), &mut NoopObserver)
        .unwrap();
    assert_eq!(result.termination, Termination::ExpansionBudgetExceeded);
    assert!(result.path.is_empty());
    assert_eq!(result.stats.expanded, 10);
}

#[test]
fn config_file_with_model_oracle_solves() {
    let dir = tempfile::tempdir().unwrap();

    // Constant-output network: every state estimates 1.
    let inputs = encoded_len(2);
    let weights = serde_json::json!({
        "layers": [
            { "weights": [vec![0.0f32; inputs]], "bias": [1.0] },
            { "weights": [[1.0]], "bias": [0.0] }
        ]
    });
    let model_path = dir.path().join("model.json");
    std::fs::write(&model_path, serde_json::to_vec(&weights).unwrap()).unwrap();

    let config_path = dir.path().join("solver.json");
    let mut file = std::fs::File::create(&config_path).unwrap();
    write!(
        file,
        r#"{{ "cube_size": 2, "move_set": "fixed_corner",
             "search": {{ "round_size": 20 }},
             "oracle": {{ "kind": "model", "path": {} }} }}"#,
        serde_json::to_string(&model_path).unwrap()
    )
    .unwrap();
    drop(file);

    let config = SolverConfig::load(&config_path).unwrap();
    assert!(matches!(config.oracle, OracleConfig::Model { .. }));
    let world = config.build_world().unwrap();
    let oracle = config.build_provider(&world).acquire().unwrap();
    assert_eq!(oracle.name(), "mlp");

    let start = world.scrambled(&parse_sequence("R U").unwrap()).unwrap();
    let result = search(
        start.clone(),
        &world,
        oracle.as_ref(),
        &config.search,
        &CancelToken::new(),
        &mut NoopObserver,
    )
    .unwrap();
    assert_eq!(result.path.len(), 2);
    assert!(replay_path(&world, &start, &result.path).is_solved());
}
