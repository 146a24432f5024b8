//! Tests for the configuration module.

use super::*;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.common.first_mover, "one");
    assert_eq!(config.mcts.iterations, 2000);
    assert!((config.mcts.explore_param - 2.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.policy, "most_visited");
    assert!(config.mcts.seed.is_none());
    assert_eq!(config.actor.games, 10);
    assert_eq!(config.actor.opponent_policy, "most_visited");
    assert_eq!(config.actor.log_interval, 1);
}

#[test]
fn test_env_overrides() {
    std::env::set_var("UCT_MCTS_ITERATIONS", "7");
    std::env::set_var("UCT_MCTS_SEED", "1234");
    std::env::set_var("UCT_ACTOR_OPPONENT_POLICY", "uniform_random");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.iterations, 7);
    assert_eq!(config.mcts.seed, Some(1234));
    assert_eq!(config.actor.opponent_policy, "uniform_random");

    std::env::remove_var("UCT_MCTS_ITERATIONS");
    std::env::remove_var("UCT_MCTS_SEED");
    std::env::remove_var("UCT_ACTOR_OPPONENT_POLICY");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("UCT_ACTOR_LOG_INTERVAL", "often");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.actor.log_interval, 1);

    std::env::remove_var("UCT_ACTOR_LOG_INTERVAL");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"
first_mover = "two"

[mcts]
iterations = 500
explore_param = 1.0
policy = "highest_win_rate"
seed = 42

[actor]
games = 100
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.common.first_mover, "two");
    assert_eq!(config.mcts.iterations, 500);
    assert!((config.mcts.explore_param - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.policy, "highest_win_rate");
    assert_eq!(config.mcts.seed, Some(42));
    assert_eq!(config.actor.games, 100);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[mcts]
explore_param = 0.5
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert!((config.mcts.explore_param - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.mcts.iterations, 2000); // Default
    assert_eq!(config.common.first_mover, "one"); // Default
    assert_eq!(config.actor.games, 10); // Default
}

#[test]
fn test_load_from_missing_path_uses_defaults() {
    let config = load_from_path(Path::new("/nonexistent/uct/config.toml"));
    assert_eq!(config.common.first_mover, "one");
    assert_eq!(config.mcts.policy, "most_visited");
}

#[test]
fn test_load_from_malformed_file_uses_defaults() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[mcts\niterations = ").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.common.first_mover, "one");
}

#[test]
fn test_load_from_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[common]\nfirst_mover = \"two\"\n").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.common.first_mover, "two");
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.first_mover, cloned.common.first_mover);
    assert_eq!(config.mcts.iterations, cloned.mcts.iterations);
}
