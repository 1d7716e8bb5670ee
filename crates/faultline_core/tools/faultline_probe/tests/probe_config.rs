use std::env;
use std::sync::{Mutex, OnceLock};

use faultline_probe::config::{Config, Scenario, DEFAULT_CADENCE_MS, DEFAULT_MAX_RECOVERY_ATTEMPTS};

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().expect("lock")
}

fn clear_env() {
    env::remove_var("FAULTLINE_NAME");
    env::remove_var("FAULTLINE_SCENARIO");
    env::remove_var("FAULTLINE_MAX_RECOVERY_ATTEMPTS");
    env::remove_var("FAULTLINE_CADENCE_MS");
}

#[test]
fn defaults_without_args_or_env() {
    let _guard = env_lock();
    clear_env();

    let config = Config::from_args_iter(["bin"]);

    assert_eq!(config.scenario, Scenario::Steady);
    assert_eq!(config.max_recovery_attempts, DEFAULT_MAX_RECOVERY_ATTEMPTS);
    assert_eq!(config.cadence_ms, DEFAULT_CADENCE_MS);
    assert!(!config.print_graph);
}

#[test]
fn flags_override_defaults_in_both_forms() {
    let _guard = env_lock();
    clear_env();

    let config = Config::from_args_iter([
        "bin",
        "--scenario",
        "stubborn-config",
        "--max-recovery-attempts=3",
        "--cadence-ms",
        "50",
        "--name=ring_driver",
        "--print-graph",
    ]);

    assert_eq!(config.scenario, Scenario::StubbornConfig);
    assert_eq!(config.max_recovery_attempts, 3);
    assert_eq!(config.cadence_ms, 50);
    assert_eq!(config.name, "ring_driver");
    assert!(config.print_graph);
}

#[test]
fn env_overrides_apply_and_flags_win() {
    let _guard = env_lock();
    clear_env();
    env::set_var("FAULTLINE_SCENARIO", "flaky-init");
    env::set_var("FAULTLINE_MAX_RECOVERY_ATTEMPTS", "5");

    let config = Config::from_args_iter(["bin"]);
    assert_eq!(config.scenario, Scenario::FlakyInit);
    assert_eq!(config.max_recovery_attempts, 5);

    let config = Config::from_args_iter(["bin", "--scenario", "steady"]);
    assert_eq!(config.scenario, Scenario::Steady);
    assert_eq!(config.max_recovery_attempts, 5);

    clear_env();
}

#[test]
fn unknown_scenario_values_are_ignored() {
    let _guard = env_lock();
    clear_env();
    env::set_var("FAULTLINE_SCENARIO", "definitely-not-a-scenario");

    let config = Config::from_args_iter(["bin", "--scenario", "also-bogus"]);
    assert_eq!(config.scenario, Scenario::Steady);

    clear_env();
}
