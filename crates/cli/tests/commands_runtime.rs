use std::env;
use std::sync::{Mutex, OnceLock};

use geolens_cli::commands::track::TrackArgs;
use geolens_cli::commands::{
    catalog, config, insights, migrate, preference, profile, recommend, reset, stats, track,
};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn migrate_returns_success_with_file_database() {
    with_database(|| {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn invalid_config_fails_with_config_exit_code() {
    with_env(&[("GEOLENS_RECOMMENDATIONS_DEFAULT_LIMIT", "0")], || {
        let result = stats::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "stats");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn cold_start_recommends_popular_destinations() {
    with_database(|| {
        let result = recommend::run(Vec::new(), None);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let names: Vec<&str> = payload["data"]
            .as_array()
            .expect("recommendations array")
            .iter()
            .filter_map(|entry| entry["country"].as_str())
            .collect();
        assert_eq!(names, ["Japan", "South Korea", "Singapore", "Thailand", "Malaysia"]);
    });
}

#[test]
fn tracked_interactions_survive_across_invocations() {
    with_database(|| {
        for _ in 0..5 {
            let result = track::run(track_args("Japan", "click"));
            assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);
        }

        let payload = parse_payload(&profile::run().output);
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["favorite_regions"][0], "East Asia");

        let payload = parse_payload(&stats::run().output);
        assert_eq!(payload["data"]["total_interactions"], 5);
        assert_eq!(payload["data"]["most_viewed_country"], "Japan");
    });
}

#[test]
fn track_rejects_invalid_input_before_touching_storage() {
    with_database(|| {
        let result = track::run(track_args("Japan", "like"));
        assert_eq!(result.exit_code, 6);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "invalid_input");

        let result =
            track::run(TrackArgs { rating: Some(9), ..track_args("Japan", "rate") });
        assert_eq!(result.exit_code, 6);

        let payload = parse_payload(&stats::run().output);
        assert_eq!(payload["data"]["total_interactions"], 0);
    });
}

#[test]
fn recommend_labels_follow_the_served_list() {
    with_database(|| {
        let result = preference::run("budget_range", "low");
        assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);

        let payload = parse_payload(&recommend::run(Vec::new(), None).output);
        assert_eq!(payload["message"], "5 popular recommendations");

        for _ in 0..3 {
            let result = track::run(track_args("Egypt", "pin"));
            assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);
        }
        let payload = parse_payload(&recommend::run(Vec::new(), None).output);
        assert_eq!(payload["message"], "5 personalized recommendations");
    });
}

#[test]
fn recommend_rejects_limit_above_maximum() {
    with_database(|| {
        let result = recommend::run(Vec::new(), Some(51));
        assert_eq!(result.exit_code, 6);
    });
}

#[test]
fn set_preference_creates_profile_and_reset_clears_it() {
    with_database(|| {
        let result = preference::run("budget_range", "low");
        assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["budget_range"], "low");

        let payload = parse_payload(&profile::run().output);
        assert_eq!(payload["data"]["budget_range"], "low");

        let result = reset::run();
        assert_eq!(result.exit_code, 0);
        let payload = parse_payload(&profile::run().output);
        assert!(payload["data"].is_null());

        let result = preference::run("preferred_safety_rating", "9");
        assert_eq!(result.exit_code, 6);
    });
}

#[test]
fn insights_without_profile_prompt_for_exploration() {
    with_database(|| {
        let payload = parse_payload(&insights::run("Japan").output);
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["insights"].as_array().map(Vec::len), Some(1));
        assert_eq!(payload["data"]["similar_countries"].as_array().map(Vec::len), Some(0));
    });
}

#[test]
fn catalog_lists_every_country_without_database() {
    let result = catalog::run();
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"].as_array().map(Vec::len), Some(20));
}

#[test]
fn config_reports_env_sources() {
    with_env(&[("GEOLENS_STORAGE_KEY", "custom.key"), ("GEOLENS_LOG_LEVEL", "debug")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let entries = payload["data"].as_array().expect("entries");
        let storage = entries.iter().find(|entry| entry["key"] == "storage.key").expect("key");
        assert_eq!(storage["value"], "custom.key");
        assert_eq!(storage["source"], "env (GEOLENS_STORAGE_KEY)");

        let level = entries.iter().find(|entry| entry["key"] == "logging.level").expect("level");
        assert_eq!(level["source"], "env (GEOLENS_LOG_LEVEL)");
    });
}

fn track_args(country: &str, action: &str) -> TrackArgs {
    TrackArgs { country: country.to_string(), action: action.to_string(), ..TrackArgs::default() }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be JSON")
}

/// Runs `test_fn` against a fresh SQLite file so state persists across commands
fn with_database(test_fn: impl FnOnce()) {
    let dir = TempDir::new().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("geolens.db").display());
    with_env(&[("GEOLENS_DATABASE_URL", url.as_str())], test_fn);
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "GEOLENS_DATABASE_URL",
        "GEOLENS_DATABASE_MAX_CONNECTIONS",
        "GEOLENS_DATABASE_TIMEOUT_SECS",
        "GEOLENS_STORAGE_KEY",
        "GEOLENS_RECOMMENDATIONS_DEFAULT_LIMIT",
        "GEOLENS_LOGGING_LEVEL",
        "GEOLENS_LOGGING_FORMAT",
        "GEOLENS_LOG_LEVEL",
        "GEOLENS_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
