use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use scentwise_cli::commands::{catalog, config, doctor, recommend, similar, upsell};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn similar_returns_ranked_products_for_demo_catalog() {
    with_env(&[], || {
        let result = similar::run("lavender-fields", None);
        assert_eq!(result.exit_code, 0, "expected successful similar query");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "similar");
        assert_eq!(payload["status"], "ok");
        assert!(payload["error_class"].is_null());

        let data = payload["data"].as_array().expect("data should be an array");
        assert_eq!(data.len(), 4, "default limit should apply");
        assert_eq!(data[0]["product"]["id"], "eucalyptus-mint-spa");
        assert!(data.iter().all(|entry| entry["product"]["id"] != "lavender-fields"));
    });
}

#[test]
fn similar_limit_is_clamped_to_configured_maximum() {
    let vars = [
        ("SCENTWISE_RECOMMENDATIONS_DEFAULT_LIMIT", "1"),
        ("SCENTWISE_RECOMMENDATIONS_MAX_LIMIT", "2"),
    ];
    with_env(&vars, || {
        let result = similar::run("lavender-fields", Some(50));
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"].as_array().map(Vec::len), Some(2));
    });
}

#[test]
fn similar_reports_unknown_product_as_not_found() {
    with_env(&[], || {
        let result = similar::run("no-such-candle", None);
        assert_eq!(result.exit_code, 5, "expected not-found exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "not_found");
        let message = payload["message"].as_str().unwrap_or_default();
        assert!(message.contains("no-such-candle"), "message should name the product: {message}");
        assert!(message.contains("correlation id: cli-similar-"));
    });
}

#[test]
fn upsell_returns_source_and_items() {
    with_env(&[], || {
        let result = upsell::run("lavender-fields", Some(2));
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "upsell");
        assert_eq!(payload["data"]["source_product"]["id"], "lavender-fields");

        let items = payload["data"]["items"].as_array().expect("items should be an array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["product"]["id"], "citrus-grove");
        assert_eq!(items[0]["complementary_score"], 65);
        assert_eq!(items[0]["match_reason"], "Adds an interesting contrast");
    });
}

#[test]
fn recommend_explains_matches_for_demo_customer() {
    with_env(&[], || {
        let result = recommend::run("cust-calm-reader", Some(1));
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let data = payload["data"].as_array().expect("data should be an array");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["product_id"], "lavender-fields");
        assert_eq!(data[0]["matching_attributes"]["intensity"], true);
        assert_eq!(data[0]["reasons"][0], "Features your favorite notes: Lavender, Vanilla");
    });
}

#[test]
fn recommend_honors_min_match_score() {
    with_env(&[("SCENTWISE_RECOMMENDATIONS_MIN_MATCH_SCORE", "70")], || {
        let result = recommend::run("cust-cozy-nights", Some(20));
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let data = payload["data"].as_array().expect("data should be an array");
        let ids: Vec<&str> = data.iter().filter_map(|entry| entry["product_id"].as_str()).collect();
        assert_eq!(ids, vec!["cedar-campfire", "spiced-hearth"]);
    });
}

#[test]
fn recommend_reports_unknown_customer() {
    with_env(&[], || {
        let result = recommend::run("nobody", None);
        assert_eq!(result.exit_code, 5);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "not_found");
    });
}

#[test]
fn query_commands_fail_with_config_exit_code_on_invalid_config() {
    with_env(&[("SCENTWISE_WEIGHTS_NOTES", "0.9")], || {
        let result = similar::run("lavender-fields", None);
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "similar");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn catalog_lists_demo_products() {
    with_env(&[], || {
        let result = catalog::run();
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let data = payload["data"].as_array().expect("data should be an array");
        assert_eq!(data.len(), 10);
        assert_eq!(payload["message"], "10 products in demo catalog (9 active)");
        assert_eq!(data[0]["id"], "cedar-campfire", "listing is ordered by id");
        assert_eq!(data[0]["intensity"], "STRONG");
    });
}

#[test]
fn catalog_file_replaces_demo_catalog() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"[
  {
    "id": "fig-leaf",
    "sku": "CND-FIG-001",
    "name": "Fig Leaf",
    "profile": {
      "primary_notes": [{ "name": "Fig", "intensity": 6 }],
      "intensity": "MODERATE",
      "mood": ["FRESH"],
      "season": ["SUMMER"]
    }
  },
  {
    "id": "fig-and-cedar",
    "sku": "CND-FIG-002",
    "name": "Fig and Cedar",
    "profile": {
      "primary_notes": [{ "name": "Fig", "intensity": 5 }],
      "base_notes": [{ "name": "Cedarwood", "intensity": 6 }],
      "intensity": "MODERATE",
      "mood": ["FRESH", "COZY"],
      "season": ["SUMMER", "FALL"]
    }
  }
]"#,
    )
    .expect("write catalog");
    let catalog_path = path.display().to_string();

    with_env(&[("SCENTWISE_CATALOG_PATH", catalog_path.as_str())], || {
        let result = catalog::run();
        assert_eq!(result.exit_code, 0);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"].as_array().map(Vec::len), Some(2));

        let result = similar::run("fig-leaf", None);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"][0]["product"]["id"], "fig-and-cedar");
    });
}

#[test]
fn broken_catalog_file_fails_with_catalog_exit_code() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("catalog.json");
    fs::write(&path, "[{\"id\": ").expect("write catalog");
    let catalog_path = path.display().to_string();

    with_env(&[("SCENTWISE_CATALOG_PATH", catalog_path.as_str())], || {
        let result = recommend::run("cust-calm-reader", None);
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "catalog_load");
    });
}

#[test]
fn doctor_json_passes_with_defaults() {
    with_env(&[], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 0);

        let report = parse_payload(&result.output);
        assert_eq!(report["overall_status"], "pass");
        let names: Vec<&str> = report["checks"]
            .as_array()
            .expect("checks should be an array")
            .iter()
            .filter_map(|check| check["name"].as_str())
            .collect();
        assert_eq!(names, vec!["config_validation", "catalog_load", "scoring_self_check"]);
    });
}

#[test]
fn doctor_skips_dependent_checks_when_config_fails() {
    with_env(&[("SCENTWISE_LOG_FORMAT", "xml")], || {
        let result = doctor::run(false);
        assert_eq!(result.exit_code, 1);
        assert!(result.output.starts_with("doctor: one or more readiness checks failed"));
        assert!(result.output.contains("- [fail] config_validation"));
        assert!(result.output.contains("- [skip] catalog_load"));
        assert!(result.output.contains("- [skip] scoring_self_check"));
    });
}

#[test]
fn config_reports_env_source_attribution() {
    let vars =
        [("SCENTWISE_RECOMMENDATIONS_DEFAULT_LIMIT", "6"), ("SCENTWISE_LOG_LEVEL", "debug")];
    with_env(&vars, || {
        let output = config::run();

        assert!(output.starts_with("effective config"));
        assert!(output.contains(
            "- recommendations.default_limit = 6 (source: env (SCENTWISE_RECOMMENDATIONS_DEFAULT_LIMIT))"
        ));
        assert!(output.contains("- logging.level = debug (source: env (SCENTWISE_LOG_LEVEL))"));
        assert!(output.contains("- catalog.path = <unset: demo catalog> (source: default)"));
        assert!(output.contains("- recommendations.weights.notes = 0.40 (source: default)"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "SCENTWISE_RECOMMENDATIONS_DEFAULT_LIMIT",
        "SCENTWISE_RECOMMENDATIONS_MAX_LIMIT",
        "SCENTWISE_RECOMMENDATIONS_MIN_MATCH_SCORE",
        "SCENTWISE_WEIGHTS_NOTES",
        "SCENTWISE_WEIGHTS_INTENSITY",
        "SCENTWISE_WEIGHTS_MOOD",
        "SCENTWISE_WEIGHTS_SEASON",
        "SCENTWISE_CATALOG_PATH",
        "SCENTWISE_LOGGING_LEVEL",
        "SCENTWISE_LOGGING_FORMAT",
        "SCENTWISE_LOG_LEVEL",
        "SCENTWISE_LOG_FORMAT",
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
