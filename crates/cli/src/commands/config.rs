use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use scentwise_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let recommendations = &config.recommendations;
    let weights = &recommendations.weights;
    let catalog_path =
        config.catalog.path.as_ref().map(|path| path.display().to_string());

    let lines = vec![
        "effective config (source precedence: env > file > default):".to_string(),
        render_line(
            "recommendations.default_limit",
            &recommendations.default_limit.to_string(),
            source("recommendations.default_limit", &["SCENTWISE_RECOMMENDATIONS_DEFAULT_LIMIT"]),
        ),
        render_line(
            "recommendations.max_limit",
            &recommendations.max_limit.to_string(),
            source("recommendations.max_limit", &["SCENTWISE_RECOMMENDATIONS_MAX_LIMIT"]),
        ),
        render_line(
            "recommendations.min_match_score",
            &recommendations.min_match_score.to_string(),
            source(
                "recommendations.min_match_score",
                &["SCENTWISE_RECOMMENDATIONS_MIN_MATCH_SCORE"],
            ),
        ),
        render_line(
            "recommendations.weights.notes",
            &format!("{:.2}", weights.notes),
            source("recommendations.weights.notes", &["SCENTWISE_WEIGHTS_NOTES"]),
        ),
        render_line(
            "recommendations.weights.intensity",
            &format!("{:.2}", weights.intensity),
            source("recommendations.weights.intensity", &["SCENTWISE_WEIGHTS_INTENSITY"]),
        ),
        render_line(
            "recommendations.weights.mood",
            &format!("{:.2}", weights.mood),
            source("recommendations.weights.mood", &["SCENTWISE_WEIGHTS_MOOD"]),
        ),
        render_line(
            "recommendations.weights.season",
            &format!("{:.2}", weights.season),
            source("recommendations.weights.season", &["SCENTWISE_WEIGHTS_SEASON"]),
        ),
        render_line(
            "catalog.path",
            catalog_path.as_deref().unwrap_or("<unset: demo catalog>"),
            source("catalog.path", &["SCENTWISE_CATALOG_PATH"]),
        ),
        render_line(
            "logging.level",
            &config.logging.level,
            source("logging.level", &["SCENTWISE_LOGGING_LEVEL", "SCENTWISE_LOG_LEVEL"]),
        ),
        render_line(
            "logging.format",
            &format!("{:?}", config.logging.format),
            source("logging.format", &["SCENTWISE_LOGGING_FORMAT", "SCENTWISE_LOG_FORMAT"]),
        ),
    ];

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("scentwise.toml"), PathBuf::from("config/scentwise.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
