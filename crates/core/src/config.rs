use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scent::{ScoringWeights, DEFAULT_RECOMMENDATION_LIMIT, MAX_RECOMMENDATION_LIMIT};

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub recommendations: RecommendationConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecommendationConfig {
    pub default_limit: usize,
    pub max_limit: usize,
    /// Candidates scoring below this are dropped before truncation.
    pub min_match_score: u8,
    pub weights: ScoringWeights,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in demo catalog is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub default_limit: Option<usize>,
    pub min_match_score: Option<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_RECOMMENDATION_LIMIT,
            max_limit: MAX_RECOMMENDATION_LIMIT,
            min_match_score: 0,
            weights: ScoringWeights::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Compact }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from("scentwise.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(recommendations) = patch.recommendations {
            if let Some(default_limit) = recommendations.default_limit {
                self.recommendations.default_limit = default_limit;
            }
            if let Some(max_limit) = recommendations.max_limit {
                self.recommendations.max_limit = max_limit;
            }
            if let Some(min_match_score) = recommendations.min_match_score {
                self.recommendations.min_match_score = min_match_score;
            }
            if let Some(weights) = recommendations.weights {
                let current = &mut self.recommendations.weights;
                if let Some(notes) = weights.notes {
                    current.notes = notes;
                }
                if let Some(intensity) = weights.intensity {
                    current.intensity = intensity;
                }
                if let Some(mood) = weights.mood {
                    current.mood = mood;
                }
                if let Some(season) = weights.season {
                    current.season = season;
                }
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("SCENTWISE_RECOMMENDATIONS_DEFAULT_LIMIT") {
            self.recommendations.default_limit =
                parse_usize("SCENTWISE_RECOMMENDATIONS_DEFAULT_LIMIT", &value)?;
        }
        if let Some(value) = read_env("SCENTWISE_RECOMMENDATIONS_MAX_LIMIT") {
            self.recommendations.max_limit =
                parse_usize("SCENTWISE_RECOMMENDATIONS_MAX_LIMIT", &value)?;
        }
        if let Some(value) = read_env("SCENTWISE_RECOMMENDATIONS_MIN_MATCH_SCORE") {
            self.recommendations.min_match_score =
                parse_u8("SCENTWISE_RECOMMENDATIONS_MIN_MATCH_SCORE", &value)?;
        }

        if let Some(value) = read_env("SCENTWISE_WEIGHTS_NOTES") {
            self.recommendations.weights.notes = parse_f64("SCENTWISE_WEIGHTS_NOTES", &value)?;
        }
        if let Some(value) = read_env("SCENTWISE_WEIGHTS_INTENSITY") {
            self.recommendations.weights.intensity =
                parse_f64("SCENTWISE_WEIGHTS_INTENSITY", &value)?;
        }
        if let Some(value) = read_env("SCENTWISE_WEIGHTS_MOOD") {
            self.recommendations.weights.mood = parse_f64("SCENTWISE_WEIGHTS_MOOD", &value)?;
        }
        if let Some(value) = read_env("SCENTWISE_WEIGHTS_SEASON") {
            self.recommendations.weights.season = parse_f64("SCENTWISE_WEIGHTS_SEASON", &value)?;
        }

        if let Some(value) = read_env("SCENTWISE_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }

        let log_level =
            read_env("SCENTWISE_LOGGING_LEVEL").or_else(|| read_env("SCENTWISE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("SCENTWISE_LOGGING_FORMAT").or_else(|| read_env("SCENTWISE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(default_limit) = overrides.default_limit {
            self.recommendations.default_limit = default_limit;
        }
        if let Some(min_match_score) = overrides.min_match_score {
            self.recommendations.min_match_score = min_match_score;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_recommendations(&self.recommendations)?;
        validate_catalog(&self.catalog)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("scentwise.toml"), PathBuf::from("config/scentwise.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_recommendations(recommendations: &RecommendationConfig) -> Result<(), ConfigError> {
    if recommendations.max_limit == 0 || recommendations.max_limit > 100 {
        return Err(ConfigError::Validation(
            "recommendations.max_limit must be in range 1..=100".to_string(),
        ));
    }

    if recommendations.default_limit == 0
        || recommendations.default_limit > recommendations.max_limit
    {
        return Err(ConfigError::Validation(format!(
            "recommendations.default_limit must be in range 1..={} (recommendations.max_limit)",
            recommendations.max_limit
        )));
    }

    if recommendations.min_match_score > 100 {
        return Err(ConfigError::Validation(
            "recommendations.min_match_score must be in range 0..=100".to_string(),
        ));
    }

    recommendations.weights.validate().map_err(|error| {
        ConfigError::Validation(format!("recommendations.weights are invalid: {error}"))
    })
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if let Some(path) = &catalog.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.path must not be empty; unset it to use the demo catalog".to_string(),
            ));
        }
        let is_json = path.extension().map(|ext| ext.eq_ignore_ascii_case("json")).unwrap_or(false);
        if !is_json {
            return Err(ConfigError::Validation(format!(
                "catalog.path must point to a .json file (got `{}`)",
                path.display()
            )));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u8(key: &str, value: &str) -> Result<u8, ConfigError> {
    value.trim().parse::<u8>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    recommendations: Option<RecommendationsPatch>,
    catalog: Option<CatalogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationsPatch {
    default_limit: Option<usize>,
    max_limit: Option<usize>,
    min_match_score: Option<u8>,
    weights: Option<WeightsPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct WeightsPatch {
    notes: Option<f64>,
    intensity: Option<f64>,
    mood: Option<f64>,
    season: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
