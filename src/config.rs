use serde::{Deserialize, Serialize};
use std::{env, fmt, str::FromStr};
use thiserror::Error;
use validator::Validate;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// How hint names are compared against the strategy alias literals.
///
/// The alias literals are all uppercase. `Uppercase` folds the incoming name
/// with ASCII uppercasing first, so `/*+ broadcast(t) */` and
/// `/*+ BROADCAST(t) */` are the same hint. `Exact` requires the literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintNameMatching {
    #[default]
    Uppercase,
    Exact,
}

#[derive(Debug, Error)]
#[error("unknown hint name matching mode `{0}` (expected `uppercase` or `exact`)")]
pub struct ParseHintNameMatchingError(String);

impl FromStr for HintNameMatching {
    type Err = ParseHintNameMatchingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uppercase" => Ok(HintNameMatching::Uppercase),
            "exact" => Ok(HintNameMatching::Exact),
            _ => Err(ParseHintNameMatchingError(s.to_string())),
        }
    }
}

impl fmt::Display for HintNameMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintNameMatching::Uppercase => f.write_str("uppercase"),
            HintNameMatching::Exact => f.write_str("exact"),
        }
    }
}

/// Hint planning configuration with validation
#[derive(Clone, Debug, PartialEq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct HintConfig {
    /// When false, every hint wrapper is removed during analysis without diagnostics
    pub enabled: bool,

    /// Normalization applied to hint names before catalog lookup
    pub name_matching: HintNameMatching,

    /// Whether relation names given as hint parameters match case-sensitively
    pub case_sensitive_relations: bool,

    /// Default `env_logger` filter, overridden by `RUST_LOG`
    #[validate(length(min = 1, message = "Log filter cannot be empty"))]
    pub log_filter: String,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name_matching: HintNameMatching::Uppercase,
            case_sensitive_relations: false,
            log_filter: "info".to_string(),
        }
    }
}

impl HintConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            enabled: parse_env_var("JOINHINT_ENABLED", "true")?,
            name_matching: parse_env_var("JOINHINT_NAME_MATCHING", "uppercase")?,
            case_sensitive_relations: parse_env_var("JOINHINT_CASE_SENSITIVE_RELATIONS", "false")?,
            log_filter: env_var_or("JOINHINT_LOG_FILTER", "info")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// Initialize `env_logger` with the configured default filter.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(config: &HintConfig) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .try_init();
}

/// Read an environment variable, falling back to `default` only when it is unset.
/// A value that is not valid unicode is an error.
fn env_var_or(key: &str, default: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(e.into()),
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env_var_or(key, default)?;
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
