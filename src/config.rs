use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
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

/// Rendering of configured mappings on stdout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Debug, Error)]
#[error("unknown output format `{0}` (expected `yaml` or `json`)")]
pub struct UnknownOutputFormat(String);

impl FromStr for OutputFormat {
    type Err = UnknownOutputFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(UnknownOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Application configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct AppConfig {
    /// Format used to print configured mappings
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Whether a merge may replace a function declaration that is already
    /// present instead of requiring the two to be compatible
    #[serde(default)]
    pub allow_override: bool,

    /// Default `env_logger` filter when `RUST_LOG` is not set
    #[validate(length(min = 1, message = "Log filter cannot be empty"))]
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Yaml,
            allow_override: false,
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            output_format: parse_env_var("PROCMAP_OUTPUT_FORMAT", "yaml")?,
            allow_override: parse_env_var("PROCMAP_ALLOW_OVERRIDE", "false")?,
            log_filter: match env::var("PROCMAP_LOG") {
                Ok(filter) => filter,
                Err(env::VarError::NotPresent) => default_log_filter(),
                Err(e) => return Err(e.into()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let config = Self {
            output_format: cli.output_format,
            allow_override: cli.allow_override,
            log_filter: cli.log_filter,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "app_config".to_string(),
            value: path.display().to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "app_config".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Merge with another configuration (CLI overrides environment)
    pub fn merge(&mut self, other: Self) {
        self.output_format = other.output_format;
        self.allow_override = other.allow_override;
        self.log_filter = other.log_filter;
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub output_format: OutputFormat,
    pub allow_override: bool,
    pub log_filter: String,
}

impl CliConfig {
    /// Layer command line flags over a base configuration. Flags that were
    /// not given keep the base value; `--allow-override` can only switch
    /// overriding on.
    pub fn layered(
        base: &AppConfig,
        output_format: Option<OutputFormat>,
        allow_override: bool,
        log_filter: Option<String>,
    ) -> Self {
        Self {
            output_format: output_format.unwrap_or(base.output_format),
            allow_override: allow_override || base.allow_override,
            log_filter: log_filter.unwrap_or_else(|| base.log_filter.clone()),
        }
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
