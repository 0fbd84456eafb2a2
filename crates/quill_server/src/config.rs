//! Server configuration.
//!
//! Sources, later ones overriding earlier:
//! - Bundled defaults (include_str! from quill.toml)
//! - User override (./quill.toml, or the file given with `--config`)
//! - Environment variables prefixed `QUILL_`, nested with `__`
//!   (e.g. `QUILL_SCRIPT__MIN_WORDS=150`)
//!
//! The provider API key is never read from files; it comes from `GROQ_API_KEY`.

use config::{Config, Environment, File, FileFormat};
use quill_core::WordRange;
use quill_error::{ConfigError, QuillResult};
use quill_script::SessionIdStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

const DEFAULT_CONFIG: &str = include_str!("../quill.toml");

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Single browser origin allowed by CORS
    pub allowed_origin: String,
}

impl ServerConfig {
    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Completion provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Chat-completions endpoint
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Generation and refinement settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScriptConfig {
    /// Example corpus file, scripts separated by `---`
    pub corpus_path: PathBuf,
    /// Examples sampled into each generation prompt
    pub few_shot_examples: usize,
    /// Smallest accepted word count
    pub min_words: usize,
    /// Largest accepted word count
    pub max_words: usize,
    /// Refinement rounds per request
    pub refine_attempts: usize,
    /// Session id derivation
    pub session_ids: SessionIdStrategy,
}

impl ScriptConfig {
    /// Target word range.
    pub fn word_range(&self) -> WordRange {
        WordRange::new(self.min_words, self.max_words)
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "quill_script=debug")
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

/// Complete service configuration.
///
/// # Example
///
/// ```no_run
/// use quill_server::QuillConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = QuillConfig::load(None)?;
/// println!("Listening on {}", config.server.bind_addr());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuillConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Completion provider
    pub provider: ProviderConfig,
    /// Generation loop
    pub script: ScriptConfig,
    /// Logging
    pub logging: LoggingConfig,
}

impl QuillConfig {
    /// Load configuration from bundled defaults, an optional user file and
    /// the environment.
    ///
    /// With `path` set the file must exist; otherwise `./quill.toml` is used
    /// when present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a source cannot be read or the merged
    /// values do not deserialize or validate.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> QuillResult<Self> {
        debug!("Loading configuration with precedence: env > user file > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("quill").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("QUILL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the bundled file is malformed.
    pub fn defaults() -> QuillResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    fn validate(&self) -> QuillResult<()> {
        if self.script.min_words > self.script.max_words {
            return Err(ConfigError::new(format!(
                "script.min_words ({}) exceeds script.max_words ({})",
                self.script.min_words, self.script.max_words
            ))
            .into());
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::new("provider.timeout_secs must be positive").into());
        }
        Ok(())
    }
}

/// Read the provider API key from the environment.
///
/// # Errors
///
/// Returns a configuration error if the variable is unset or empty.
pub fn api_key_from_env() -> QuillResult<String> {
    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        Ok(_) => Err(ConfigError::new(format!("{} is empty", API_KEY_VAR)).into()),
        Err(e) => Err(ConfigError::new(format!("{} not set: {}", API_KEY_VAR, e)).into()),
    }
}
