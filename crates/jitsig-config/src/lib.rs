//! Configuration for the signature resolver and the binaries that embed it.
//!
//! ```toml
//! [resolver]
//! assignable_fallback = true
//! comment_member_prefixes = ["Method ", "InterfaceMethod "]
//!
//! [logging]
//! level = "jitsig::sig_match=trace,info"
//! json = false
//! ```

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Tracing target for per-parameter signature matching decisions.
pub const SIG_MATCH_TARGET: &str = "jitsig::sig_match";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // Keep the message and drop the source snippet `Display` would add.
        ConfigError::Toml(err.message().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JitsigConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl JitsigConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Retry member lookups with assignability when no member matches with
    /// exact parameter types.
    #[serde(default = "ResolverConfig::default_assignable_fallback")]
    pub assignable_fallback: bool,

    /// Prefixes stripped from disassembler comments before they are parsed as
    /// member references (`// Method java/lang/String.length:()I`).
    #[serde(default = "ResolverConfig::default_comment_member_prefixes")]
    pub comment_member_prefixes: Vec<String>,
}

impl ResolverConfig {
    fn default_assignable_fallback() -> bool {
        true
    }

    fn default_comment_member_prefixes() -> Vec<String> {
        vec!["Method ".to_string(), "InterfaceMethod ".to_string()]
    }

    /// `comment` with the first matching configured prefix removed.
    pub fn strip_comment_prefix<'a>(&self, comment: &'a str) -> &'a str {
        let comment = comment.trim();
        self.comment_member_prefixes
            .iter()
            .find_map(|prefix| comment.strip_prefix(prefix.as_str()))
            .unwrap_or(comment)
            .trim_start()
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            assignable_fallback: Self::default_assignable_fallback(),
            comment_member_prefixes: Self::default_comment_member_prefixes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Append logs to the given file in addition to stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    /// Maps a bare level (any casing, `warning` included) to its `EnvFilter`
    /// spelling. Anything else is kept as a directive string.
    pub(crate) fn level_directives(level: &str) -> String {
        let level = level.trim();
        let canonical = match level.to_ascii_lowercase().as_str() {
            "" => return Self::default_level(),
            "warning" => "warn",
            simple @ ("trace" | "debug" | "info" | "warn" | "error") => {
                return simple.to_owned()
            }
            _ => level,
        };
        canonical.to_owned()
    }

    /// The effective filter: the configured level, with `RUST_LOG` directives
    /// appended when set. Unparsable directives fall back to `RUST_LOG` alone,
    /// then to the configured level, then to `info`.
    pub fn env_filter(&self) -> EnvFilter {
        let configured = Self::level_directives(&self.level);
        let from_env = std::env::var(EnvFilter::DEFAULT_ENV)
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let attempts = match from_env {
            Some(env) => vec![format!("{configured},{env}"), env, configured],
            None => vec![configured],
        };
        attempts
            .into_iter()
            .find_map(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            file: None,
        }
    }
}

static TRACING_INIT: Once = Once::new();

#[derive(Clone)]
struct SharedFile(Arc<Mutex<File>>);

impl Write for SharedFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.0.lock() {
            Ok(mut file) => file.write(buf),
            Err(poisoned) => poisoned.into_inner().write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.0.lock() {
            Ok(mut file) => file.flush(),
            Err(poisoned) => poisoned.into_inner().flush(),
        }
    }
}

/// Installs the global tracing subscriber. Only the first call has an effect.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let file = config.file.as_ref().and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
        let file_open_failed = config.file.is_some() && file.is_none();

        let mut make_writer = BoxMakeWriter::new(std::io::stderr);
        if let Some(file) = file {
            let file = SharedFile(Arc::new(Mutex::new(file)));
            make_writer = BoxMakeWriter::new(make_writer.and(move || file.clone()));
        }

        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() && file_open_failed {
            if let Some(path) = config.file.as_ref() {
                tracing::warn!(
                    target: "jitsig.config",
                    path = %path.display(),
                    "failed to open log file; logging to stderr only"
                );
            }
        }
    });
}
