//! Configuration presets

use super::{Config, DisplayConfig, Format};

impl Config {
    /// Configuration from `WARDEN_LOG` (or `RUST_LOG`) and
    /// `WARDEN_LOG_FORMAT`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`Config::from_env`] over an arbitrary variable source.
    ///
    /// An unrecognized format keeps the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("WARDEN_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("WARDEN_LOG_FORMAT") {
            config.format = format.parse().unwrap_or_default();
        }

        config
    }

    /// Pretty, colored, debug level.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_owned(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
        }
    }

    /// JSON, info level, no colors.
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                ..DisplayConfig::default()
            },
        }
    }

    /// Replaces the level directive.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Replaces the format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}
