//! Layered CLI settings: defaults, then `warden.toml`, then `WARDEN_*`
//! environment variables, then command-line flags.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Report format on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    /// Plain text lines.
    #[default]
    Human,
    /// One JSON document.
    Json,
}

/// Effective settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Report format.
    pub output: Output,
    /// Treat warnings as failures in `check`.
    pub deny_warnings: bool,
    /// Logging setup.
    pub log: warden_log::Config,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: Output::Human,
            deny_warnings: false,
            log: warden_log::Config::from_env(),
        }
    }
}

/// Values given on the command line; unset flags leave lower layers alone.
#[derive(Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny_warnings: Option<bool>,
    pub log: LogOverrides,
}

#[derive(Debug, Default, Serialize)]
pub struct LogOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<warden_log::Format>,
}

impl Settings {
    /// Loads all layers. A missing config file is not an error.
    pub fn load(config_file: &Path, overrides: &Overrides) -> Result<Self> {
        Self::figment(config_file, overrides)
            .extract()
            .with_context(|| format!("invalid settings (config file '{}')", config_file.display()))
    }

    fn figment(config_file: &Path, overrides: &Overrides) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file))
            .merge(
                Env::prefixed("WARDEN_")
                    .ignore(&["log", "log_format"])
                    .split("__"),
            )
            .merge(Serialized::defaults(overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn layers_apply_in_order() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "warden.toml",
                r#"
                output = "json"
                deny_warnings = true

                [log]
                level = "info"
                "#,
            )?;
            jail.set_env("WARDEN_LOG__LEVEL", "debug");

            let settings = Settings::load(Path::new("warden.toml"), &Overrides::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(settings.output, Output::Json);
            assert!(settings.deny_warnings);
            assert_eq!(settings.log.level, "debug");

            let overrides = Overrides {
                output: Some(Output::Human),
                log: LogOverrides {
                    level: Some("trace".to_owned()),
                    format: None,
                },
                ..Overrides::default()
            };
            let settings = Settings::load(Path::new("warden.toml"), &overrides)
                .map_err(|e| e.to_string())?;
            assert_eq!(settings.output, Output::Human);
            assert_eq!(settings.log.level, "trace");
            assert!(settings.deny_warnings);
            Ok(())
        });
    }

    #[test]
    fn missing_file_uses_defaults() {
        Jail::expect_with(|_| {
            let settings = Settings::load(Path::new("absent.toml"), &Overrides::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(settings.output, Output::Human);
            assert!(!settings.deny_warnings);
            Ok(())
        });
    }

    #[test]
    fn bad_values_are_reported() {
        Jail::expect_with(|jail| {
            jail.create_file("warden.toml", r#"output = "xml""#)?;
            assert!(Settings::load(Path::new("warden.toml"), &Overrides::default()).is_err());
            Ok(())
        });
    }
}
