//! Subscriber installation

use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Builds the subscriber for one fmt layer, dropping timestamps when
/// `time` is off.
macro_rules! try_init_layer {
    ($filter:expr, $layer:expr, $time:expr) => {{
        let layer = $layer;
        if $time {
            Registry::default().with($filter).with(layer).try_init()
        } else {
            Registry::default()
                .with($filter)
                .with(layer.without_time())
                .try_init()
        }
    }};
}

/// Installs the global subscriber. Events go to stderr.
///
/// Fails when the level directive does not parse or a subscriber is
/// already installed.
pub fn init(config: &Config) -> LogResult<()> {
    let filter = filter(&config.level)?;
    let display = &config.display;
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(display.colors)
        .with_target(display.target)
        .with_file(display.source)
        .with_line_number(display.source);

    let result = match config.format {
        Format::Compact => try_init_layer!(filter, base.compact(), display.time),
        Format::Pretty => try_init_layer!(filter, base.pretty(), display.time),
        Format::Json => try_init_layer!(filter, base.json(), display.time),
    };
    result.map_err(|e| LogError::Init(e.to_string()))?;

    tracing::debug!(level = %config.level, format = %config.format, "logging initialized");
    Ok(())
}

fn filter(directive: &str) -> LogResult<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| LogError::Filter {
        directive: directive.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_directive() {
        let err = filter("warden=loud").unwrap_err();
        assert!(matches!(err, LogError::Filter { .. }));
    }

    #[test]
    fn accepts_module_directives() {
        assert!(filter("warden_weave=debug,warn").is_ok());
    }

    #[test]
    fn second_init_fails() {
        let config = Config::default().with_level("off");
        let _ = init(&config);
        assert!(matches!(init(&config), Err(LogError::Init(_))));
    }
}
