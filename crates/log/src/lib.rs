//! # warden-log
//!
//! Subscriber setup shared by the Warden binaries. Library crates only emit
//! `tracing` events; binaries call [`init`] once with a [`Config`].
//!
//! ```rust,ignore
//! let config = warden_log::Config::from_env();
//! warden_log::init(&config)?;
//! tracing::info!("ready");
//! ```

mod builder;
mod config;
mod error;

pub use builder::init;
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, LogResult};
