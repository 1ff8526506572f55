//! Logging errors

/// Logging setup failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// The level directive could not be parsed.
    #[error("invalid log filter '{directive}': {reason}")]
    Filter {
        /// Offending directive.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("failed to install subscriber: {0}")]
    Init(String),

    /// An unknown format name.
    #[error("unknown log format '{0}', expected compact, pretty or json")]
    UnknownFormat(String),
}

/// Result alias for logging setup.
pub type LogResult<T> = Result<T, LogError>;
