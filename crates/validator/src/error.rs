//! Error types for contract checks
//!
//! Two disjoint universes live here:
//!
//! - [`Violation`] / [`CustomError`]: a checked value broke its rule. Built
//!   fresh per failure by the exception factory the failure policy resolved.
//! - [`ConfigurationError`]: the rule itself is misconfigured (absent bound,
//!   empty pattern, ...). Raised before the value is even looked at.
//!
//! [`ContractError`] is the single type every check returns.
//!
//! String fields use `Cow<'static, str>` so static codes never allocate.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

// ============================================================================
// VIOLATION
// ============================================================================

/// Built-in error kinds a primitive falls back to when no custom error type
/// is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required value was absent.
    ArgumentNull,
    /// A value fell outside its allowed interval.
    ArgumentOutOfRange,
    /// A value was present but otherwise unacceptable (empty, bad format).
    Argument,
}

impl ViolationKind {
    /// Stable machine-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArgumentNull => "argument_null",
            Self::ArgumentOutOfRange => "argument_out_of_range",
            Self::Argument => "argument",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A runtime contract violation of one of the built-in kinds.
///
/// # Examples
///
/// ```rust,ignore
/// use warden_validator::error::{Violation, ViolationKind};
///
/// let violation = Violation::new(ViolationKind::ArgumentOutOfRange, "out of range")
///     .with_parameter("count")
///     .with_param("min", "2")
///     .with_param("max", "5");
///
/// assert_eq!(violation.param("min"), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Which built-in kind was raised.
    pub kind: ViolationKind,

    /// Human-readable message, either the primitive's default text or the
    /// custom message configured on the annotation.
    pub message: Cow<'static, str>,

    /// Name of the checked parameter, when known.
    pub parameter: Option<Cow<'static, str>>,

    /// Ordered key-value pairs describing the rule (typically 0-3 params).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl Violation {
    /// Creates a violation with a kind and message.
    pub fn new(kind: ViolationKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            parameter: None,
            params: Vec::new(),
        }
    }

    /// Sets the parameter name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_parameter(mut self, parameter: impl Into<Cow<'static, str>>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    /// Adds a parameter to the violation.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(parameter) = &self.parameter {
            write!(f, " (parameter '{parameter}')")?;
        }
        Ok(())
    }
}

impl StdError for Violation {}

// ============================================================================
// CUSTOM ERROR
// ============================================================================

/// An error produced by a user-configured error constructor.
///
/// Keeps the constructor's type name so callers can tell which configured
/// error type fired without downcasting.
#[derive(Debug)]
pub struct CustomError {
    type_name: Cow<'static, str>,
    inner: Box<dyn StdError + Send + Sync>,
}

impl CustomError {
    /// Wraps an error built by a custom constructor.
    pub fn new(
        type_name: impl Into<Cow<'static, str>>,
        inner: Box<dyn StdError + Send + Sync>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            inner,
        }
    }

    /// Name of the configured error type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The constructed error.
    #[must_use]
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    /// Attempts to downcast the constructed error to a concrete type.
    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.inner)
    }
}

impl StdError for CustomError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_ref())
    }
}

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// The rule is misconfigured; a programming error in the annotation itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// An interval bound is absent.
    #[error("interval bound '{bound}' is absent")]
    MissingBound {
        /// `"min"` or `"max"`.
        bound: &'static str,
    },

    /// The value cannot be ordered against the configured bounds.
    #[error("value of kind '{value}' cannot be compared with bound of kind '{bound}'")]
    IncomparableBounds {
        /// Runtime kind of the checked value.
        value: Cow<'static, str>,
        /// Runtime kind of the offending bound.
        bound: Cow<'static, str>,
    },

    /// No pattern was configured, or it is empty.
    #[error("pattern is absent or empty")]
    EmptyPattern,

    /// The pattern source does not compile.
    #[error("pattern does not compile: {0}")]
    InvalidPattern(String),

    /// The runtime value does not have the shape the rule was prepared for.
    #[error("expected a value of kind '{expected}', found '{found}'")]
    ValueMismatch {
        /// Shape the rule was bound to.
        expected: Cow<'static, str>,
        /// Shape actually received.
        found: Cow<'static, str>,
    },

    /// A typed collection carried another element type than the one the
    /// specialized check was bound to.
    #[error("collection element type '{found}' does not match bound element type '{expected}'")]
    ElementTypeMismatch {
        /// Element type resolved at weave time.
        expected: String,
        /// Element type carried by the runtime value.
        found: String,
    },

    /// A custom error type is configured but was never resolved to a
    /// constructor.
    #[error("custom error type '{type_name}' has not been resolved")]
    UnresolvedErrorType {
        /// Configured type name.
        type_name: String,
    },
}

impl From<regex::Error> for ConfigurationError {
    fn from(error: regex::Error) -> Self {
        Self::InvalidPattern(error.to_string())
    }
}

// ============================================================================
// CONTRACT ERROR
// ============================================================================

/// Error returned by every contract check.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// A value broke its rule; built-in error kind.
    #[error(transparent)]
    Violation(#[from] Violation),

    /// A value broke its rule; user-configured error type.
    #[error(transparent)]
    Custom(#[from] CustomError),

    /// The rule itself is misconfigured.
    #[error("invalid contract configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Coarse classification of a [`ContractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Built-in violation of the given kind.
    Violation(ViolationKind),
    /// Custom error type.
    Custom,
    /// Invalid configuration.
    Configuration,
}

impl ContractError {
    /// True when a checked value broke its rule.
    #[must_use]
    pub fn is_violation(&self) -> bool {
        !self.is_configuration()
    }

    /// True when the rule itself is misconfigured.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Coarse classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Violation(v) => ErrorKind::Violation(v.kind),
            Self::Custom(_) => ErrorKind::Custom,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// Parameter named by a built-in violation.
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::Violation(v) => v.parameter.as_deref(),
            _ => None,
        }
    }

    /// The built-in violation, if that is what this is.
    #[must_use]
    pub fn as_violation(&self) -> Option<&Violation> {
        match self {
            Self::Violation(v) => Some(v),
            _ => None,
        }
    }

    /// The custom error, if that is what this is.
    #[must_use]
    pub fn as_custom(&self) -> Option<&CustomError> {
        match self {
            Self::Custom(c) => Some(c),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
