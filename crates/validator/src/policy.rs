//! Failure policies
//!
//! A failure policy turns an annotation's `{error type, message}` pair into
//! the single exception factory the primitives take. Precedence is fixed:
//! a custom error type beats a custom message, which beats the default.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::error::{ContractError, CustomError, Violation, ViolationKind};

// ============================================================================
// ERROR CONSTRUCTOR
// ============================================================================

type ConstructFn = dyn Fn(String) -> Box<dyn StdError + Send + Sync> + Send + Sync;

/// A named constructor for a user-defined error type taking a single message.
///
/// # Examples
///
/// ```rust,ignore
/// use warden_validator::policy::ErrorConstructor;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct ConfigError(String);
///
/// let ctor = ErrorConstructor::of::<ConfigError>("ConfigError", ConfigError);
/// ```
#[derive(Clone)]
pub struct ErrorConstructor {
    type_name: Cow<'static, str>,
    construct: Arc<ConstructFn>,
}

impl ErrorConstructor {
    /// Creates a constructor from a boxed-error factory.
    pub fn new<F>(type_name: impl Into<Cow<'static, str>>, construct: F) -> Self
    where
        F: Fn(String) -> Box<dyn StdError + Send + Sync> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            construct: Arc::new(construct),
        }
    }

    /// Creates a constructor for a concrete error type.
    pub fn of<E>(
        type_name: impl Into<Cow<'static, str>>,
        construct: impl Fn(String) -> E + Send + Sync + 'static,
    ) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(type_name, move |message| -> Box<dyn StdError + Send + Sync> {
            Box::new(construct(message))
        })
    }

    /// Name of the constructed error type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Builds the error with the given message.
    #[must_use]
    pub fn construct(&self, message: String) -> CustomError {
        CustomError::new(self.type_name.clone(), (self.construct)(message))
    }
}

impl fmt::Debug for ErrorConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorConstructor")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// FAILURE POLICY
// ============================================================================

/// How a failed check is reported.
#[derive(Debug, Clone, Default)]
pub enum FailurePolicy {
    /// The primitive's own error kind and default text.
    #[default]
    Default,

    /// The primitive's own error kind with a custom text.
    Message(Cow<'static, str>),

    /// A user-defined error type, built with the custom text if set, else
    /// the primitive's default text.
    Custom {
        /// Resolved constructor.
        constructor: ErrorConstructor,
        /// Optional message overriding the default text.
        message: Option<Cow<'static, str>>,
    },
}

impl FailurePolicy {
    /// Resolves a configured `{error type, message}` pair.
    pub fn resolve(
        constructor: Option<ErrorConstructor>,
        message: Option<Cow<'static, str>>,
    ) -> Self {
        match (constructor, message) {
            (Some(constructor), message) => Self::Custom {
                constructor,
                message,
            },
            (None, Some(message)) => Self::Message(message),
            (None, None) => Self::Default,
        }
    }

    /// Builds the exception factory a primitive calls on failure.
    ///
    /// The factory receives the primitive's default message.
    pub fn factory<'a>(
        &'a self,
        default_kind: ViolationKind,
        parameter: &'a str,
    ) -> impl FnOnce(String) -> ContractError + 'a {
        move |default_message| match self {
            Self::Default => default_violation(default_kind, parameter, default_message),
            Self::Message(message) => default_violation(default_kind, parameter, message.clone()),
            Self::Custom {
                constructor,
                message,
            } => {
                let text = message
                    .as_ref()
                    .map_or(default_message, |m| m.clone().into_owned());
                ContractError::Custom(constructor.construct(text))
            }
        }
    }
}

/// Builds a built-in violation for `parameter`.
pub fn default_violation(
    kind: ViolationKind,
    parameter: &str,
    message: impl Into<Cow<'static, str>>,
) -> ContractError {
    Violation::new(kind, message)
        .with_parameter(parameter.to_owned())
        .into()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct ConfigError(String);

    fn config_error() -> ErrorConstructor {
        ErrorConstructor::of("ConfigError", ConfigError)
    }

    #[test]
    fn default_policy_uses_default_kind_and_text() {
        let policy = FailurePolicy::default();
        let err = policy.factory(ViolationKind::Argument, "name")("default text".into());

        let violation = err.as_violation().unwrap();
        assert_eq!(violation.kind, ViolationKind::Argument);
        assert_eq!(violation.message, "default text");
        assert_eq!(violation.parameter.as_deref(), Some("name"));
    }

    #[test]
    fn message_policy_replaces_text() {
        let policy = FailurePolicy::Message("cannot be blank".into());
        let err = policy.factory(ViolationKind::Argument, "name")("default text".into());
        assert_eq!(err.as_violation().unwrap().message, "cannot be blank");
    }

    #[test]
    fn custom_type_wins_over_message() {
        let policy = FailurePolicy::resolve(Some(config_error()), Some("custom".into()));
        let err = policy.factory(ViolationKind::ArgumentNull, "name")("default text".into());

        assert_eq!(err.kind(), ErrorKind::Custom);
        let custom = err.as_custom().unwrap();
        assert_eq!(custom.type_name(), "ConfigError");
        assert_eq!(custom.downcast_ref::<ConfigError>().unwrap().0, "custom");
    }

    #[test]
    fn custom_type_without_message_uses_default_text() {
        let policy = FailurePolicy::resolve(Some(config_error()), None);
        let err = policy.factory(ViolationKind::ArgumentNull, "name")("default text".into());
        assert_eq!(
            err.as_custom().unwrap().downcast_ref::<ConfigError>().unwrap().0,
            "default text"
        );
    }

    #[test]
    fn resolve_precedence() {
        assert!(matches!(FailurePolicy::resolve(None, None), FailurePolicy::Default));
        assert!(matches!(
            FailurePolicy::resolve(None, Some("m".into())),
            FailurePolicy::Message(_)
        ));
        assert!(matches!(
            FailurePolicy::resolve(Some(config_error()), Some("m".into())),
            FailurePolicy::Custom { .. }
        ));
    }
}
