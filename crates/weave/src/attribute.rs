//! Annotations attached to declarations
//!
//! In a manifest an annotation is a tagged table:
//!
//! ```toml
//! attributes = [
//!     { kind = "interval", min = 2, max = 5, max_mode = "exclusive" },
//!     { kind = "not_null", error_type = "ConfigError", message = "required" },
//!     { kind = "other", name = "Obsolete" },
//! ]
//! ```

use std::sync::Arc;

use serde::Deserialize;
use warden_validator::primitives::{BoundaryMode, PatternOptions};
use warden_validator::value::Value;

use crate::metadata::TypeRef;
use crate::validator::{
    FailureConfig, IntervalRule, PatternRule, Rule, ValidatorAnnotation, ValidatorCapability,
};

/// An annotation on a parameter, property or method.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "AttributeConfig")]
pub enum Attribute {
    /// A validator; the advisor weaves these.
    Validator(Arc<dyn ValidatorCapability>),
    /// Any other annotation; ignored by the advisor.
    Other {
        /// Annotation name.
        name: String,
    },
}

impl Attribute {
    /// Wraps a validator.
    pub fn validator(validator: impl ValidatorCapability + 'static) -> Self {
        Self::Validator(Arc::new(validator))
    }

    /// A non-validator annotation.
    pub fn other(name: impl Into<String>) -> Self {
        Self::Other { name: name.into() }
    }

    /// The validator, if this annotation is one.
    #[must_use]
    pub fn as_validator(&self) -> Option<&Arc<dyn ValidatorCapability>> {
        match self {
            Self::Validator(validator) => Some(validator),
            Self::Other { .. } => None,
        }
    }
}

impl From<ValidatorAnnotation> for Attribute {
    fn from(annotation: ValidatorAnnotation) -> Self {
        Self::validator(annotation)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum AttributeConfig {
    NotNull {
        #[serde(default)]
        error_type: Option<TypeRef>,
        #[serde(default)]
        message: Option<String>,
    },
    NotEmpty {
        #[serde(default)]
        error_type: Option<TypeRef>,
        #[serde(default)]
        message: Option<String>,
    },
    Interval {
        #[serde(default)]
        min: Value,
        #[serde(default)]
        min_mode: BoundaryMode,
        #[serde(default)]
        max: Value,
        #[serde(default)]
        max_mode: BoundaryMode,
        #[serde(default)]
        error_type: Option<TypeRef>,
        #[serde(default)]
        message: Option<String>,
    },
    Pattern {
        #[serde(default)]
        pattern: String,
        #[serde(default)]
        options: PatternOptions,
        #[serde(default)]
        error_type: Option<TypeRef>,
        #[serde(default)]
        message: Option<String>,
    },
    Other {
        name: String,
    },
}

impl From<AttributeConfig> for Attribute {
    fn from(config: AttributeConfig) -> Self {
        let (rule, error_type, message) = match config {
            AttributeConfig::Other { name } => return Self::Other { name },
            AttributeConfig::NotNull {
                error_type,
                message,
            } => (Rule::NotNull, error_type, message),
            AttributeConfig::NotEmpty {
                error_type,
                message,
            } => (Rule::NotEmpty, error_type, message),
            AttributeConfig::Interval {
                min,
                min_mode,
                max,
                max_mode,
                error_type,
                message,
            } => (
                Rule::Interval(IntervalRule {
                    min,
                    min_mode,
                    max,
                    max_mode,
                }),
                error_type,
                message,
            ),
            AttributeConfig::Pattern {
                pattern,
                options,
                error_type,
                message,
            } => (
                Rule::Pattern(PatternRule { pattern, options }),
                error_type,
                message,
            ),
        };
        Self::from(ValidatorAnnotation::with_failure(
            rule,
            FailureConfig {
                error_type,
                message,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::ValidatorCapability as _;

    fn parse(json: &str) -> Attribute {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_interval_with_modes() {
        let attribute = parse(r#"{"kind": "interval", "min": 2, "max": 5, "max_mode": "exclusive"}"#);
        let validator = attribute.as_validator().unwrap();
        assert_eq!(validator.describe(), "Interval([2, 5[)");
    }

    #[test]
    fn parses_failure_configuration() {
        let attribute = parse(r#"{"kind": "not_null", "error_type": "ConfigError", "message": "required"}"#);
        let validator = attribute.as_validator().unwrap();
        assert_eq!(validator.name(), "NotNull");
    }

    #[test]
    fn parses_pattern_options() {
        let attribute = parse(
            r#"{"kind": "pattern", "pattern": "^a", "options": {"case_insensitive": true}}"#,
        );
        let validator = attribute.as_validator().unwrap();
        assert!(validator.validate(None, &Value::from("ABC"), "p").is_ok());
    }

    #[test]
    fn other_attributes_are_not_validators() {
        let attribute = parse(r#"{"kind": "other", "name": "Obsolete"}"#);
        assert!(attribute.as_validator().is_none());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(serde_json::from_str::<Attribute>(r#"{"kind": "range"}"#).is_err());
        assert!(serde_json::from_str::<Attribute>(r#"{"kind": "not_null", "extra": 1}"#).is_err());
    }
}
