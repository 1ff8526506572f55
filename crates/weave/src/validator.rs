//! Validator capability and the built-in annotations
//!
//! A [`ValidatorCapability`] has two phases. At weave time it inspects the
//! declaration it is attached to and reports problems to a sink; at call
//! time it checks one value. [`ValidatorAnnotation`] implements both phases
//! for the four built-in rules, caching whatever the first phase resolves
//! (failure policy, compiled pattern, specialized collection check) in
//! write-once cells so the second phase can run from any thread.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use warden_validator::error::{ConfigurationError, ContractError};
use warden_validator::policy::FailurePolicy;
use warden_validator::primitives::{
    self, BoundaryMode, Bounds, PatternOptions, interval, not_empty, not_null, pattern,
};
use warden_validator::value::Value;

use crate::diagnostic::{Message, MessageSink, codes};
use crate::metadata::{Capability, DeclarationModel, DeclarationSite, TypeRef};
use crate::specialize::{SpecializedCheck, element_type_of};

// ============================================================================
// CAPABILITY
// ============================================================================

/// A validation rule that can be attached to a declaration.
///
/// Implementations are shared across threads once woven; any state
/// `compile_time_validate` resolves must be stored write-once.
pub trait ValidatorCapability: fmt::Debug + Send + Sync {
    /// Short rule name, e.g. `NotNull`.
    fn name(&self) -> &'static str;

    /// Human-readable rule description including its configuration.
    fn describe(&self) -> String {
        self.name().to_owned()
    }

    /// Checks that the rule makes sense at `site`.
    ///
    /// Problems are written to `sink`; an error-severity message excludes
    /// the declaration from weaving. The site's declared type may be unknown
    /// to `model`; the advisor reports that itself.
    fn compile_time_validate(
        &self,
        site: &DeclarationSite,
        model: &dyn DeclarationModel,
        sink: &mut dyn MessageSink,
    );

    /// Checks one value.
    ///
    /// `target` is the instance the intercepted call runs on, absent for
    /// static calls. `parameter` names the value in failure messages.
    fn validate(
        &self,
        target: Option<&Value>,
        value: &Value,
        parameter: &str,
    ) -> Result<(), ContractError>;
}

// ============================================================================
// RULES
// ============================================================================

/// Bounds of an interval rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalRule {
    /// Lower bound; `null` is an absent bound.
    #[serde(default)]
    pub min: Value,
    /// Whether `min` belongs to the interval.
    #[serde(default)]
    pub min_mode: BoundaryMode,
    /// Upper bound; `null` is an absent bound.
    #[serde(default)]
    pub max: Value,
    /// Whether `max` belongs to the interval.
    #[serde(default)]
    pub max_mode: BoundaryMode,
}

impl IntervalRule {
    /// `[min, max]`.
    pub fn inclusive(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            ..Self::default()
        }
    }

    /// Sets both boundary modes.
    pub fn with_modes(mut self, min_mode: BoundaryMode, max_mode: BoundaryMode) -> Self {
        self.min_mode = min_mode;
        self.max_mode = max_mode;
        self
    }

    /// Borrowed bounds for the primitive.
    pub fn bounds(&self) -> Bounds<'_, Value> {
        Bounds::new(
            self.min.present(),
            self.min_mode,
            self.max.present(),
            self.max_mode,
        )
    }

    fn check(
        &self,
        value: &Value,
        parameter: &str,
        policy: &FailurePolicy,
    ) -> Result<(), ContractError> {
        let bounds = self.bounds();
        let (min, max) = bounds.require()?;
        if let Some(value) = value.present() {
            for bound in [min, max] {
                if !value.is_comparable_with(bound) {
                    return Err(ConfigurationError::IncomparableBounds {
                        value: Cow::Borrowed(value.kind()),
                        bound: Cow::Borrowed(bound.kind()),
                    }
                    .into());
                }
            }
        }
        primitives::interval(
            value.present(),
            &bounds,
            parameter,
            policy.factory(interval::DEFAULT_KIND, parameter),
        )
    }
}

/// Source and options of a pattern rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Regular expression source.
    pub pattern: String,
    /// Matching options.
    #[serde(default)]
    pub options: PatternOptions,
}

impl PatternRule {
    /// A pattern with default options.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            options: PatternOptions::default(),
        }
    }

    fn compile(&self) -> Result<Regex, ConfigurationError> {
        self.options.compile(&self.pattern)
    }
}

/// The built-in rules.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The value must be present.
    NotNull,
    /// Text or collection values must have at least one element.
    NotEmpty,
    /// Values must lie in an interval.
    Interval(IntervalRule),
    /// Text values must match a pattern.
    Pattern(PatternRule),
}

impl Rule {
    /// Rule name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NotNull => "NotNull",
            Self::NotEmpty => "NotEmpty",
            Self::Interval(_) => "Interval",
            Self::Pattern(_) => "Pattern",
        }
    }

    const fn source(&self) -> &'static str {
        match self {
            Self::NotNull => concat!(module_path!(), "::NotNull"),
            Self::NotEmpty => concat!(module_path!(), "::NotEmpty"),
            Self::Interval(_) => concat!(module_path!(), "::Interval"),
            Self::Pattern(_) => concat!(module_path!(), "::Pattern"),
        }
    }
}

/// How a failed check is reported: an optional custom error type and an
/// optional message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureConfig {
    /// Error type to raise instead of the built-in violation.
    #[serde(default)]
    pub error_type: Option<TypeRef>,
    /// Message replacing the default text.
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// ANNOTATION
// ============================================================================

/// A built-in rule attached to one declaration.
///
/// # Examples
///
/// ```rust,ignore
/// use warden_weave::validator::ValidatorAnnotation;
///
/// let rule = ValidatorAnnotation::interval(2, 5).with_message("out of range");
/// ```
#[derive(Debug)]
pub struct ValidatorAnnotation {
    rule: Rule,
    failure: FailureConfig,
    policy: OnceLock<FailurePolicy>,
    specialization: OnceLock<SpecializedCheck>,
    regex: OnceLock<Regex>,
}

impl ValidatorAnnotation {
    /// Annotation for `rule` with the default failure policy.
    pub fn new(rule: Rule) -> Self {
        Self::with_failure(rule, FailureConfig::default())
    }

    /// Annotation for `rule` with an explicit failure configuration.
    pub fn with_failure(rule: Rule, failure: FailureConfig) -> Self {
        Self {
            rule,
            failure,
            policy: OnceLock::new(),
            specialization: OnceLock::new(),
            regex: OnceLock::new(),
        }
    }

    /// `NotNull`.
    pub fn not_null() -> Self {
        Self::new(Rule::NotNull)
    }

    /// `NotEmpty`.
    pub fn not_empty() -> Self {
        Self::new(Rule::NotEmpty)
    }

    /// Inclusive `Interval`.
    pub fn interval(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self::new(Rule::Interval(IntervalRule::inclusive(min, max)))
    }

    /// `Pattern` with default options.
    pub fn pattern(source: impl Into<String>) -> Self {
        Self::new(Rule::Pattern(PatternRule::new(source)))
    }

    /// Replaces the default failure text.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.failure.message = Some(message.into());
        self.policy = OnceLock::new();
        self
    }

    /// Raises `error_type` on failure; resolved at weave time.
    pub fn with_error_type(mut self, error_type: impl Into<TypeRef>) -> Self {
        self.failure.error_type = Some(error_type.into());
        self.policy = OnceLock::new();
        self
    }

    /// The rule.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The failure configuration.
    #[must_use]
    pub fn failure(&self) -> &FailureConfig {
        &self.failure
    }

    /// The resolved policy, once known.
    #[must_use]
    pub fn resolved_policy(&self) -> Option<&FailurePolicy> {
        self.policy.get()
    }

    /// The specialized collection check, once built.
    #[must_use]
    pub fn specialization(&self) -> Option<&SpecializedCheck> {
        self.specialization.get()
    }

    fn message(&self) -> Option<Cow<'static, str>> {
        self.failure.message.clone().map(Cow::Owned)
    }

    /// The policy, resolving it on first use when no custom error type
    /// needs weave-time resolution.
    fn policy(&self) -> Result<&FailurePolicy, ConfigurationError> {
        if let Some(policy) = self.policy.get() {
            return Ok(policy);
        }
        match &self.failure.error_type {
            Some(ty) => Err(ConfigurationError::UnresolvedErrorType {
                type_name: ty.to_string(),
            }),
            None => Ok(self
                .policy
                .get_or_init(|| FailurePolicy::resolve(None, self.message()))),
        }
    }

    fn error(&self, sink: &mut dyn MessageSink, code: &'static str, text: String) {
        sink.write(Message::error(code, text, self.rule.source()));
    }

    fn resolve_policy(&self, model: &dyn DeclarationModel, sink: &mut dyn MessageSink) {
        let Some(ty) = &self.failure.error_type else {
            let _ = self.policy();
            return;
        };
        if self.policy.get().is_some() {
            return;
        }
        if !model.type_decl(ty).is_some_and(|d| d.has(&Capability::Error)) {
            self.error(
                sink,
                codes::FAILURE_INVALID_ERROR_TYPE,
                format!("The type '{ty}' is not an error type."),
            );
            return;
        }
        let Some(constructor) = model.error_constructor(ty) else {
            self.error(
                sink,
                codes::FAILURE_ERROR_TYPE_NOT_CONSTRUCTIBLE,
                format!("The error type '{ty}' cannot be constructed from a message."),
            );
            return;
        };
        tracing::debug!(error_type = %ty, rule = self.rule.name(), "resolved custom error type");
        let _ = self
            .policy
            .set(FailurePolicy::resolve(Some(constructor), self.message()));
    }

    fn check_site(
        &self,
        site: &DeclarationSite,
        ty: &TypeRef,
        model: &dyn DeclarationModel,
        sink: &mut dyn MessageSink,
    ) {
        match &self.rule {
            Rule::NotNull => {
                if !model.is_nullable(ty) {
                    self.error(
                        sink,
                        codes::NOT_NULL_TYPE_NOT_NULLABLE,
                        format!("The type '{ty}' of {site} is not nullable."),
                    );
                }
            }
            Rule::NotEmpty => {
                if model.has_capability(ty, &Capability::Text)
                    || model.has_capability(ty, &Capability::Countable)
                {
                    return;
                }
                match element_type_of(model, ty) {
                    Some(element) => self.specialize(element, sink),
                    None => self.error(
                        sink,
                        codes::NOT_EMPTY_TYPE_NOT_SUPPORTED,
                        format!("The type '{ty}' of {site} is neither text nor a collection."),
                    ),
                }
            }
            Rule::Interval(rule) => {
                if !model.has_capability(ty, &Capability::Ordered) {
                    self.error(
                        sink,
                        codes::INTERVAL_TYPE_NOT_SUPPORTED,
                        format!("The type '{ty}' of {site} has no natural ordering."),
                    );
                }
                match (rule.min.present(), rule.max.present()) {
                    (None, _) => self.error(
                        sink,
                        codes::INTERVAL_MISSING_BOUND,
                        "The interval bound 'min' is absent.".to_owned(),
                    ),
                    (_, None) => self.error(
                        sink,
                        codes::INTERVAL_MISSING_BOUND,
                        "The interval bound 'max' is absent.".to_owned(),
                    ),
                    (Some(min), Some(max)) if !min.is_comparable_with(max) => self.error(
                        sink,
                        codes::INTERVAL_BOUND_TYPE_MISMATCH,
                        format!(
                            "The interval bounds '{min}' ({}) and '{max}' ({}) cannot be compared.",
                            min.kind(),
                            max.kind()
                        ),
                    ),
                    _ => {}
                }
            }
            Rule::Pattern(rule) => {
                if !model.has_capability(ty, &Capability::Text) {
                    self.error(
                        sink,
                        codes::PATTERN_TYPE_NOT_SUPPORTED,
                        format!("The type '{ty}' of {site} is not text."),
                    );
                }
                if self.regex.get().is_some() {
                    return;
                }
                match rule.compile() {
                    Ok(regex) => {
                        let _ = self.regex.set(regex);
                    }
                    Err(ConfigurationError::EmptyPattern) => self.error(
                        sink,
                        codes::PATTERN_EMPTY_PATTERN,
                        "The pattern is empty.".to_owned(),
                    ),
                    Err(err) => self.error(sink, codes::PATTERN_INVALID_PATTERN, format!("{err}.")),
                }
            }
        }
    }

    fn specialize(&self, element: TypeRef, sink: &mut dyn MessageSink) {
        let Ok(policy) = self.policy() else {
            return;
        };
        let built = self
            .specialization
            .get_or_init(|| SpecializedCheck::build(element.clone(), policy.clone()));
        if built.element() != &element {
            self.error(
                sink,
                codes::NOT_EMPTY_CONFLICTING_ELEMENT_TYPE,
                format!(
                    "The annotation is bound to elements of type '{}' and cannot also check '{element}'.",
                    built.element()
                ),
            );
        }
    }

    fn check_not_empty(
        &self,
        value: &Value,
        parameter: &str,
        policy: &FailurePolicy,
    ) -> Result<(), ContractError> {
        let factory = policy.factory(not_empty::DEFAULT_KIND, parameter);
        match value {
            Value::Null => Ok(()),
            Value::Collection(collection) => match self.specialization.get() {
                Some(check) => check.check(value, parameter),
                None => primitives::not_empty(Some(collection), parameter, factory),
            },
            Value::Text(text) => primitives::not_empty(Some(text.as_str()), parameter, factory),
            Value::List(items) => primitives::not_empty(Some(items), parameter, factory),
            Value::Map(entries) => primitives::not_empty(Some(entries), parameter, factory),
            other => Err(ConfigurationError::ValueMismatch {
                expected: Cow::Borrowed("text or collection"),
                found: Cow::Borrowed(other.kind()),
            }
            .into()),
        }
    }

    fn check_pattern(
        &self,
        rule: &PatternRule,
        value: &Value,
        parameter: &str,
        policy: &FailurePolicy,
    ) -> Result<(), ContractError> {
        if self.regex.get().is_none() {
            let _ = self.regex.set(rule.compile()?);
        }
        let regex = self.regex.get();
        let factory = policy.factory(pattern::DEFAULT_KIND, parameter);
        match value {
            Value::Null => primitives::pattern(None, regex, parameter, factory),
            Value::Text(text) => primitives::pattern(Some(text.as_str()), regex, parameter, factory),
            other => Err(ConfigurationError::ValueMismatch {
                expected: Cow::Borrowed("text"),
                found: Cow::Borrowed(other.kind()),
            }
            .into()),
        }
    }
}

impl ValidatorCapability for ValidatorAnnotation {
    fn name(&self) -> &'static str {
        self.rule.name()
    }

    fn describe(&self) -> String {
        match &self.rule {
            Rule::Interval(rule) => format!("Interval({})", rule.bounds()),
            Rule::Pattern(rule) => format!("Pattern({:?})", rule.pattern),
            rule => rule.name().to_owned(),
        }
    }

    fn compile_time_validate(
        &self,
        site: &DeclarationSite,
        model: &dyn DeclarationModel,
        sink: &mut dyn MessageSink,
    ) {
        self.resolve_policy(model, sink);
        if let Some(ty) = site.declared_type() {
            if model.type_decl(ty).is_some() {
                self.check_site(site, ty, model, sink);
            }
        }
    }

    fn validate(
        &self,
        _target: Option<&Value>,
        value: &Value,
        parameter: &str,
    ) -> Result<(), ContractError> {
        let policy = self.policy()?;
        match &self.rule {
            Rule::NotNull => primitives::not_null(
                value.present(),
                parameter,
                policy.factory(not_null::DEFAULT_KIND, parameter),
            ),
            Rule::NotEmpty => self.check_not_empty(value, parameter, policy),
            Rule::Interval(rule) => rule.check(value, parameter, policy),
            Rule::Pattern(rule) => self.check_pattern(rule, value, parameter, policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Diagnostics;
    use crate::metadata::{MethodDecl, ParameterDecl, TypeDecl};
    use crate::module::{HostError, Module};
    use pretty_assertions::assert_eq;
    use warden_validator::error::{ErrorKind, ViolationKind};
    use warden_validator::value::TypedCollection;

    fn site(ty: &str) -> DeclarationSite {
        let method = MethodDecl::new("Service", "call")
            .with_parameter(ParameterDecl::new("param1", ty))
            .reference();
        DeclarationSite::Parameter {
            parameter: method.parameters[0].clone(),
            method,
            ty: ty.into(),
        }
    }

    fn model() -> Module {
        Module::with_primitives()
            .with_type(TypeDecl::new("Vec<Order>").with_capability(Capability::CollectionOf("Order".into())))
            .with_type(TypeDecl::new("Vec<Invoice>").with_capability(Capability::CollectionOf("Invoice".into())))
            .with_type(TypeDecl::new("Point").with_shape(crate::metadata::TypeShape::Value))
            .with_type(
                TypeDecl::new("ConfigError")
                    .with_capability(Capability::Error)
                    .with_capability(Capability::MessageConstructor),
            )
            .with_type(TypeDecl::new("Opaque").with_capability(Capability::Error))
    }

    fn compile(annotation: &ValidatorAnnotation, ty: &str) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        annotation.compile_time_validate(&site(ty), &model(), &mut diagnostics);
        diagnostics
    }

    #[test]
    fn not_null_rejects_value_types() {
        let annotation = ValidatorAnnotation::not_null();
        assert!(compile(&annotation, "String").is_empty());
        assert!(compile(&annotation, "Option<i32>").is_empty());
        let diagnostics = compile(&annotation, "i32");
        assert_eq!(diagnostics.with_code(codes::NOT_NULL_TYPE_NOT_NULLABLE).count(), 1);
    }

    #[test]
    fn not_null_runtime() {
        let annotation = ValidatorAnnotation::not_null();
        assert!(annotation.validate(None, &Value::from("x"), "param1").is_ok());
        let err = annotation.validate(None, &Value::Null, "param1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Violation(ViolationKind::ArgumentNull));
        assert_eq!(err.as_violation().unwrap().message, "The parameter 'param1' is null.");
    }

    #[test]
    fn interval_requires_ordering_and_bounds() {
        assert!(compile(&ValidatorAnnotation::interval(2, 5), "i32").is_empty());
        assert!(compile(&ValidatorAnnotation::interval(2, 5), "Option<i32>").is_empty());

        let diagnostics = compile(&ValidatorAnnotation::interval(2, 5), "Point");
        assert_eq!(diagnostics.with_code(codes::INTERVAL_TYPE_NOT_SUPPORTED).count(), 1);

        let diagnostics = compile(&ValidatorAnnotation::interval(Value::Null, 5), "i32");
        assert_eq!(diagnostics.with_code(codes::INTERVAL_MISSING_BOUND).count(), 1);

        let diagnostics = compile(&ValidatorAnnotation::interval(1, "z"), "i32");
        assert_eq!(diagnostics.with_code(codes::INTERVAL_BOUND_TYPE_MISMATCH).count(), 1);
    }

    #[test]
    fn interval_runtime() {
        let annotation = ValidatorAnnotation::interval(2, 5);
        assert!(annotation.validate(None, &Value::Int(3), "param1").is_ok());
        assert!(annotation.validate(None, &Value::Null, "param1").is_ok());

        let err = annotation.validate(None, &Value::Int(6), "param1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Violation(ViolationKind::ArgumentOutOfRange));

        let err = annotation.validate(None, &Value::from("x"), "param1").unwrap_err();
        assert!(matches!(
            err,
            ContractError::Configuration(ConfigurationError::IncomparableBounds { .. })
        ));
    }

    #[test]
    fn interval_near_i64_max_compares_floats_exactly() {
        let annotation = ValidatorAnnotation::interval(i64::MAX - 1, i64::MAX);
        assert!(annotation.validate(None, &Value::Int(i64::MAX), "param1").is_ok());
        let err = annotation
            .validate(None, &Value::Float(9_223_372_036_854_775_808.0), "param1")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Violation(ViolationKind::ArgumentOutOfRange));
    }

    #[test]
    fn interval_missing_bound_fails_before_value() {
        let annotation = ValidatorAnnotation::interval(Value::Null, 5);
        let err = annotation.validate(None, &Value::Null, "param1").unwrap_err();
        assert!(matches!(
            err,
            ContractError::Configuration(ConfigurationError::MissingBound { bound: "min" })
        ));
    }

    #[test]
    fn not_empty_routes_by_shape() {
        let annotation = ValidatorAnnotation::not_empty();
        assert!(compile(&annotation, "String").is_empty());
        assert!(annotation.specialization().is_none());

        assert!(annotation.validate(None, &Value::from(""), "param1").is_err());
        assert!(annotation.validate(None, &Value::from("a"), "param1").is_ok());
        assert!(annotation.validate(None, &Value::List(vec![]), "param1").is_err());
        assert!(annotation.validate(None, &Value::Null, "param1").is_ok());
        assert!(annotation.validate(None, &Value::Int(0), "param1").unwrap_err().is_configuration());
    }

    #[test]
    fn rules_run_before_compile_time_validation() {
        let annotation = ValidatorAnnotation::not_empty();
        let empty = Value::Collection(TypedCollection::new("Order", vec![]));
        let err = annotation.validate(None, &empty, "orders").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Violation(ViolationKind::Argument));
        let orders = Value::Collection(TypedCollection::new("Order", vec![Value::Int(1)]));
        assert!(annotation.validate(None, &orders, "orders").is_ok());
        assert!(annotation.specialization().is_none());

        let annotation = ValidatorAnnotation::pattern("^[a-z]+$");
        assert!(annotation.validate(None, &Value::from("abc"), "name").is_ok());
        assert!(annotation.validate(None, &Value::from("ABC"), "name").is_err());
    }

    #[test]
    fn not_empty_rejects_scalars() {
        let diagnostics = compile(&ValidatorAnnotation::not_empty(), "i32");
        assert_eq!(diagnostics.with_code(codes::NOT_EMPTY_TYPE_NOT_SUPPORTED).count(), 1);
    }

    #[test]
    fn not_empty_specializes_once() {
        let annotation = ValidatorAnnotation::not_empty();
        assert!(compile(&annotation, "Vec<Order>").is_empty());
        let first = annotation.specialization().cloned().unwrap();
        assert!(compile(&annotation, "Vec<Order>").is_empty());
        assert!(first.same_instance(annotation.specialization().unwrap()));
        assert_eq!(first.element().as_str(), "Order");

        let orders = Value::Collection(TypedCollection::new("Order", vec![Value::Int(1)]));
        assert!(annotation.validate(None, &orders, "orders").is_ok());
        let invoices = Value::Collection(TypedCollection::new("Invoice", vec![Value::Int(1)]));
        assert!(annotation.validate(None, &invoices, "orders").unwrap_err().is_configuration());
    }

    #[test]
    fn not_empty_conflicting_element_types() {
        let annotation = ValidatorAnnotation::not_empty();
        assert!(compile(&annotation, "Vec<Order>").is_empty());
        let diagnostics = compile(&annotation, "Vec<Invoice>");
        assert_eq!(
            diagnostics.with_code(codes::NOT_EMPTY_CONFLICTING_ELEMENT_TYPE).count(),
            1
        );
    }

    #[test]
    fn pattern_compile_time_checks() {
        assert!(compile(&ValidatorAnnotation::pattern("^a"), "String").is_empty());

        let diagnostics = compile(&ValidatorAnnotation::pattern("^a"), "i32");
        assert_eq!(diagnostics.with_code(codes::PATTERN_TYPE_NOT_SUPPORTED).count(), 1);

        let diagnostics = compile(&ValidatorAnnotation::pattern(""), "String");
        assert_eq!(diagnostics.with_code(codes::PATTERN_EMPTY_PATTERN).count(), 1);

        let diagnostics = compile(&ValidatorAnnotation::pattern("("), "String");
        assert_eq!(diagnostics.with_code(codes::PATTERN_INVALID_PATTERN).count(), 1);
    }

    #[test]
    fn pattern_runtime() {
        let annotation = ValidatorAnnotation::pattern("^[a-z]+$");
        assert!(annotation.validate(None, &Value::from("abc"), "name").is_ok());
        assert!(annotation.validate(None, &Value::Null, "name").is_ok());
        let err = annotation.validate(None, &Value::from("ABC"), "name").unwrap_err();
        assert_eq!(
            err.as_violation().unwrap().message,
            "The parameter 'name' does not match the defined pattern."
        );
        let empty = ValidatorAnnotation::pattern("");
        assert!(empty.validate(None, &Value::Null, "name").unwrap_err().is_configuration());
    }

    #[test]
    fn message_policy() {
        let annotation = ValidatorAnnotation::not_empty().with_message("cannot be blank");
        let err = annotation.validate(None, &Value::from(""), "name").unwrap_err();
        let violation = err.as_violation().unwrap();
        assert_eq!(violation.kind, ViolationKind::Argument);
        assert_eq!(violation.message, "cannot be blank");
    }

    #[test]
    fn custom_error_type_resolves_at_weave_time() {
        let annotation = ValidatorAnnotation::not_null().with_error_type("ConfigError");

        let err = annotation.validate(None, &Value::Null, "param1").unwrap_err();
        assert!(matches!(
            err,
            ContractError::Configuration(ConfigurationError::UnresolvedErrorType { .. })
        ));

        assert!(compile(&annotation, "String").is_empty());
        let err = annotation.validate(None, &Value::Null, "param1").unwrap_err();
        let custom = err.as_custom().unwrap();
        assert_eq!(custom.type_name(), "ConfigError");
        assert_eq!(custom.to_string(), "ConfigError: The parameter 'param1' is null.");
        assert!(custom.downcast_ref::<HostError>().is_some());
    }

    #[test]
    fn invalid_custom_error_types() {
        let diagnostics = compile(&ValidatorAnnotation::not_null().with_error_type("String"), "String");
        assert_eq!(diagnostics.with_code(codes::FAILURE_INVALID_ERROR_TYPE).count(), 1);

        let diagnostics = compile(&ValidatorAnnotation::not_null().with_error_type("Opaque"), "String");
        assert_eq!(
            diagnostics.with_code(codes::FAILURE_ERROR_TYPE_NOT_CONSTRUCTIBLE).count(),
            1
        );
    }

    #[test]
    fn describe_includes_configuration() {
        assert_eq!(ValidatorAnnotation::interval(2, 5).describe(), "Interval([2, 5])");
        assert_eq!(ValidatorAnnotation::pattern("^a").describe(), "Pattern(\"^a\")");
        assert_eq!(ValidatorAnnotation::not_null().describe(), "NotNull");
    }
}
