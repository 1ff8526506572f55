//! Declaration scanning and interception planning
//!
//! The [`Advisor`] walks every method parameter, every method and every
//! property setter of a [`DeclarationModel`]. Each validator annotation it
//! finds is self-checked against its declaration; annotations that pass are
//! handed to a [`Weaver`], annotations that fail are excluded and the scan
//! moves on.
//!
//! [`WeavePlan`] is the in-memory weaver: it records the interception
//! units and can replay them against concrete argument lists.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use warden_validator::error::ContractError;
use warden_validator::value::Value;

use crate::attribute::Attribute;
use crate::diagnostic::{CountingSink, Message, MessageSink, codes};
use crate::metadata::{
    DeclarationModel, DeclarationSite, MethodDecl, MethodRef, ParameterList, ParameterRef,
    PropertyDecl, TypeRef,
};
use crate::validator::ValidatorCapability;

const SOURCE: &str = module_path!();

static ABSENT: Value = Value::Null;

// ============================================================================
// WEAVER
// ============================================================================

/// Receives the interceptions the advisor decides on.
pub trait Weaver {
    /// Run `validator` before the body of `method`.
    ///
    /// `parameters` lists the covered parameters; `None` covers the whole
    /// call, i.e. every parameter of `method`.
    fn before_method_body(
        &mut self,
        method: &MethodRef,
        validator: &Arc<dyn ValidatorCapability>,
        parameters: Option<&[ParameterRef]>,
    );

    /// Run `validator`'s one-time preparation before `declaring_type` is
    /// first used.
    fn before_static_initializer(
        &mut self,
        validator: &Arc<dyn ValidatorCapability>,
        declaring_type: &TypeRef,
    );
}

/// Where an interception runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinPoint {
    /// Before a method body.
    BeforeMethodBody {
        /// Intercepted method.
        method: MethodRef,
        /// Covered parameters; `None` for the whole call.
        parameters: Option<ParameterList>,
    },
    /// Before a type's static initializer.
    BeforeStaticInitializer {
        /// Initialized type.
        declaring_type: TypeRef,
    },
}

impl JoinPoint {
    /// Snake-case join point kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BeforeMethodBody { .. } => "before_method_body",
            Self::BeforeStaticInitializer { .. } => "before_static_initializer",
        }
    }
}

impl fmt::Display for JoinPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeforeMethodBody { method, .. } => write!(f, "before body of {method}"),
            Self::BeforeStaticInitializer { declaring_type } => {
                write!(f, "before static initializer of {declaring_type}")
            }
        }
    }
}

/// One registered interception.
#[derive(Debug, Clone)]
pub struct InterceptionUnit {
    /// Where it runs.
    pub join_point: JoinPoint,
    /// What it runs.
    pub validator: Arc<dyn ValidatorCapability>,
}

impl InterceptionUnit {
    /// Parameters this unit checks; empty for static initializers.
    #[must_use]
    pub fn covered_parameters(&self) -> &[ParameterRef] {
        match &self.join_point {
            JoinPoint::BeforeMethodBody {
                parameters: Some(parameters),
                ..
            } => parameters.as_slice(),
            JoinPoint::BeforeMethodBody {
                method,
                parameters: None,
            } => method.parameters.as_slice(),
            JoinPoint::BeforeStaticInitializer { .. } => &[],
        }
    }

    /// Checks the covered parameters in ordinal order, stopping at the
    /// first failure.
    ///
    /// Arguments missing from `arguments` are treated as absent.
    pub fn check(&self, target: Option<&Value>, arguments: &[Value]) -> Result<(), ContractError> {
        for parameter in self.covered_parameters() {
            let value = arguments.get(parameter.ordinal).unwrap_or(&ABSENT);
            self.validator.validate(target, value, &parameter.name)?;
        }
        Ok(())
    }

    /// Serializable description.
    #[must_use]
    pub fn summary(&self) -> UnitSummary {
        let target = match &self.join_point {
            JoinPoint::BeforeMethodBody { method, .. } => method.to_string(),
            JoinPoint::BeforeStaticInitializer { declaring_type } => declaring_type.to_string(),
        };
        UnitSummary {
            join_point: self.join_point.kind(),
            target,
            parameters: self
                .covered_parameters()
                .iter()
                .map(|p| p.name.clone())
                .collect(),
            validator: self.validator.describe(),
        }
    }
}

/// Flat view of an [`InterceptionUnit`] for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
    /// Join point kind.
    pub join_point: &'static str,
    /// Intercepted method or initialized type.
    pub target: String,
    /// Covered parameter names.
    pub parameters: Vec<String>,
    /// Validator description.
    pub validator: String,
}

/// Interception units in registration order.
#[derive(Debug, Clone, Default)]
pub struct WeavePlan {
    units: Vec<InterceptionUnit>,
}

impl WeavePlan {
    /// An empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All units.
    #[must_use]
    pub fn units(&self) -> &[InterceptionUnit] {
        &self.units
    }

    /// Number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True when nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units running before the body of `declaring_type::method`.
    pub fn method_units<'a>(
        &'a self,
        declaring_type: &'a str,
        method: &'a str,
    ) -> impl Iterator<Item = &'a InterceptionUnit> + 'a {
        self.units.iter().filter(move |unit| {
            matches!(&unit.join_point, JoinPoint::BeforeMethodBody { method: m, .. } if m.is(declaring_type, method))
        })
    }

    /// Units running before the static initializer of `declaring_type`.
    pub fn initializer_units<'a>(
        &'a self,
        declaring_type: &'a str,
    ) -> impl Iterator<Item = &'a InterceptionUnit> + 'a {
        self.units.iter().filter(move |unit| {
            matches!(&unit.join_point, JoinPoint::BeforeStaticInitializer { declaring_type: t } if t.as_str() == declaring_type)
        })
    }

    /// Runs every unit woven before `declaring_type::method`, as the
    /// intercepted call would.
    pub fn check_call(
        &self,
        declaring_type: &str,
        method: &str,
        target: Option<&Value>,
        arguments: &[Value],
    ) -> Result<(), ContractError> {
        for unit in self.method_units(declaring_type, method) {
            unit.check(target, arguments)?;
        }
        Ok(())
    }
}

impl Weaver for WeavePlan {
    fn before_method_body(
        &mut self,
        method: &MethodRef,
        validator: &Arc<dyn ValidatorCapability>,
        parameters: Option<&[ParameterRef]>,
    ) {
        self.units.push(InterceptionUnit {
            join_point: JoinPoint::BeforeMethodBody {
                method: method.clone(),
                parameters: parameters.map(|p| p.iter().cloned().collect()),
            },
            validator: Arc::clone(validator),
        });
    }

    fn before_static_initializer(
        &mut self,
        validator: &Arc<dyn ValidatorCapability>,
        declaring_type: &TypeRef,
    ) {
        self.units.push(InterceptionUnit {
            join_point: JoinPoint::BeforeStaticInitializer {
                declaring_type: declaring_type.clone(),
            },
            validator: Arc::clone(validator),
        });
    }
}

// ============================================================================
// ADVISOR
// ============================================================================

/// Outcome counts of one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Methods visited.
    pub methods: usize,
    /// Properties visited.
    pub properties: usize,
    /// Annotations handed to the weaver.
    pub registered: usize,
    /// Annotations rejected by their self-check.
    pub excluded: usize,
}

/// Scans a model and hands every valid validator annotation to a weaver.
pub struct Advisor<'m> {
    model: &'m dyn DeclarationModel,
}

impl<'m> Advisor<'m> {
    /// An advisor over `model`.
    pub fn new(model: &'m dyn DeclarationModel) -> Self {
        Self { model }
    }

    /// Scans the whole model.
    ///
    /// Never stops early: every annotation is visited and every problem is
    /// reported to `sink`.
    pub fn provide_advices(
        &self,
        weaver: &mut dyn Weaver,
        sink: &mut dyn MessageSink,
    ) -> ScanReport {
        let mut report = ScanReport::default();

        for method in self.model.methods() {
            report.methods += 1;
            self.advise_parameters(method, weaver, sink, &mut report);
            self.advise_method(method, weaver, sink, &mut report);
        }

        for property in self.model.properties() {
            report.properties += 1;
            self.advise_property(property, weaver, sink, &mut report);
        }

        tracing::info!(
            methods = report.methods,
            properties = report.properties,
            registered = report.registered,
            excluded = report.excluded,
            "scan complete"
        );
        report
    }

    fn advise_parameters(
        &self,
        method: &MethodDecl,
        weaver: &mut dyn Weaver,
        sink: &mut dyn MessageSink,
        report: &mut ScanReport,
    ) {
        let method_ref = method.reference();
        for (parameter, decl) in method_ref.parameters.iter().zip(&method.parameters) {
            let site = DeclarationSite::Parameter {
                method: method_ref.clone(),
                parameter: parameter.clone(),
                ty: decl.ty.clone(),
            };
            for validator in decl.attributes.iter().filter_map(Attribute::as_validator) {
                if self.admit(&site, &**validator, sink) {
                    weaver.before_method_body(
                        &method_ref,
                        validator,
                        Some(std::slice::from_ref(parameter)),
                    );
                    record(report, &site, &**validator, true);
                } else {
                    record(report, &site, &**validator, false);
                }
            }
        }
    }

    fn advise_method(
        &self,
        method: &MethodDecl,
        weaver: &mut dyn Weaver,
        sink: &mut dyn MessageSink,
        report: &mut ScanReport,
    ) {
        let method_ref = method.reference();
        let method_site = DeclarationSite::Method {
            method: method_ref.clone(),
        };
        for validator in method.attributes.iter().filter_map(Attribute::as_validator) {
            let admitted = if method.parameters.is_empty() {
                self.admit(&method_site, &**validator, sink)
            } else {
                let mut admitted = true;
                for (parameter, decl) in method_ref.parameters.iter().zip(&method.parameters) {
                    let site = DeclarationSite::Parameter {
                        method: method_ref.clone(),
                        parameter: parameter.clone(),
                        ty: decl.ty.clone(),
                    };
                    admitted &= self.admit(&site, &**validator, sink);
                }
                admitted
            };
            if admitted {
                weaver.before_method_body(&method_ref, validator, None);
                weaver.before_static_initializer(validator, &method.declaring_type);
            }
            record(report, &method_site, &**validator, admitted);
        }
    }

    fn advise_property(
        &self,
        property: &PropertyDecl,
        weaver: &mut dyn Weaver,
        sink: &mut dyn MessageSink,
        report: &mut ScanReport,
    ) {
        let Some(setter) = property.setter() else {
            let skipped = property
                .attributes
                .iter()
                .filter_map(Attribute::as_validator)
                .count();
            if skipped > 0 {
                tracing::debug!(
                    property = %property.name,
                    declaring_type = %property.declaring_type,
                    skipped,
                    "skipping validators on read-only property"
                );
                sink.write(Message::warning(
                    codes::SCAN_READ_ONLY_PROPERTY,
                    format!(
                        "The property '{}::{}' has no setter; its {skipped} validator(s) are not woven.",
                        property.declaring_type, property.name
                    ),
                    SOURCE,
                ));
            }
            return;
        };
        let site = DeclarationSite::PropertySetter {
            setter: setter.clone(),
            property: property.name.clone(),
            ty: property.ty.clone(),
        };
        for validator in property.attributes.iter().filter_map(Attribute::as_validator) {
            let admitted = self.admit(&site, &**validator, sink);
            if admitted {
                weaver.before_method_body(&setter, validator, Some(setter.parameters.as_slice()));
            }
            record(report, &site, &**validator, admitted);
        }
    }

    /// Runs the validator's self-check at `site`; true when it raised no
    /// error. An undeclared site type is an error, but the self-check still
    /// runs so its own problems are reported in the same pass.
    fn admit(
        &self,
        site: &DeclarationSite,
        validator: &dyn ValidatorCapability,
        sink: &mut dyn MessageSink,
    ) -> bool {
        let mut counting = CountingSink::new(sink);
        if let Some(ty) = site.declared_type() {
            if self.model.type_decl(ty).is_none() {
                counting.write(Message::error(
                    codes::SCAN_UNKNOWN_TYPE,
                    format!("The type '{ty}' of {site} is not declared."),
                    SOURCE,
                ));
            }
        }
        validator.compile_time_validate(site, self.model, &mut counting);
        counting.errors() == 0
    }
}

fn record(
    report: &mut ScanReport,
    site: &DeclarationSite,
    validator: &dyn ValidatorCapability,
    admitted: bool,
) {
    if admitted {
        report.registered += 1;
        tracing::debug!(site = %site, validator = %validator.describe(), "registered advice");
    } else {
        report.excluded += 1;
        tracing::warn!(site = %site, validator = %validator.describe(), "excluded from weaving");
    }
}
