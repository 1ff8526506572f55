//! Common imports.
//!
//! ```rust,ignore
//! use warden_weave::prelude::*;
//! ```

pub use crate::advisor::{
    Advisor, InterceptionUnit, JoinPoint, ScanReport, UnitSummary, WeavePlan, Weaver,
};
pub use crate::attribute::Attribute;
pub use crate::diagnostic::{Diagnostics, Message, MessageSink, Severity, TracingSink, codes};
pub use crate::error::ManifestError;
pub use crate::metadata::{
    Capability, DeclarationModel, DeclarationSite, MethodDecl, MethodRef, ParameterDecl,
    ParameterRef, PropertyDecl, TypeDecl, TypeRef, TypeShape,
};
pub use crate::module::{HostError, Module};
pub use crate::specialize::{SpecializedCheck, element_type_of};
pub use crate::validator::{
    FailureConfig, IntervalRule, PatternRule, Rule, ValidatorAnnotation, ValidatorCapability,
};

pub use warden_validator::prelude::*;
