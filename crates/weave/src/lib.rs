//! # warden-weave
//!
//! Build-time half of the Warden contract framework. It scans a module's
//! declarations for validator annotations, lets each annotation check that
//! it makes sense where it was placed, and plans the interceptions that run
//! the surviving annotations before the annotated code.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use warden_weave::prelude::*;
//!
//! let module = Module::with_primitives().with_method(
//!     MethodDecl::new("Orders", "place").with_parameter(
//!         ParameterDecl::new("count", "i32").with_attribute(ValidatorAnnotation::interval(2, 5)),
//!     ),
//! );
//!
//! let mut plan = WeavePlan::new();
//! let mut diagnostics = Diagnostics::new();
//! Advisor::new(&module).provide_advices(&mut plan, &mut diagnostics);
//!
//! assert!(plan.check_call("Orders", "place", None, &[Value::Int(3)]).is_ok());
//! assert!(plan.check_call("Orders", "place", None, &[Value::Int(9)]).is_err());
//! ```
//!
//! ## Modules
//!
//! - [`metadata`]: types, capabilities, members and the
//!   [`DeclarationModel`](metadata::DeclarationModel) trait.
//! - [`module`]: the in-memory model, loadable from JSON or TOML.
//! - [`attribute`]: annotations as they appear on declarations.
//! - [`validator`]: the [`ValidatorCapability`](validator::ValidatorCapability)
//!   trait and the built-in `NotNull`, `NotEmpty`, `Interval` and `Pattern`.
//! - [`specialize`]: element-type specialization of `NotEmpty`.
//! - [`diagnostic`]: build-time messages and sinks.
//! - [`advisor`]: the scan, the [`Weaver`](advisor::Weaver) seam and the
//!   in-memory [`WeavePlan`](advisor::WeavePlan).

pub mod advisor;
pub mod attribute;
pub mod diagnostic;
pub mod error;
pub mod metadata;
pub mod module;
pub mod prelude;
pub mod specialize;
pub mod validator;
