//! # warden-validator
//!
//! Runtime half of the Warden contract framework: the checks a woven
//! precondition runs, and how their failures are reported.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use warden_validator::prelude::*;
//!
//! assert!(not_empty_default(Some("alice"), "name").is_ok());
//! assert!(interval_default(Some(&7), &Bounds::inclusive(&2, &5), "count").is_err());
//! ```
//!
//! ## Building blocks
//!
//! - [`primitives`]: `not_null`, `not_empty`, `interval`, `pattern`. Each
//!   takes an exception factory and calls it only on failure.
//! - [`policy`]: [`FailurePolicy`](policy::FailurePolicy) resolves the
//!   `{custom error type, custom message}` configuration of an annotation
//!   into that factory.
//! - [`value`]: [`Value`](value::Value), the dynamic form parameter values
//!   take at a woven call site, and [`Countable`](value::Countable).
//! - [`error`]: [`ContractError`](error::ContractError), separating rule
//!   violations from rule misconfiguration.

pub mod error;
pub mod policy;
pub mod prelude;
pub mod primitives;
pub mod value;
