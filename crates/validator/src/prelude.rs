//! Common imports.
//!
//! ```rust,ignore
//! use warden_validator::prelude::*;
//! ```

pub use crate::error::{
    ConfigurationError, ContractError, CustomError, ErrorKind, Violation, ViolationKind,
};
pub use crate::policy::{ErrorConstructor, FailurePolicy};
pub use crate::primitives::{
    BoundaryMode, Bounds, PatternOptions, interval, interval_default, interval_with_message,
    not_empty, not_empty_default, not_empty_with_message, not_null, not_null_default,
    not_null_with_message, pattern, pattern_default, pattern_source, pattern_with_message,
};
pub use crate::value::{Countable, TypedCollection, Value};
