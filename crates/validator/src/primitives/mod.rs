//! Validation primitives
//!
//! Stateless checks of one value against one rule. Every primitive:
//!
//! - takes the value as `Option<&T>` (`None` is the absent value),
//! - takes the parameter name used in its default message,
//! - takes an exception factory `FnOnce(String) -> ContractError` that is
//!   called with the default message only when the check fails,
//! - reports misconfiguration of the rule itself as
//!   [`ConfigurationError`](crate::error::ConfigurationError) before looking
//!   at the value.
//!
//! Each primitive also has `*_default` and `*_with_message` forms that build
//! the factory from the primitive's built-in error kind.
//!
//! # Examples
//!
//! ```rust,ignore
//! use warden_validator::primitives::{Bounds, interval_default};
//!
//! assert!(interval_default(Some(&3), &Bounds::inclusive(&2, &5), "count").is_ok());
//! assert!(interval_default(Some(&6), &Bounds::inclusive(&2, &5), "count").is_err());
//! ```

pub mod interval;
pub mod not_empty;
pub mod not_null;
pub mod pattern;

pub use interval::{BoundaryMode, Bounds, interval, interval_default, interval_with_message};
pub use not_empty::{not_empty, not_empty_default, not_empty_with_message};
pub use not_null::{not_null, not_null_default, not_null_with_message};
pub use pattern::{
    PatternOptions, pattern, pattern_default, pattern_source, pattern_with_message,
};
