//! NotNull primitive

use std::borrow::Cow;

use crate::error::{ContractError, ViolationKind};
use crate::policy::default_violation;

/// Error kind raised when no custom error type is configured.
pub const DEFAULT_KIND: ViolationKind = ViolationKind::ArgumentNull;

/// Default failure text.
#[must_use]
pub fn default_message(parameter: &str) -> String {
    format!("The parameter '{parameter}' is null.")
}

/// Fails when `value` is absent.
///
/// Works the same for plain references and for optional-wrapped values:
/// callers pass `opt.as_ref()`.
pub fn not_null<T: ?Sized>(
    value: Option<&T>,
    parameter: &str,
    create: impl FnOnce(String) -> ContractError,
) -> Result<(), ContractError> {
    match value {
        Some(_) => Ok(()),
        None => Err(create(default_message(parameter))),
    }
}

/// [`not_null`] raising [`ViolationKind::ArgumentNull`] with the default text.
pub fn not_null_default<T: ?Sized>(value: Option<&T>, parameter: &str) -> Result<(), ContractError> {
    not_null(value, parameter, |message| {
        default_violation(DEFAULT_KIND, parameter, message)
    })
}

/// [`not_null`] raising [`ViolationKind::ArgumentNull`] with a custom text.
pub fn not_null_with_message<T: ?Sized>(
    value: Option<&T>,
    parameter: &str,
    message: impl Into<Cow<'static, str>>,
) -> Result<(), ContractError> {
    let message = message.into();
    not_null(value, parameter, |_| {
        default_violation(DEFAULT_KIND, parameter, message)
    })
}
