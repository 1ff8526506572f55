//! NotEmpty primitive

use std::borrow::Cow;

use crate::error::{ContractError, ViolationKind};
use crate::policy::default_violation;
use crate::value::Countable;

/// Error kind raised when no custom error type is configured.
pub const DEFAULT_KIND: ViolationKind = ViolationKind::Argument;

/// Default failure text.
#[must_use]
pub fn default_message(parameter: &str) -> String {
    format!("The parameter '{parameter}' is empty")
}

/// Fails when `value` is present and has zero length.
///
/// An absent value is valid; nullability is [`not_null`](super::not_null)'s
/// concern. Text, untyped and typed collections all go through
/// [`Countable::is_empty_collection`].
pub fn not_empty<C: Countable + ?Sized>(
    value: Option<&C>,
    parameter: &str,
    create: impl FnOnce(String) -> ContractError,
) -> Result<(), ContractError> {
    match value {
        Some(v) if v.is_empty_collection() => Err(create(default_message(parameter))),
        _ => Ok(()),
    }
}

/// [`not_empty`] raising [`ViolationKind::Argument`] with the default text.
pub fn not_empty_default<C: Countable + ?Sized>(
    value: Option<&C>,
    parameter: &str,
) -> Result<(), ContractError> {
    not_empty(value, parameter, |message| {
        default_violation(DEFAULT_KIND, parameter, message)
    })
}

/// [`not_empty`] raising [`ViolationKind::Argument`] with a custom text.
pub fn not_empty_with_message<C: Countable + ?Sized>(
    value: Option<&C>,
    parameter: &str,
    message: impl Into<Cow<'static, str>>,
) -> Result<(), ContractError> {
    let message = message.into();
    not_empty(value, parameter, |_| {
        default_violation(DEFAULT_KIND, parameter, message)
    })
}
