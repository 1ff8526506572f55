//! Pattern primitive

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ContractError, ViolationKind};
use crate::policy::default_violation;

/// Error kind raised when no custom error type is configured.
pub const DEFAULT_KIND: ViolationKind = ViolationKind::Argument;

/// Matching options applied when a pattern is compiled from source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOptions {
    /// Case-insensitive matching.
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `.` also matches `\n`.
    pub dot_matches_new_line: bool,
    /// Whitespace and `#` comments in the pattern are ignored.
    pub ignore_whitespace: bool,
}

impl PatternOptions {
    /// Compiles `source` with these options.
    ///
    /// An empty source is [`ConfigurationError::EmptyPattern`].
    pub fn compile(&self, source: &str) -> Result<Regex, ConfigurationError> {
        if source.is_empty() {
            return Err(ConfigurationError::EmptyPattern);
        }
        Ok(RegexBuilder::new(source)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .build()?)
    }
}

/// Default failure text.
#[must_use]
pub fn default_message(parameter: &str) -> String {
    format!("The parameter '{parameter}' does not match the defined pattern.")
}

/// Fails when `value` is present and `regex` finds no match in it.
///
/// Matching is an unanchored search; anchor the pattern to require a full
/// match. An absent `regex` is [`ConfigurationError::EmptyPattern`].
pub fn pattern(
    value: Option<&str>,
    regex: Option<&Regex>,
    parameter: &str,
    create: impl FnOnce(String) -> ContractError,
) -> Result<(), ContractError> {
    let regex = regex.ok_or(ConfigurationError::EmptyPattern)?;
    match value {
        Some(text) if !regex.is_match(text) => Err(create(default_message(parameter))),
        _ => Ok(()),
    }
}

/// [`pattern`] compiling `source` first.
///
/// The source is compiled, and rejected when absent or empty, before the
/// value is inspected.
pub fn pattern_source(
    value: Option<&str>,
    source: Option<&str>,
    options: PatternOptions,
    parameter: &str,
    create: impl FnOnce(String) -> ContractError,
) -> Result<(), ContractError> {
    let source = source.ok_or(ConfigurationError::EmptyPattern)?;
    let regex = options.compile(source)?;
    pattern(value, Some(&regex), parameter, create)
}

/// [`pattern`] raising [`ViolationKind::Argument`] with the default text.
pub fn pattern_default(
    value: Option<&str>,
    regex: Option<&Regex>,
    parameter: &str,
) -> Result<(), ContractError> {
    pattern(value, regex, parameter, |message| {
        default_violation(DEFAULT_KIND, parameter, message)
    })
}

/// [`pattern`] raising [`ViolationKind::Argument`] with a custom text.
pub fn pattern_with_message(
    value: Option<&str>,
    regex: Option<&Regex>,
    parameter: &str,
    message: impl Into<Cow<'static, str>>,
) -> Result<(), ContractError> {
    let message = message.into();
    pattern(value, regex, parameter, |_| {
        default_violation(DEFAULT_KIND, parameter, message)
    })
}
