//! Build-time diagnostics
//!
//! Compile-time checks never fail by returning errors. They write
//! [`Message`]s to a [`MessageSink`] and the advisor excludes any
//! declaration that produced an error-severity message.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Diagnostic codes emitted by the built-in checks.
pub mod codes {
    /// NotNull on a type whose values are never absent.
    pub const NOT_NULL_TYPE_NOT_NULLABLE: &str = "not_null.type_not_nullable";
    /// NotEmpty on a type that is neither text nor a collection.
    pub const NOT_EMPTY_TYPE_NOT_SUPPORTED: &str = "not_empty.type_not_supported";
    /// NotEmpty already specialized for another element type.
    pub const NOT_EMPTY_CONFLICTING_ELEMENT_TYPE: &str = "not_empty.conflicting_element_type";
    /// Interval on a type without a natural ordering.
    pub const INTERVAL_TYPE_NOT_SUPPORTED: &str = "interval.type_not_supported";
    /// Interval with an absent bound.
    pub const INTERVAL_MISSING_BOUND: &str = "interval.missing_bound";
    /// Interval whose bounds cannot be compared with each other.
    pub const INTERVAL_BOUND_TYPE_MISMATCH: &str = "interval.bound_type_mismatch";
    /// Pattern on a non-text type.
    pub const PATTERN_TYPE_NOT_SUPPORTED: &str = "pattern.type_not_supported";
    /// Pattern with an empty source.
    pub const PATTERN_EMPTY_PATTERN: &str = "pattern.empty_pattern";
    /// Pattern source that does not compile.
    pub const PATTERN_INVALID_PATTERN: &str = "pattern.invalid_pattern";
    /// Custom error type that is not an error type.
    pub const FAILURE_INVALID_ERROR_TYPE: &str = "failure.invalid_error_type";
    /// Custom error type that cannot be built from a message.
    pub const FAILURE_ERROR_TYPE_NOT_CONSTRUCTIBLE: &str = "failure.error_type_not_constructible";
    /// A declaration refers to a type the module does not declare.
    pub const SCAN_UNKNOWN_TYPE: &str = "scan.unknown_type";
    /// Validators on a property without a setter; nothing is woven.
    pub const SCAN_READ_ONLY_PROPERTY: &str = "scan.read_only_property";
}

/// Message severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Info,
    /// Suspicious but accepted.
    Warning,
    /// The declaration is rejected.
    Error,
}

impl Severity {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A build-time diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Severity.
    pub severity: Severity,
    /// Stable machine-readable code, see [`codes`].
    pub code: Cow<'static, str>,
    /// Human-readable text.
    pub text: String,
    /// Component that raised the message.
    pub source: Cow<'static, str>,
}

impl Message {
    /// Creates a message.
    pub fn new(
        severity: Severity,
        code: impl Into<Cow<'static, str>>,
        text: impl Into<String>,
        source: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            text: text.into(),
            source: source.into(),
        }
    }

    /// Error-severity message.
    pub fn error(
        code: impl Into<Cow<'static, str>>,
        text: impl Into<String>,
        source: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(Severity::Error, code, text, source)
    }

    /// Warning-severity message.
    pub fn warning(
        code: impl Into<Cow<'static, str>>,
        text: impl Into<String>,
        source: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(Severity::Warning, code, text, source)
    }

    /// True for error severity.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} ({})",
            self.severity, self.code, self.text, self.source
        )
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// Receives diagnostics.
pub trait MessageSink {
    /// Records one message.
    fn write(&mut self, message: Message);
}

impl MessageSink for Vec<Message> {
    fn write(&mut self, message: Message) {
        self.push(message);
    }
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    fn write(&mut self, message: Message) {
        (**self).write(message);
    }
}

/// Collected diagnostics with severity counts.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    messages: Vec<Message>,
}

impl Diagnostics {
    /// An empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in emission order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Iterates the messages.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Number of messages with `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }

    /// True when at least one error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(Message::is_error)
    }

    /// Messages carrying `code`.
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages.iter().filter(move |m| m.code == code)
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Consumes into the message list.
    #[must_use]
    pub fn into_vec(self) -> Vec<Message> {
        self.messages
    }
}

impl MessageSink for Diagnostics {
    fn write(&mut self, message: Message) {
        self.messages.push(message);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Logs every message through `tracing` before forwarding it.
#[derive(Debug, Default)]
pub struct TracingSink<S> {
    inner: S,
}

impl<S: MessageSink> TracingSink<S> {
    /// Wraps `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Unwraps the forwarded-to sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: MessageSink> MessageSink for TracingSink<S> {
    fn write(&mut self, message: Message) {
        match message.severity {
            Severity::Error => tracing::error!(
                code = %message.code,
                source = %message.source,
                "{}",
                message.text
            ),
            Severity::Warning => tracing::warn!(
                code = %message.code,
                source = %message.source,
                "{}",
                message.text
            ),
            Severity::Info => tracing::info!(
                code = %message.code,
                source = %message.source,
                "{}",
                message.text
            ),
        }
        self.inner.write(message);
    }
}

/// Forwards messages while counting errors.
pub(crate) struct CountingSink<'a> {
    inner: &'a mut dyn MessageSink,
    errors: usize,
}

impl<'a> CountingSink<'a> {
    pub(crate) fn new(inner: &'a mut dyn MessageSink) -> Self {
        Self { inner, errors: 0 }
    }

    pub(crate) fn errors(&self) -> usize {
        self.errors
    }
}

impl MessageSink for CountingSink<'_> {
    fn write(&mut self, message: Message) {
        if message.is_error() {
            self.errors += 1;
        }
        self.inner.write(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_by_gravity() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn diagnostics_count_by_severity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.write(Message::warning("a", "first", "test"));
        diagnostics.write(Message::error("b", "second", "test"));
        diagnostics.write(Message::error("b", "third", "test"));

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(Severity::Error), 2);
        assert_eq!(diagnostics.count(Severity::Warning), 1);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.with_code("b").count(), 2);
    }

    #[test]
    fn counting_sink_forwards_and_counts() {
        let mut collected: Vec<Message> = Vec::new();
        let mut counting = CountingSink::new(&mut collected);
        counting.write(Message::warning("w", "warn", "test"));
        counting.write(Message::error("e", "err", "test"));
        assert_eq!(counting.errors(), 1);
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn tracing_sink_forwards() {
        let mut sink = TracingSink::new(Vec::new());
        sink.write(Message::error("e", "err", "test"));
        assert_eq!(sink.into_inner().len(), 1);
    }

    #[test]
    fn message_display() {
        let message = Message::error(codes::SCAN_UNKNOWN_TYPE, "missing", "advisor");
        assert_eq!(message.to_string(), "error[scan.unknown_type]: missing (advisor)");
    }
}
