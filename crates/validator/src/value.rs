//! Dynamic runtime values
//!
//! Woven checks receive parameter values without static type information,
//! so they travel as [`Value`]. The shapes mirror what the rules care about:
//! nullability, natural ordering, text, and countable collections (untyped
//! and typed).

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// COUNTABLE
// ============================================================================

/// Anything with a length or element count.
///
/// Every NotEmpty shape (text, untyped collection, typed collection) routes
/// through this one predicate.
pub trait Countable {
    /// Number of elements (bytes for text).
    fn count(&self) -> usize;

    /// True when the count is zero.
    fn is_empty_collection(&self) -> bool {
        self.count() == 0
    }
}

impl Countable for str {
    fn count(&self) -> usize {
        self.len()
    }
}

impl Countable for String {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T> Countable for [T] {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T> Countable for Vec<T> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T> Countable for VecDeque<T> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Countable for HashMap<K, V, S> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T, S> Countable for HashSet<T, S> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<K, V> Countable for BTreeMap<K, V> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T> Countable for BTreeSet<T> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Countable for IndexMap<K, V, S> {
    fn count(&self) -> usize {
        self.len()
    }
}

// ============================================================================
// TYPED COLLECTION
// ============================================================================

/// A collection that knows its element type, e.g. a `Vec<Order>` handed over
/// as a dynamic value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypedCollection {
    /// Name of the element type.
    pub element: String,
    /// The elements.
    #[serde(default)]
    pub items: Vec<Value>,
}

impl TypedCollection {
    /// Creates a typed collection.
    pub fn new(element: impl Into<String>, items: Vec<Value>) -> Self {
        Self {
            element: element.into(),
            items,
        }
    }
}

impl Countable for TypedCollection {
    fn count(&self) -> usize {
        self.items.len()
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// A dynamically typed parameter value.
///
/// Serialized untagged, so `null`, `3`, `"abc"`, `[1, 2]` and
/// `{"element": "Order", "items": []}` are all valid JSON forms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Text(String),
    /// Untyped countable collection.
    List(Vec<Value>),
    /// Typed countable collection.
    Collection(TypedCollection),
    /// Untyped keyed collection.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// True for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `None` for [`Value::Null`], `Some(self)` otherwise.
    #[must_use]
    pub fn present(&self) -> Option<&Self> {
        if self.is_null() { None } else { Some(self) }
    }

    /// Name of the runtime shape, used in configuration errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Collection(_) => "collection",
            Self::Map(_) => "map",
        }
    }

    /// Text content, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Natural ordering between two values.
    ///
    /// Defined within a kind (bool, text, numbers); `Int` and `Float`
    /// compare numerically. Everything else is incomparable.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => compare_int_float(*a, *b),
            (Self::Float(a), Self::Int(b)) => compare_int_float(*b, *a).map(Ordering::reverse),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// True when both values belong to kinds that have an ordering between
    /// them, regardless of the actual values (NaN included).
    #[must_use]
    pub fn is_comparable_with(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Bool(_), Self::Bool(_))
                | (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_))
                | (Self::Text(_), Self::Text(_))
        )
    }

    /// Element count for countable shapes.
    #[must_use]
    pub fn countable(&self) -> Option<&dyn Countable> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(items) => Some(items),
            Self::Collection(c) => Some(c),
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Exact ordering of an integer against a float; no rounding of either side.
fn compare_int_float(int: i64, float: f64) -> Option<Ordering> {
    // 2^63, the first float above every i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return None;
    }
    if float >= LIMIT {
        return Some(Ordering::Less);
    }
    if float < -LIMIT {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    Some(int.cmp(&(whole as i64)).then_with(|| {
        if float > whole {
            Ordering::Less
        } else if float < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }))
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => write!(f, "[{} items]", items.len()),
            Self::Collection(c) => write!(f, "[{} {} items]", c.items.len(), c.element),
            Self::Map(m) => write!(f, "{{{} entries}}", m.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<TypedCollection> for Value {
    fn from(value: TypedCollection) -> Self {
        Self::Collection(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            Json::String(s) => Self::Text(s),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => {
                // A two-key object naming an element type is a typed collection.
                if let (Some(Json::String(element)), Some(Json::Array(items)), 2) =
                    (map.get("element"), map.get("items"), map.len())
                {
                    return Self::Collection(TypedCollection::new(
                        element.clone(),
                        items.iter().cloned().map(Self::from).collect(),
                    ));
                }
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
