//! Declaration metadata
//!
//! The read-only view of a compiled module that the advisor scans: named
//! types with their capabilities, methods with their parameters, and
//! properties with their setters. Everything here is data; the behaviour
//! that consumes it lives in [`crate::validator`] and [`crate::advisor`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use warden_validator::policy::ErrorConstructor;

use crate::attribute::Attribute;

/// Optional wrappers nested deeper than this are treated as unresolvable.
const MAX_WRAPPER_DEPTH: usize = 16;

// ============================================================================
// TYPES
// ============================================================================

/// The name of a declared type, e.g. `i32`, `String` or `Vec<Order>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(Arc<str>);

impl TypeRef {
    /// Creates a type reference.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

/// Something a type can do, as far as the validators are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Has a natural total ordering.
    Ordered,
    /// Is text.
    Text,
    /// Has an element count, element type unknown.
    Countable,
    /// Has an element count and a known element type.
    CollectionOf(TypeRef),
    /// Is an error type.
    Error,
    /// Can be constructed from a single message.
    MessageConstructor,
}

/// How values of a type are held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    /// Nullable reference.
    #[default]
    Reference,
    /// Plain value, never absent.
    Value,
    /// Optional wrapper around the named type.
    Optional(TypeRef),
    /// An abstract capability rather than a concrete type, e.g. `impl Ord`.
    /// Never absent. A parameter typed as an interface or trait object
    /// holds a reference, so declare it as `Reference` with capabilities.
    Capability(Capability),
}

/// A declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    /// Type name.
    pub name: TypeRef,
    /// Value representation.
    #[serde(default)]
    pub shape: TypeShape,
    /// Implemented capabilities.
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

impl TypeDecl {
    /// A reference type without capabilities.
    pub fn new(name: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Reference,
            capabilities: Vec::new(),
        }
    }

    /// Sets the shape.
    pub fn with_shape(mut self, shape: TypeShape) -> Self {
        self.shape = shape;
        self
    }

    /// Adds a capability.
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// The type's own capability (for capability shapes) followed by the
    /// implemented ones.
    pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        let own = match &self.shape {
            TypeShape::Capability(c) => Some(c),
            _ => None,
        };
        own.into_iter().chain(self.capabilities.iter())
    }

    /// True when the type has `capability`.
    #[must_use]
    pub fn has(&self, capability: &Capability) -> bool {
        self.capabilities().any(|c| c == capability)
    }

    /// True when values of the type may be absent.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        matches!(self.shape, TypeShape::Reference | TypeShape::Optional(_))
    }
}

// ============================================================================
// MEMBERS
// ============================================================================

/// A method parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterDecl {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Annotations on the parameter.
    #[serde(default, skip_serializing)]
    pub attributes: Vec<Attribute>,
}

impl ParameterDecl {
    /// A parameter without annotations.
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            attributes: Vec::new(),
        }
    }

    /// Adds an annotation.
    pub fn with_attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attributes.push(attribute.into());
        self
    }
}

/// A method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDecl {
    /// Method name.
    pub name: String,
    /// Type the method is declared on.
    pub declaring_type: TypeRef,
    /// Parameters in ordinal order.
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    /// Annotations on the method itself.
    #[serde(default, skip_serializing)]
    pub attributes: Vec<Attribute>,
}

impl MethodDecl {
    /// A method without parameters or annotations.
    pub fn new(declaring_type: impl Into<TypeRef>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring_type: declaring_type.into(),
            parameters: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn with_parameter(mut self, parameter: ParameterDecl) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Adds a method-level annotation.
    pub fn with_attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Handle used by join points.
    #[must_use]
    pub fn reference(&self) -> MethodRef {
        MethodRef {
            declaring_type: self.declaring_type.clone(),
            name: self.name.clone(),
            parameters: self
                .parameters
                .iter()
                .enumerate()
                .map(|(ordinal, p)| ParameterRef::new(ordinal, p.name.clone()))
                .collect(),
        }
    }
}

/// A property. Only writable properties have a setter to intercept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDecl {
    /// Property name.
    pub name: String,
    /// Type the property is declared on.
    pub declaring_type: TypeRef,
    /// Property type; also the type of the setter's value parameter.
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Whether a setter exists.
    #[serde(default = "default_writable")]
    pub writable: bool,
    /// Annotations on the property.
    #[serde(default, skip_serializing)]
    pub attributes: Vec<Attribute>,
}

const fn default_writable() -> bool {
    true
}

impl PropertyDecl {
    /// A writable property without annotations.
    pub fn new(
        declaring_type: impl Into<TypeRef>,
        name: impl Into<String>,
        ty: impl Into<TypeRef>,
    ) -> Self {
        Self {
            name: name.into(),
            declaring_type: declaring_type.into(),
            ty: ty.into(),
            writable: true,
            attributes: Vec::new(),
        }
    }

    /// Marks the property read-only.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Adds an annotation.
    pub fn with_attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// The setter, taking the new value as parameter `value` at ordinal 0.
    #[must_use]
    pub fn setter(&self) -> Option<MethodRef> {
        self.writable.then(|| MethodRef {
            declaring_type: self.declaring_type.clone(),
            name: format!("set_{}", self.name),
            parameters: SmallVec::from_iter([ParameterRef::new(0, SETTER_VALUE)]),
        })
    }
}

/// Name of a setter's value parameter.
pub const SETTER_VALUE: &str = "value";

// ============================================================================
// REFERENCES
// ============================================================================

/// A parameter position and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterRef {
    /// Zero-based position in the argument list.
    pub ordinal: usize,
    /// Parameter name, used in failure messages.
    pub name: String,
}

impl ParameterRef {
    /// Creates a parameter reference.
    pub fn new(ordinal: usize, name: impl Into<String>) -> Self {
        Self {
            ordinal,
            name: name.into(),
        }
    }
}

/// Parameter list of a method reference; most methods have only a few.
pub type ParameterList = SmallVec<[ParameterRef; 4]>;

/// A method identity plus its signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodRef {
    /// Declaring type.
    pub declaring_type: TypeRef,
    /// Method name.
    pub name: String,
    /// All parameters in ordinal order.
    pub parameters: ParameterList,
}

impl MethodRef {
    /// True when this refers to `declaring_type::name`.
    #[must_use]
    pub fn is(&self, declaring_type: &str, name: &str) -> bool {
        self.declaring_type.as_str() == declaring_type && self.name == name
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.declaring_type, self.name)
    }
}

/// Where an annotation was found, and the type it is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationSite {
    /// A method parameter.
    Parameter {
        /// Owning method.
        method: MethodRef,
        /// The parameter.
        parameter: ParameterRef,
        /// Declared type of the parameter.
        ty: TypeRef,
    },
    /// The value parameter of a property setter.
    PropertySetter {
        /// The setter.
        setter: MethodRef,
        /// Property name.
        property: String,
        /// Property type.
        ty: TypeRef,
    },
    /// A method as a whole; annotations here cover every parameter.
    Method {
        /// The method.
        method: MethodRef,
    },
}

impl DeclarationSite {
    /// The type a value at this site has; `None` for whole-method sites.
    #[must_use]
    pub fn declared_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Parameter { ty, .. } | Self::PropertySetter { ty, .. } => Some(ty),
            Self::Method { .. } => None,
        }
    }

    /// The method owning this site.
    #[must_use]
    pub fn method(&self) -> &MethodRef {
        match self {
            Self::Parameter { method, .. } | Self::Method { method } => method,
            Self::PropertySetter { setter, .. } => setter,
        }
    }
}

impl fmt::Display for DeclarationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter {
                method, parameter, ..
            } => write!(f, "parameter '{}' of {method}", parameter.name),
            Self::PropertySetter {
                setter, property, ..
            } => write!(f, "property '{property}' ({setter})"),
            Self::Method { method } => write!(f, "method {method}"),
        }
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// Read access to a module's declarations.
pub trait DeclarationModel {
    /// Looks up a type by name.
    fn type_decl(&self, ty: &TypeRef) -> Option<&TypeDecl>;

    /// All methods, in declaration order.
    fn methods(&self) -> &[MethodDecl];

    /// All properties, in declaration order.
    fn properties(&self) -> &[PropertyDecl];

    /// The message constructor of an error type, if it can be instantiated.
    fn error_constructor(&self, ty: &TypeRef) -> Option<ErrorConstructor>;

    /// The type behind any number of optional wrappers.
    fn underlying(&self, ty: &TypeRef) -> Option<&TypeDecl> {
        let mut decl = self.type_decl(ty)?;
        for _ in 0..MAX_WRAPPER_DEPTH {
            match &decl.shape {
                TypeShape::Optional(inner) => decl = self.type_decl(inner)?,
                _ => return Some(decl),
            }
        }
        None
    }

    /// True when `ty`, or the type it wraps, has `capability`.
    fn has_capability(&self, ty: &TypeRef, capability: &Capability) -> bool {
        self.type_decl(ty).is_some_and(|d| d.has(capability))
            || self.underlying(ty).is_some_and(|d| d.has(capability))
    }

    /// True when values of `ty` may be absent.
    fn is_nullable(&self, ty: &TypeRef) -> bool {
        self.type_decl(ty).is_some_and(TypeDecl::is_nullable)
    }
}
