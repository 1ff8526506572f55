//! In-memory declaration model
//!
//! [`Module`] is the concrete [`DeclarationModel`] the advisor scans. It is
//! built in code or loaded from a JSON or TOML manifest.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use warden_validator::policy::ErrorConstructor;

use crate::error::ManifestError;
use crate::metadata::{
    Capability, DeclarationModel, MethodDecl, PropertyDecl, TypeDecl, TypeRef, TypeShape,
};

/// Error raised for custom error types that have no registered constructor
/// but declare a message constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    /// Declared type name.
    pub type_name: String,
    /// Failure text.
    pub message: String,
}

const ORDERED_VALUES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
    "usize", "f32", "f64",
];

/// A module's declarations.
#[derive(Debug, Default)]
pub struct Module {
    types: IndexMap<TypeRef, TypeDecl>,
    methods: Vec<MethodDecl>,
    properties: Vec<PropertyDecl>,
    constructors: HashMap<TypeRef, ErrorConstructor>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    types: Vec<TypeDecl>,
    #[serde(default)]
    methods: Vec<MethodDecl>,
    #[serde(default)]
    properties: Vec<PropertyDecl>,
}

impl Module {
    /// An empty module.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A module declaring the primitive scalar and text types, each also
    /// wrapped in `Option<..>`.
    #[must_use]
    pub fn with_primitives() -> Self {
        let mut module = Self::new();
        for name in ORDERED_VALUES {
            module = module.with_type(
                TypeDecl::new(*name)
                    .with_shape(TypeShape::Value)
                    .with_capability(Capability::Ordered),
            );
        }
        for name in ["String", "&str"] {
            module = module.with_type(
                TypeDecl::new(name)
                    .with_capability(Capability::Text)
                    .with_capability(Capability::Ordered),
            );
        }
        for name in ORDERED_VALUES.iter().copied().chain(["String"]) {
            module = module.with_type(
                TypeDecl::new(format!("Option<{name}>")).with_shape(TypeShape::Optional(name.into())),
            );
        }
        module
    }

    /// Declares a type, replacing any declaration with the same name.
    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.insert(decl.name.clone(), decl);
        self
    }

    /// Declares a method.
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Declares a property.
    pub fn with_property(mut self, property: PropertyDecl) -> Self {
        self.properties.push(property);
        self
    }

    /// Registers the constructor for a custom error type.
    ///
    /// Takes precedence over the generic [`HostError`] fallback.
    pub fn register_error(&mut self, constructor: ErrorConstructor) -> &mut Self {
        self.constructors
            .insert(TypeRef::new(constructor.type_name()), constructor);
        self
    }

    /// Declared types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values()
    }

    /// Parses a JSON manifest on top of the primitive types.
    pub fn from_json_str(source: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = serde_json::from_str(source)?;
        Ok(Self::from_manifest(manifest))
    }

    /// Parses a TOML manifest on top of the primitive types.
    pub fn from_toml_str(source: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(source)?;
        Ok(Self::from_manifest(manifest))
    }

    /// Loads a manifest, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let module = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&source)?,
            Some("toml") => Self::from_toml_str(&source)?,
            _ => {
                return Err(ManifestError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        tracing::debug!(
            path = %path.display(),
            types = module.types.len(),
            methods = module.methods.len(),
            properties = module.properties.len(),
            "loaded manifest"
        );
        Ok(module)
    }

    fn from_manifest(manifest: Manifest) -> Self {
        let mut module = Self::with_primitives();
        for decl in manifest.types {
            module = module.with_type(decl);
        }
        module.methods = manifest.methods;
        module.properties = manifest.properties;
        module
    }
}

impl DeclarationModel for Module {
    fn type_decl(&self, ty: &TypeRef) -> Option<&TypeDecl> {
        self.types.get(ty)
    }

    fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    fn properties(&self) -> &[PropertyDecl] {
        &self.properties
    }

    fn error_constructor(&self, ty: &TypeRef) -> Option<ErrorConstructor> {
        if let Some(constructor) = self.constructors.get(ty) {
            return Some(constructor.clone());
        }
        let decl = self.types.get(ty)?;
        if !decl.has(&Capability::Error) || !decl.has(&Capability::MessageConstructor) {
            return None;
        }
        let type_name = ty.to_string();
        Some(ErrorConstructor::of(type_name.clone(), move |message| HostError {
            type_name: type_name.clone(),
            message,
        }))
    }
}
