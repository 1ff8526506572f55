//! Element-type specialization
//!
//! A `NotEmpty` on a typed collection is bound at weave time to a check
//! closed over the collection's element type. The check is built once per
//! annotation instance and shared from then on.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use warden_validator::error::{ConfigurationError, ContractError};
use warden_validator::policy::FailurePolicy;
use warden_validator::primitives::{self, not_empty};
use warden_validator::value::Value;

use crate::metadata::{Capability, DeclarationModel, TypeRef, TypeShape};

/// Element type of a typed collection, looking through optional wrappers.
///
/// A type that is itself an abstract collection capability wins over the
/// capabilities it implements.
pub fn element_type_of(model: &dyn DeclarationModel, ty: &TypeRef) -> Option<TypeRef> {
    let decl = model.underlying(ty)?;
    if let TypeShape::Capability(Capability::CollectionOf(element)) = &decl.shape {
        return Some(element.clone());
    }
    decl.capabilities.iter().find_map(|c| match c {
        Capability::CollectionOf(element) => Some(element.clone()),
        _ => None,
    })
}

type CheckFn = dyn Fn(&Value, &str) -> Result<(), ContractError> + Send + Sync;

/// A `NotEmpty` check bound to one element type and one failure policy.
#[derive(Clone)]
pub struct SpecializedCheck {
    element: TypeRef,
    check: Arc<CheckFn>,
}

impl SpecializedCheck {
    /// Builds the check for collections of `element`.
    ///
    /// Collections of any other element type are rejected with
    /// [`ConfigurationError::ElementTypeMismatch`]; absent values pass.
    pub fn build(element: TypeRef, policy: FailurePolicy) -> Self {
        tracing::debug!(element = %element, "building specialized not-empty check");
        let bound = element.clone();
        let check = move |value: &Value, parameter: &str| -> Result<(), ContractError> {
            match value {
                Value::Null => Ok(()),
                Value::Collection(collection) if collection.element == bound.as_str() => {
                    primitives::not_empty(
                        Some(collection),
                        parameter,
                        policy.factory(not_empty::DEFAULT_KIND, parameter),
                    )
                }
                Value::Collection(collection) => Err(ConfigurationError::ElementTypeMismatch {
                    expected: bound.to_string(),
                    found: collection.element.clone(),
                }
                .into()),
                other => Err(ConfigurationError::ValueMismatch {
                    expected: Cow::Owned(format!("collection of {bound}")),
                    found: Cow::Borrowed(other.kind()),
                }
                .into()),
            }
        };
        Self {
            element,
            check: Arc::new(check),
        }
    }

    /// The bound element type.
    #[must_use]
    pub fn element(&self) -> &TypeRef {
        &self.element
    }

    /// Runs the check.
    pub fn check(&self, value: &Value, parameter: &str) -> Result<(), ContractError> {
        (self.check)(value, parameter)
    }

    /// True when both handles share the same built check.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.check, &other.check)
    }
}

impl fmt::Debug for SpecializedCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecializedCheck")
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Module;
    use crate::metadata::TypeDecl;
    use warden_validator::error::ViolationKind;
    use warden_validator::value::TypedCollection;

    fn model() -> Module {
        Module::new()
            .with_type(TypeDecl::new("Vec<Order>").with_capability(Capability::CollectionOf("Order".into())))
            .with_type(
                TypeDecl::new("Option<Vec<Order>>")
                    .with_shape(TypeShape::Optional("Vec<Order>".into())),
            )
            .with_type(
                TypeDecl::new("impl Collection<Item>")
                    .with_shape(TypeShape::Capability(Capability::CollectionOf("Item".into())))
                    .with_capability(Capability::CollectionOf("Other".into())),
            )
            .with_type(TypeDecl::new("Vec<u8>").with_capability(Capability::Countable))
    }

    #[test]
    fn element_type_resolution() {
        let model = model();
        assert_eq!(element_type_of(&model, &"Vec<Order>".into()), Some("Order".into()));
        assert_eq!(element_type_of(&model, &"Option<Vec<Order>>".into()), Some("Order".into()));
        assert_eq!(element_type_of(&model, &"impl Collection<Item>".into()), Some("Item".into()));
        assert_eq!(element_type_of(&model, &"Vec<u8>".into()), None);
        assert_eq!(element_type_of(&model, &"missing".into()), None);
    }

    #[test]
    fn specialized_check_accepts_bound_element_type() {
        let check = SpecializedCheck::build("Order".into(), FailurePolicy::Default);
        let full = Value::Collection(TypedCollection::new("Order", vec![Value::Int(1)]));
        let empty = Value::Collection(TypedCollection::new("Order", vec![]));

        assert!(check.check(&full, "orders").is_ok());
        assert!(check.check(&Value::Null, "orders").is_ok());
        let err = check.check(&empty, "orders").unwrap_err();
        assert_eq!(err.as_violation().unwrap().kind, ViolationKind::Argument);
        assert_eq!(err.parameter(), Some("orders"));
    }

    #[test]
    fn specialized_check_rejects_other_element_type() {
        let check = SpecializedCheck::build("Order".into(), FailurePolicy::Default);
        let other = Value::Collection(TypedCollection::new("Invoice", vec![]));
        let err = check.check(&other, "orders").unwrap_err();
        assert!(matches!(
            err,
            ContractError::Configuration(ConfigurationError::ElementTypeMismatch { .. })
        ));
        assert!(check.check(&Value::Int(1), "orders").unwrap_err().is_configuration());
    }

    #[test]
    fn clones_share_the_instance() {
        let check = SpecializedCheck::build("Order".into(), FailurePolicy::Default);
        let other = SpecializedCheck::build("Order".into(), FailurePolicy::Default);
        assert!(check.same_instance(&check.clone()));
        assert!(!check.same_instance(&other));
    }
}
