//! Interval primitive

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ContractError, ViolationKind};
use crate::policy::default_violation;

/// Error kind raised when no custom error type is configured.
pub const DEFAULT_KIND: ViolationKind = ViolationKind::ArgumentOutOfRange;

/// Whether a boundary value itself belongs to the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// The boundary is part of the interval.
    #[default]
    Inclusive,
    /// The boundary is excluded.
    Exclusive,
}

impl BoundaryMode {
    fn holds(self, ordering: Option<Ordering>) -> bool {
        match ordering {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => self == Self::Inclusive,
            Some(Ordering::Less) | None => false,
        }
    }
}

/// The min/max pair of an interval rule, each with its own boundary mode.
///
/// Either bound may be absent; that is a configuration error reported by
/// every check, whatever the value.
pub struct Bounds<'a, T: ?Sized> {
    /// Lower bound.
    pub min: Option<&'a T>,
    /// Whether `min` is part of the interval.
    pub min_mode: BoundaryMode,
    /// Upper bound.
    pub max: Option<&'a T>,
    /// Whether `max` is part of the interval.
    pub max_mode: BoundaryMode,
}

impl<'a, T: ?Sized> Bounds<'a, T> {
    /// Bounds with explicit modes.
    pub fn new(
        min: Option<&'a T>,
        min_mode: BoundaryMode,
        max: Option<&'a T>,
        max_mode: BoundaryMode,
    ) -> Self {
        Self {
            min,
            min_mode,
            max,
            max_mode,
        }
    }

    /// `[min, max]`.
    pub fn inclusive(min: &'a T, max: &'a T) -> Self {
        Self::new(Some(min), BoundaryMode::Inclusive, Some(max), BoundaryMode::Inclusive)
    }

    /// `]min, max[`.
    pub fn exclusive(min: &'a T, max: &'a T) -> Self {
        Self::new(Some(min), BoundaryMode::Exclusive, Some(max), BoundaryMode::Exclusive)
    }

    /// Both bounds, or the configuration error naming the absent one.
    pub fn require(&self) -> Result<(&'a T, &'a T), ConfigurationError> {
        let min = self.min.ok_or(ConfigurationError::MissingBound { bound: "min" })?;
        let max = self.max.ok_or(ConfigurationError::MissingBound { bound: "max" })?;
        Ok((min, max))
    }
}

impl<T: PartialOrd + ?Sized> Bounds<'_, T> {
    /// True when `value` lies inside the interval.
    ///
    /// Compares three-way against `min`, then against `max` with the sign
    /// inverted. Incomparable values are outside.
    pub fn contains(&self, value: &T) -> Result<bool, ConfigurationError> {
        let (min, max) = self.require()?;
        Ok(self.min_mode.holds(value.partial_cmp(min))
            && self.max_mode.holds(value.partial_cmp(max).map(Ordering::reverse)))
    }
}

impl<T: ?Sized> Clone for Bounds<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Bounds<'_, T> {}

impl<T: Display + ?Sized> Display for Bounds<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = match self.min_mode {
            BoundaryMode::Inclusive => '[',
            BoundaryMode::Exclusive => ']',
        };
        let close = match self.max_mode {
            BoundaryMode::Inclusive => ']',
            BoundaryMode::Exclusive => '[',
        };
        write!(f, "{open}")?;
        match self.min {
            Some(min) => write!(f, "{min}")?,
            None => f.write_str("?")?,
        }
        f.write_str(", ")?;
        match self.max {
            Some(max) => write!(f, "{max}")?,
            None => f.write_str("?")?,
        }
        write!(f, "{close}")
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for Bounds<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bounds")
            .field("min", &self.min)
            .field("min_mode", &self.min_mode)
            .field("max", &self.max)
            .field("max_mode", &self.max_mode)
            .finish()
    }
}

/// Default failure text, e.g. `The parameter 'x' must be in the interval [2, 5[`.
#[must_use]
pub fn default_message<T: Display + ?Sized>(parameter: &str, bounds: &Bounds<'_, T>) -> String {
    format!("The parameter '{parameter}' must be in the interval {bounds}")
}

/// Fails when `value` is present and lies outside `bounds`.
///
/// An absent bound is a [`ConfigurationError::MissingBound`] raised before
/// the value is inspected; an absent value is valid.
pub fn interval<T: PartialOrd + Display + ?Sized>(
    value: Option<&T>,
    bounds: &Bounds<'_, T>,
    parameter: &str,
    create: impl FnOnce(String) -> ContractError,
) -> Result<(), ContractError> {
    let (min, max) = bounds.require()?;

    let Some(value) = value else {
        return Ok(());
    };

    if bounds.contains(value)? {
        Ok(())
    } else {
        Err(match create(default_message(parameter, bounds)) {
            ContractError::Violation(v) => ContractError::Violation(
                v.with_param("min", min.to_string())
                    .with_param("max", max.to_string())
                    .with_param("actual", value.to_string()),
            ),
            other => other,
        })
    }
}

/// [`interval`] raising [`ViolationKind::ArgumentOutOfRange`] with the default text.
pub fn interval_default<T: PartialOrd + Display + ?Sized>(
    value: Option<&T>,
    bounds: &Bounds<'_, T>,
    parameter: &str,
) -> Result<(), ContractError> {
    interval(value, bounds, parameter, |message| {
        default_violation(DEFAULT_KIND, parameter, message)
    })
}

/// [`interval`] raising [`ViolationKind::ArgumentOutOfRange`] with a custom text.
pub fn interval_with_message<T: PartialOrd + Display + ?Sized>(
    value: Option<&T>,
    bounds: &Bounds<'_, T>,
    parameter: &str,
    message: impl Into<Cow<'static, str>>,
) -> Result<(), ContractError> {
    let message = message.into();
    interval(value, bounds, parameter, |_| {
        default_violation(DEFAULT_KIND, parameter, message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigurationError, ErrorKind};
    use rstest::rstest;

    #[rstest]
    #[case(2, BoundaryMode::Inclusive, BoundaryMode::Inclusive, true)]
    #[case(2, BoundaryMode::Exclusive, BoundaryMode::Inclusive, false)]
    #[case(3, BoundaryMode::Inclusive, BoundaryMode::Inclusive, true)]
    #[case(3, BoundaryMode::Inclusive, BoundaryMode::Exclusive, false)]
    #[case(1, BoundaryMode::Inclusive, BoundaryMode::Inclusive, false)]
    #[case(4, BoundaryMode::Inclusive, BoundaryMode::Inclusive, false)]
    fn boundary_modes(
        #[case] value: i32,
        #[case] min_mode: BoundaryMode,
        #[case] max_mode: BoundaryMode,
        #[case] valid: bool,
    ) {
        let bounds = Bounds::new(Some(&2), min_mode, Some(&3), max_mode);
        assert_eq!(interval_default(Some(&value), &bounds, "param1").is_ok(), valid);
    }

    #[test]
    fn inside_passes() {
        assert!(interval_default(Some(&2), &Bounds::inclusive(&1, &3), "param1").is_ok());
        assert!(interval_default(Some(&3), &Bounds::inclusive(&2, &5), "param1").is_ok());
    }

    #[test]
    fn inverted_bounds_reject_everything() {
        let err = interval_default(Some(&4), &Bounds::inclusive(&5, &3), "param1").unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::Violation(ViolationKind::ArgumentOutOfRange)
        );
        assert!(err.to_string().contains("must be in the interval"));
    }

    #[test]
    fn absent_value_is_valid() {
        assert!(interval_default(None, &Bounds::inclusive("aaa", "bbb"), "param1").is_ok());
    }

    #[test]
    fn absent_bound_is_configuration_error_even_for_absent_value() {
        let bounds = Bounds::new(None, BoundaryMode::Inclusive, Some(&3), BoundaryMode::Inclusive);
        let err = interval_default(None, &bounds, "param1").unwrap_err();
        assert!(matches!(
            err,
            ContractError::Configuration(ConfigurationError::MissingBound { bound: "min" })
        ));

        let bounds = Bounds::new(Some(&1), BoundaryMode::Inclusive, None, BoundaryMode::Inclusive);
        let err = interval_default(Some(&2), &bounds, "param1").unwrap_err();
        assert!(matches!(
            err,
            ContractError::Configuration(ConfigurationError::MissingBound { bound: "max" })
        ));
    }

    #[test]
    fn message_renders_boundary_notation() {
        let bounds = Bounds::new(
            Some(&2),
            BoundaryMode::Exclusive,
            Some(&5),
            BoundaryMode::Inclusive,
        );
        assert_eq!(
            default_message("count", &bounds),
            "The parameter 'count' must be in the interval ]2, 5]"
        );
        assert_eq!(
            default_message("count", &Bounds::inclusive(&2, &5)),
            "The parameter 'count' must be in the interval [2, 5]"
        );
        assert_eq!(
            default_message("count", &Bounds::exclusive(&2, &5)),
            "The parameter 'count' must be in the interval ]2, 5["
        );
    }

    #[test]
    fn violation_carries_params() {
        let err = interval_default(Some(&9), &Bounds::inclusive(&2, &5), "count").unwrap_err();
        let violation = err.as_violation().unwrap();
        assert_eq!(violation.param("min"), Some("2"));
        assert_eq!(violation.param("max"), Some("5"));
        assert_eq!(violation.param("actual"), Some("9"));
    }

    #[test]
    fn custom_factory_error_kind() {
        let err = interval(Some(&2), &Bounds::inclusive(&5, &3), "param1", |m| {
            default_violation(ViolationKind::Argument, "param1", m)
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Violation(ViolationKind::Argument));
    }

    #[test]
    fn custom_message_keeps_out_of_range_kind() {
        let err =
            interval_with_message(Some(&2), &Bounds::inclusive(&5, &3), "param1", "empty value")
                .unwrap_err();
        let violation = err.as_violation().unwrap();
        assert_eq!(violation.kind, ViolationKind::ArgumentOutOfRange);
        assert_eq!(violation.message, "empty value");
    }

    #[test]
    fn nan_is_outside() {
        assert!(interval_default(Some(&f64::NAN), &Bounds::inclusive(&0.0, &1.0), "x").is_err());
    }
}
