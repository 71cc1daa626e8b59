//! Binding of `field.operation=value` query parameters onto a criteria.
//!
//! ```text
//! GET /api/cars?id.greaterThan=5&make.contains=oyo&model.specified=false
//! GET /api/cars?price.in=20000,25000
//! ```
//!
//! Parameters without a dot (`page`, `size`, `sort`) and parameters naming an
//! unknown field are left for other extractors. An operation the field's filter
//! does not offer is skipped. A value that does not parse for the field's type
//! is an error.

use std::fmt;
use std::str::FromStr;

use crate::criteria::Criteria;
use crate::errors::FilterError;
use crate::filter::{Filter, FilterValue, RangeFilter, StringFilter};

const MAX_FIELD_VALUE_LENGTH: usize = 10_000;

/// The operation suffix vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperation {
    Equals,
    NotEquals,
    In,
    NotIn,
    Specified,
    Contains,
    DoesNotContain,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl FilterOperation {
    pub const ALL: [Self; 11] = [
        Self::Equals,
        Self::NotEquals,
        Self::In,
        Self::NotIn,
        Self::Specified,
        Self::Contains,
        Self::DoesNotContain,
        Self::GreaterThan,
        Self::LessThan,
        Self::GreaterThanOrEqual,
        Self::LessThanOrEqual,
    ];

    /// Parse the suffix after the dot, e.g. `greaterThanOrEqual`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operation| operation.name() == name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Specified => "specified",
            Self::Contains => "contains",
            Self::DoesNotContain => "doesNotContain",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThanOrEqual => "lessThanOrEqual",
        }
    }
}

impl fmt::Display for FilterOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A filter that accepts operation values parsed from query parameters.
pub trait BindOperation {
    /// Set `operation` from its raw parameter value.
    ///
    /// Returns `Ok(false)` when this kind of filter has no such operation.
    /// List operations (`in`, `notIn`) append, so repeated parameters accumulate.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidValue`] when `raw` does not parse.
    fn bind(&mut self, field: &str, operation: FilterOperation, raw: &str)
    -> Result<bool, FilterError>;
}

/// Split `make.contains` into `("make", "contains")`.
#[must_use]
pub fn parse_dot_notation(key: &str) -> Option<(&str, &str)> {
    let (field, operation) = key.split_once('.')?;
    if field.is_empty() || operation.is_empty() {
        return None;
    }
    Some((field, operation))
}

fn parse_value<T: FromStr>(field: &str, operation: FilterOperation, raw: &str) -> Result<T, FilterError> {
    raw.trim().parse().map_err(|_| FilterError::InvalidValue {
        field: field.to_string(),
        operation,
        value: raw.to_string(),
    })
}

fn append_values<T: FromStr>(
    target: &mut Option<Vec<T>>,
    field: &str,
    operation: FilterOperation,
    raw: &str,
) -> Result<(), FilterError> {
    let parsed = raw
        .split(',')
        .map(|part| parse_value(field, operation, part))
        .collect::<Result<Vec<T>, _>>()?;
    target.get_or_insert_with(Vec::new).extend(parsed);
    Ok(())
}

impl<T: FilterValue> BindOperation for Filter<T> {
    fn bind(&mut self, field: &str, operation: FilterOperation, raw: &str) -> Result<bool, FilterError> {
        match operation {
            FilterOperation::Equals => self.equals = Some(parse_value(field, operation, raw)?),
            FilterOperation::NotEquals => self.not_equals = Some(parse_value(field, operation, raw)?),
            FilterOperation::In => append_values(&mut self.in_list, field, operation, raw)?,
            FilterOperation::NotIn => append_values(&mut self.not_in, field, operation, raw)?,
            FilterOperation::Specified => self.specified = Some(parse_value(field, operation, raw)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl<T: FilterValue> BindOperation for RangeFilter<T> {
    fn bind(&mut self, field: &str, operation: FilterOperation, raw: &str) -> Result<bool, FilterError> {
        let bound = match operation {
            FilterOperation::GreaterThan => &mut self.greater_than,
            FilterOperation::LessThan => &mut self.less_than,
            FilterOperation::GreaterThanOrEqual => &mut self.greater_than_or_equal,
            FilterOperation::LessThanOrEqual => &mut self.less_than_or_equal,
            _ => return self.filter.bind(field, operation, raw),
        };
        *bound = Some(parse_value(field, operation, raw)?);
        Ok(true)
    }
}

impl BindOperation for StringFilter {
    fn bind(&mut self, field: &str, operation: FilterOperation, raw: &str) -> Result<bool, FilterError> {
        // Text values are taken verbatim, only list operations split on commas.
        match operation {
            FilterOperation::Contains => self.contains = Some(raw.to_string()),
            FilterOperation::DoesNotContain => self.does_not_contain = Some(raw.to_string()),
            FilterOperation::Equals => self.filter.equals = Some(raw.to_string()),
            FilterOperation::NotEquals => self.filter.not_equals = Some(raw.to_string()),
            _ => return self.filter.bind(field, operation, raw),
        }
        Ok(true)
    }
}

/// Build a criteria from raw query pairs.
///
/// # Errors
///
/// Returns a [`FilterError`] when a value is too long or cannot be parsed for
/// its field's type.
pub fn parse_criteria<C: Criteria>(pairs: &[(String, String)]) -> Result<C, FilterError> {
    let mut criteria = C::default();

    for (key, value) in pairs {
        let Some((field, operation_name)) = parse_dot_notation(key) else {
            continue;
        };
        if C::column(field).is_none() {
            tracing::debug!(field, "Ignoring filter on unknown field");
            continue;
        }
        let Some(operation) = FilterOperation::from_name(operation_name) else {
            tracing::debug!(field, operation = operation_name, "Ignoring unknown filter operation");
            continue;
        };
        if value.len() > MAX_FIELD_VALUE_LENGTH {
            return Err(FilterError::ValueTooLong {
                field: field.to_string(),
                max: MAX_FIELD_VALUE_LENGTH,
            });
        }
        let Some(filter) = criteria.filter_mut(field) else {
            continue;
        };
        if !filter.bind(field, operation, value)? {
            tracing::debug!(field, %operation, "Filter does not support operation");
        }
    }

    Ok(criteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::car::CarCriteria;
    use crate::filter::{DoubleFilter, LongFilter};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_operation_names_round_trip() {
        for operation in FilterOperation::ALL {
            assert_eq!(FilterOperation::from_name(operation.name()), Some(operation));
        }
        assert_eq!(FilterOperation::from_name("like"), None);
        assert_eq!(FilterOperation::GreaterThanOrEqual.to_string(), "greaterThanOrEqual");
    }

    #[test]
    fn test_parse_dot_notation() {
        assert_eq!(parse_dot_notation("price.greaterThan"), Some(("price", "greaterThan")));
        assert_eq!(parse_dot_notation("page"), None);
        assert_eq!(parse_dot_notation(".equals"), None);
        assert_eq!(parse_dot_notation("make."), None);
    }

    #[test]
    fn test_parse_documented_examples() {
        let criteria: CarCriteria = parse_criteria(&pairs(&[
            ("price.greaterThanOrEqual", "5"),
            ("make.contains", "foo"),
            ("id.specified", "true"),
        ]))
        .unwrap();

        assert_eq!(
            criteria,
            CarCriteria {
                id: Some(LongFilter::new().with_specified(true)),
                make: Some(StringFilter::new().with_contains("foo")),
                model: None,
                price: Some(DoubleFilter::new().with_greater_than_or_equal(5.0)),
            }
        );
    }

    #[test]
    fn test_in_values_split_and_accumulate() {
        let criteria: CarCriteria = parse_criteria(&pairs(&[
            ("price.in", "20000,25000"),
            ("price.in", "30000"),
            ("make.notIn", "Honda,Ford"),
        ]))
        .unwrap();

        let price = criteria.price.unwrap();
        assert_eq!(price.filter.in_list, Some(vec![20000.0, 25000.0, 30000.0]));
        let make = criteria.make.unwrap();
        assert_eq!(make.filter.not_in, Some(vec!["Honda".to_string(), "Ford".to_string()]));
    }

    #[test]
    fn test_all_range_operations_bind() {
        let criteria: CarCriteria = parse_criteria(&pairs(&[
            ("id.equals", "1"),
            ("id.notEquals", "2"),
            ("id.greaterThan", "0"),
            ("id.lessThan", "10"),
            ("id.greaterThanOrEqual", "1"),
            ("id.lessThanOrEqual", "9"),
        ]))
        .unwrap();

        let id = criteria.id.unwrap();
        assert_eq!(id.filter.equals, Some(1));
        assert_eq!(id.filter.not_equals, Some(2));
        assert_eq!(id.greater_than, Some(0));
        assert_eq!(id.less_than, Some(10));
        assert_eq!(id.greater_than_or_equal, Some(1));
        assert_eq!(id.less_than_or_equal, Some(9));
    }

    #[test]
    fn test_string_values_are_verbatim() {
        let criteria: CarCriteria =
            parse_criteria(&pairs(&[("model.equals", " Land Cruiser "), ("model.doesNotContain", "x")]))
                .unwrap();
        let model = criteria.model.unwrap();
        assert_eq!(model.filter.equals.as_deref(), Some(" Land Cruiser "));
        assert_eq!(model.does_not_contain.as_deref(), Some("x"));
    }

    #[test]
    fn test_unrelated_parameters_are_ignored() {
        let criteria: CarCriteria = parse_criteria(&pairs(&[
            ("page", "0"),
            ("size", "20"),
            ("sort", "id,desc"),
            ("colour.equals", "red"),
        ]))
        .unwrap();
        assert_eq!(criteria, CarCriteria::default());
    }

    #[test]
    fn test_unsupported_operation_leaves_empty_filter() {
        let criteria: CarCriteria =
            parse_criteria(&pairs(&[("price.contains", "1"), ("make.between", "a")])).unwrap();
        assert_eq!(criteria.price, Some(DoubleFilter::new()));
        assert!(criteria.make.is_none());
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let err = parse_criteria::<CarCriteria>(&pairs(&[("price.greaterThan", "cheap")])).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidValue {
                field: "price".to_string(),
                operation: FilterOperation::GreaterThan,
                value: "cheap".to_string(),
            }
        );

        assert!(parse_criteria::<CarCriteria>(&pairs(&[("id.in", "1,two")])).is_err());
        assert!(parse_criteria::<CarCriteria>(&pairs(&[("make.specified", "yes")])).is_err());
    }

    #[test]
    fn test_overlong_value_is_rejected() {
        let long = "a".repeat(MAX_FIELD_VALUE_LENGTH + 1);
        let err = parse_criteria::<CarCriteria>(&[("make.contains".to_string(), long)]).unwrap_err();
        assert!(matches!(err, FilterError::ValueTooLong { .. }));
    }
}
