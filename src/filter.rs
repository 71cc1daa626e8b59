//! # Filter Value Objects
//!
//! Typed descriptions of one field's matching condition. A filter carries an
//! optional value (or list of values) per operation; every operation that is
//! set must hold for a row to match.
//!
//! | Type | Operations |
//! |------|------------|
//! | [`Filter<T>`] | `equals`, `notEquals`, `in`, `notIn`, `specified` |
//! | [`RangeFilter<T>`] | the above plus `greaterThan`, `lessThan`, `greaterThanOrEqual`, `lessThanOrEqual` |
//! | [`StringFilter`] | the [`Filter`] operations plus `contains`, `doesNotContain` |
//!
//! A filter with every operation unset imposes no constraint.
//!
//! ```rust,ignore
//! use carcrate::filter::{DoubleFilter, StringFilter};
//!
//! let make = StringFilter::new().with_contains("oyo");
//! let price = DoubleFilter::new()
//!     .with_greater_than_or_equal(15_000.0)
//!     .with_less_than_or_equal(25_000.0);
//! ```

use sea_orm::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Values a filter can compare a column against.
///
/// Anything Sea-ORM can bind as a query parameter and that can be parsed back
/// from a query-string value qualifies.
pub trait FilterValue:
    Clone + PartialEq + fmt::Debug + fmt::Display + FromStr + Into<Value> + Send + Sync + 'static
{
}

impl<T> FilterValue for T where
    T: Clone + PartialEq + fmt::Debug + fmt::Display + FromStr + Into<Value> + Send + Sync + 'static
{
}

/// Equality, membership and nullability filter.
///
/// `in`/`notIn` hold a list rather than a set: floating point values have no
/// total order or hash, and duplicates are harmless in an `IN (...)` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<T>,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub in_list: Option<Vec<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_in: Option<Vec<T>>,
    /// `true`: the field must be non-null. `false`: the field must be null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specified: Option<bool>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            in_list: None,
            not_in: None,
            specified: None,
        }
    }
}

impl<T: Clone> Filter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value-identical clone that can be mutated independently.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// True when no operation is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.equals.is_none()
            && self.not_equals.is_none()
            && self.in_list.is_none()
            && self.not_in.is_none()
            && self.specified.is_none()
    }

    #[must_use]
    pub fn with_equals(mut self, value: impl Into<T>) -> Self {
        self.equals = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_not_equals(mut self, value: impl Into<T>) -> Self {
        self.not_equals = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_in<V: Into<T>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.in_list = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_not_in<V: Into<T>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.not_in = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }
}

/// Filter over a field with a natural ordering (numbers, identifiers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter<T> {
    #[serde(flatten)]
    pub filter: Filter<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            greater_than: None,
            less_than: None,
            greater_than_or_equal: None,
            less_than_or_equal: None,
        }
    }
}

/// Filter over a text field, adding case-insensitive substring matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    #[serde(flatten)]
    pub filter: Filter<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub does_not_contain: Option<String>,
}

pub type BooleanFilter = Filter<bool>;
pub type IntegerFilter = RangeFilter<i32>;
pub type LongFilter = RangeFilter<i64>;
pub type FloatFilter = RangeFilter<f32>;
pub type DoubleFilter = RangeFilter<f64>;

/// Builder setters shared by the composite filters, forwarded to the inner [`Filter`].
macro_rules! forward_base_setters {
    ($value:ty) => {
        #[must_use]
        pub fn with_equals(mut self, value: impl Into<$value>) -> Self {
            self.filter = self.filter.with_equals(value);
            self
        }

        #[must_use]
        pub fn with_not_equals(mut self, value: impl Into<$value>) -> Self {
            self.filter = self.filter.with_not_equals(value);
            self
        }

        #[must_use]
        pub fn with_in<V: Into<$value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
            self.filter = self.filter.with_in(values);
            self
        }

        #[must_use]
        pub fn with_not_in<V: Into<$value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
            self.filter = self.filter.with_not_in(values);
            self
        }

        #[must_use]
        pub fn with_specified(mut self, specified: bool) -> Self {
            self.filter = self.filter.with_specified(specified);
            self
        }
    };
}

impl<T: Clone> RangeFilter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.greater_than.is_none()
            && self.less_than.is_none()
            && self.greater_than_or_equal.is_none()
            && self.less_than_or_equal.is_none()
    }

    forward_base_setters!(T);

    #[must_use]
    pub fn with_greater_than(mut self, value: impl Into<T>) -> Self {
        self.greater_than = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_less_than(mut self, value: impl Into<T>) -> Self {
        self.less_than = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_greater_than_or_equal(mut self, value: impl Into<T>) -> Self {
        self.greater_than_or_equal = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_less_than_or_equal(mut self, value: impl Into<T>) -> Self {
        self.less_than_or_equal = Some(value.into());
        self
    }
}

impl StringFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty() && self.contains.is_none() && self.does_not_contain.is_none()
    }

    forward_base_setters!(String);

    #[must_use]
    pub fn with_contains(mut self, value: impl Into<String>) -> Self {
        self.contains = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_does_not_contain(mut self, value: impl Into<String>) -> Self {
        self.does_not_contain = Some(value.into());
        self
    }
}

// Display renders `Name [op=value, op=value]` listing only the operations
// that are set. Used when criteria are written to the debug log.

fn write_list<T: fmt::Display>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

impl<T: fmt::Display> Filter<T> {
    fn parts(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(value) = &self.equals {
            parts.push(format!("equals={value}"));
        }
        if let Some(value) = &self.not_equals {
            parts.push(format!("notEquals={value}"));
        }
        if let Some(values) = &self.in_list {
            parts.push(format!("in={}", write_list(values)));
        }
        if let Some(values) = &self.not_in {
            parts.push(format!("notIn={}", write_list(values)));
        }
        if let Some(specified) = self.specified {
            parts.push(format!("specified={specified}"));
        }
        parts
    }
}

impl<T: fmt::Display> RangeFilter<T> {
    fn parts(&self) -> Vec<String> {
        let mut parts = self.filter.parts();
        if let Some(value) = &self.greater_than {
            parts.push(format!("greaterThan={value}"));
        }
        if let Some(value) = &self.less_than {
            parts.push(format!("lessThan={value}"));
        }
        if let Some(value) = &self.greater_than_or_equal {
            parts.push(format!("greaterThanOrEqual={value}"));
        }
        if let Some(value) = &self.less_than_or_equal {
            parts.push(format!("lessThanOrEqual={value}"));
        }
        parts
    }
}

impl StringFilter {
    fn parts(&self) -> Vec<String> {
        let mut parts = self.filter.parts();
        if let Some(value) = &self.contains {
            parts.push(format!("contains={value}"));
        }
        if let Some(value) = &self.does_not_contain {
            parts.push(format!("doesNotContain={value}"));
        }
        parts
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Filter [{}]", self.parts().join(", "))
    }
}

impl<T: fmt::Display> fmt::Display for RangeFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangeFilter [{}]", self.parts().join(", "))
    }
}

impl fmt::Display for StringFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringFilter [{}]", self.parts().join(", "))
    }
}
