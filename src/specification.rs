//! Translation of filters into Sea-ORM conditions.
//!
//! Every filter produces a `Condition::all()` fragment holding one expression
//! per operation that is set. [`create_specification`] conjoins the fragments
//! of all fields present in a criteria. Empty fragments are skipped, so a
//! filter with nothing set behaves exactly like an absent one.
//!
//! | Operation | SQL |
//! |-----------|-----|
//! | `equals` | `col = v` |
//! | `notEquals` | `col <> v` (rows where `col` is NULL do not match) |
//! | `in` | `col IN (..)` |
//! | `notIn` | `col NOT IN (..)` |
//! | `specified=true/false` | `col IS NOT NULL` / `col IS NULL` |
//! | `greaterThan` .. `lessThanOrEqual` | `>`, `<`, `>=`, `<=` |
//! | `contains` | `UPPER(col) LIKE UPPER('%v%') ESCAPE '\'` |
//! | `doesNotContain` | `UPPER(col) NOT LIKE UPPER('%v%') ESCAPE '\'` |
//!
//! Both sides of a substring match are folded by the database's `UPPER`, so
//! case is ignored exactly as far as the backend folds it. SQLite folds ASCII
//! letters only.

use sea_orm::{
    Condition, Value,
    sea_query::{BinOper, Expr, Func, SimpleExpr},
};

use crate::criteria::Criteria;
use crate::filter::{Filter, FilterValue, RangeFilter, StringFilter};

/// A filter that can be turned into a condition on a column expression.
pub trait ToSpecification {
    /// Condition fragment for `column`; empty when the filter sets nothing.
    fn to_specification(&self, column: &SimpleExpr) -> Condition;
}

fn column_expr(column: &SimpleExpr) -> Expr {
    Expr::expr(column.clone())
}

fn to_values<T: FilterValue>(values: &[T]) -> Vec<Value> {
    values.iter().cloned().map(Into::into).collect()
}

/// Escape LIKE wildcards so the value matches literally.
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// `UPPER('%value%') ESCAPE '\'`, the right-hand side of a substring match.
fn contains_pattern(value: &str) -> SimpleExpr {
    let escaped = escape_like_wildcards(value);
    SimpleExpr::Binary(
        Box::new(Func::upper(Expr::val(format!("%{escaped}%"))).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant('\\'.into())),
    )
}

fn upper(column: &SimpleExpr) -> Expr {
    Expr::expr(Func::upper(column.clone()))
}

/// Build the fragment for the equality, membership and nullability operations.
#[must_use]
pub fn build_specification<T: FilterValue>(filter: &Filter<T>, column: &SimpleExpr) -> Condition {
    let mut condition = Condition::all();

    if let Some(value) = &filter.equals {
        let value: Value = value.clone().into();
        condition = condition.add(column_expr(column).eq(value));
    }
    if let Some(value) = &filter.not_equals {
        let value: Value = value.clone().into();
        condition = condition.add(column_expr(column).ne(value));
    }
    if let Some(values) = &filter.in_list {
        condition = condition.add(column_expr(column).is_in(to_values(values)));
    }
    if let Some(values) = &filter.not_in {
        condition = condition.add(column_expr(column).is_not_in(to_values(values)));
    }
    if let Some(specified) = filter.specified {
        condition = condition.add(if specified {
            column_expr(column).is_not_null()
        } else {
            column_expr(column).is_null()
        });
    }

    condition
}

/// Build the fragment for a range filter. All bounds that are set conjoin.
#[must_use]
pub fn build_range_specification<T: FilterValue>(
    filter: &RangeFilter<T>,
    column: &SimpleExpr,
) -> Condition {
    let mut condition = build_specification(&filter.filter, column);

    if let Some(value) = &filter.greater_than {
        let value: Value = value.clone().into();
        condition = condition.add(column_expr(column).gt(value));
    }
    if let Some(value) = &filter.greater_than_or_equal {
        let value: Value = value.clone().into();
        condition = condition.add(column_expr(column).gte(value));
    }
    if let Some(value) = &filter.less_than {
        let value: Value = value.clone().into();
        condition = condition.add(column_expr(column).lt(value));
    }
    if let Some(value) = &filter.less_than_or_equal {
        let value: Value = value.clone().into();
        condition = condition.add(column_expr(column).lte(value));
    }

    condition
}

/// Build the fragment for a string filter. Substring matching ignores case.
#[must_use]
pub fn build_string_specification(filter: &StringFilter, column: &SimpleExpr) -> Condition {
    let mut condition = build_specification(&filter.filter, column);

    if let Some(value) = &filter.contains {
        condition = condition.add(upper(column).binary(BinOper::Like, contains_pattern(value)));
    }
    if let Some(value) = &filter.does_not_contain {
        condition = condition.add(upper(column).binary(BinOper::NotLike, contains_pattern(value)));
    }

    condition
}

impl<T: FilterValue> ToSpecification for Filter<T> {
    fn to_specification(&self, column: &SimpleExpr) -> Condition {
        build_specification(self, column)
    }
}

impl<T: FilterValue> ToSpecification for RangeFilter<T> {
    fn to_specification(&self, column: &SimpleExpr) -> Condition {
        build_range_specification(self, column)
    }
}

impl ToSpecification for StringFilter {
    fn to_specification(&self, column: &SimpleExpr) -> Condition {
        build_string_specification(self, column)
    }
}

/// Conjoin the fragments of every field set in `criteria`.
///
/// `None`, or a criteria with no filter set, yields an empty
/// `Condition::all()`, which matches every row.
#[must_use]
pub fn create_specification<C: Criteria>(criteria: Option<&C>) -> Condition {
    let mut specification = Condition::all();
    let Some(criteria) = criteria else {
        return specification;
    };

    for (field, filter) in criteria.filters() {
        let Some(column) = C::column(field) else {
            continue;
        };
        let fragment = filter.to_specification(&Expr::col(column).into());
        if !fragment.is_empty() {
            specification = specification.add(fragment);
        }
    }

    specification
}
