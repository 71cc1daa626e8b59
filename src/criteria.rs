//! # Criteria
//!
//! A criteria bundles one optional filter per queryable field of an entity.
//! Fields left as `None` impose no constraint.
//!
//! Criteria types are declared with the [`criteria!`](crate::criteria!) macro
//! from a table of `field: FilterType => Column` rows. The macro generates the
//! struct, its [`Criteria`] implementation and a `Display` used for logging,
//! so the translation logic in [`specification`](crate::specification) and
//! the parameter binding in [`params`](crate::params) stay generic.
//!
//! ```rust,ignore
//! carcrate::criteria! {
//!     /// Filters for cars.
//!     pub struct CarCriteria for car::Entity {
//!         id: LongFilter => car::Column::Id,
//!         make: StringFilter => car::Column::Make,
//!         model: StringFilter => car::Column::Model,
//!         price: DoubleFilter => car::Column::Price,
//!     }
//! }
//!
//! // GET /api/cars?make.contains=oyo&price.lessThan=25000
//! ```

use sea_orm::EntityTrait;
use std::fmt;

use crate::params::BindOperation;
use crate::specification::ToSpecification;

/// Object-safe view of any filter stored in a criteria.
pub trait FieldFilter: ToSpecification + BindOperation + fmt::Display + Send + Sync {}

impl<F> FieldFilter for F where F: ToSpecification + BindOperation + fmt::Display + Send + Sync {}

/// Column type of the entity a criteria filters.
pub type ColumnOf<C> = <<C as Criteria>::Entity as EntityTrait>::Column;

/// Model type of the entity a criteria filters.
pub type ModelOf<C> = <<C as Criteria>::Entity as EntityTrait>::Model;

pub trait Criteria:
    Clone + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    type Entity: EntityTrait<Model: Sync>;

    /// Field name to column table. Field names are the query-parameter prefixes.
    fn columns() -> Vec<(&'static str, ColumnOf<Self>)>;

    /// Filters currently set, in declaration order.
    fn filters(&self) -> Vec<(&'static str, &dyn FieldFilter)>;

    /// Filter for `field`, created empty when unset. `None` for unknown fields.
    fn filter_mut(&mut self, field: &str) -> Option<&mut dyn FieldFilter>;

    #[must_use]
    fn column(field: &str) -> Option<ColumnOf<Self>> {
        Self::columns()
            .into_iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| column)
    }

    /// Deep copy: equal to `self`, sharing no filter with it.
    #[must_use]
    fn copy(&self) -> Self {
        self.clone()
    }
}

/// Declare a criteria type from a `field: Filter => Column` table.
#[macro_export]
macro_rules! criteria {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident for $entity:path {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $filter:ty => $column:path
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: ::core::option::Option<$filter>,
            )*
        }

        impl $crate::criteria::Criteria for $name {
            type Entity = $entity;

            fn columns() -> ::std::vec::Vec<(&'static str, $crate::criteria::ColumnOf<Self>)> {
                ::std::vec![$((stringify!($field), $column)),*]
            }

            fn filters(&self) -> ::std::vec::Vec<(&'static str, &dyn $crate::criteria::FieldFilter)> {
                let mut filters: ::std::vec::Vec<(&'static str, &dyn $crate::criteria::FieldFilter)> =
                    ::std::vec::Vec::new();
                $(
                    if let ::core::option::Option::Some(filter) = &self.$field {
                        filters.push((stringify!($field), filter as &dyn $crate::criteria::FieldFilter));
                    }
                )*
                filters
            }

            fn filter_mut(
                &mut self,
                field: &str,
            ) -> ::core::option::Option<&mut dyn $crate::criteria::FieldFilter> {
                match field {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            self.$field.get_or_insert_with(::core::default::Default::default)
                                as &mut dyn $crate::criteria::FieldFilter,
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}{{", stringify!($name))?;
                $(
                    if let ::core::option::Option::Some(filter) = &self.$field {
                        write!(f, "{}={}, ", stringify!($field), filter)?;
                    }
                )*
                write!(f, "}}")
            }
        }
    };
}
