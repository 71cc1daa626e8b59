//! # carcrate
//!
//! A car inventory REST API whose list and count endpoints accept typed,
//! per-field filters:
//!
//! ```text
//! GET /api/cars?make.contains=oyo&price.lessThanOrEqual=25000&sort=price,desc
//! GET /api/cars/count?model.specified=false
//! ```
//!
//! - [`filter`]: `Filter`, `RangeFilter` and `StringFilter` value types
//! - [`criteria`]: the `Criteria` trait and the [`criteria!`] declaration macro
//! - [`specification`]: filters to Sea-ORM `Condition`s
//! - [`params`]: `field.operation=value` query parameters to criteria
//! - [`query_service`]: list, page and count by criteria
//! - [`routes`]: the Axum router and OpenAPI document

pub mod config;
pub mod criteria;
pub mod entity;
pub mod errors;
pub mod filter;
pub mod migration;
pub mod pagination;
pub mod params;
pub mod query_service;
pub mod routes;
pub mod service;
pub mod specification;

pub use criteria::Criteria;
pub use errors::{ApiError, FilterError};
pub use filter::{
    BooleanFilter, DoubleFilter, Filter, FloatFilter, IntegerFilter, LongFilter, RangeFilter,
    StringFilter,
};
pub use pagination::{Page, Pageable};
pub use query_service::QueryService;
