//! Criteria-driven reads against the database.
//!
//! Implementors only name their criteria type; listing, paging and counting
//! come from the default methods.
//!
//! ```rust,ignore
//! pub struct CarQueryService;
//!
//! impl QueryService for CarQueryService {
//!     type Criteria = CarCriteria;
//! }
//!
//! let cars = CarQueryService::find_by_criteria(&db, Some(&criteria)).await?;
//! ```

use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, IdenStatic, Iterable, Order, PaginatorTrait,
    PrimaryKeyToColumn, QueryFilter, QueryOrder, Select,
};

use crate::criteria::{ColumnOf, Criteria, ModelOf};
use crate::pagination::{Page, Pageable};
use crate::specification::create_specification;

fn describe<C: Criteria>(criteria: Option<&C>) -> String {
    criteria.map_or_else(|| "none".to_string(), ToString::to_string)
}

fn primary_key_columns<C: Criteria>() -> Vec<ColumnOf<C>> {
    <C::Entity as EntityTrait>::PrimaryKey::iter()
        .map(PrimaryKeyToColumn::into_column)
        .collect()
}

/// Select every row matching `criteria`.
fn filtered<C: Criteria>(criteria: Option<&C>) -> Select<C::Entity> {
    <C::Entity as EntityTrait>::find().filter(create_specification(criteria))
}

/// Apply the requested sort orders, then the primary key as a tie-breaker.
/// Properties that are not criteria fields are skipped.
fn apply_sort<C: Criteria>(mut select: Select<C::Entity>, pageable: &Pageable) -> Select<C::Entity> {
    let mut sorted: Vec<String> = Vec::new();

    for order in &pageable.sort {
        let Some(column) = C::column(&order.property) else {
            tracing::debug!(property = %order.property, "Ignoring unknown sort property");
            continue;
        };
        sorted.push(column.as_str().to_string());
        select = select.order_by(column, order.direction.clone());
    }

    for column in primary_key_columns::<C>() {
        if !sorted.iter().any(|name| name == column.as_str()) {
            select = select.order_by(column, Order::Asc);
        }
    }

    select
}

#[async_trait]
pub trait QueryService: Send + Sync {
    type Criteria: Criteria;

    /// Every row matching `criteria`, in primary key order.
    ///
    /// # Errors
    ///
    /// Propagates any `DbErr` from the database.
    async fn find_by_criteria(
        db: &DatabaseConnection,
        criteria: Option<&Self::Criteria>,
    ) -> Result<Vec<ModelOf<Self::Criteria>>, DbErr> {
        tracing::debug!(criteria = %describe(criteria), "find by criteria");
        let mut select = filtered(criteria);
        for column in primary_key_columns::<Self::Criteria>() {
            select = select.order_by(column, Order::Asc);
        }
        select.all(db).await
    }

    /// One page of the rows matching `criteria`, with the total match count.
    /// A page past the last row is empty.
    ///
    /// # Errors
    ///
    /// Propagates any `DbErr` from the database.
    async fn find_page_by_criteria(
        db: &DatabaseConnection,
        criteria: Option<&Self::Criteria>,
        pageable: &Pageable,
    ) -> Result<Page<ModelOf<Self::Criteria>>, DbErr> {
        tracing::debug!(
            criteria = %describe(criteria),
            page = pageable.page,
            size = pageable.size,
            "find page by criteria"
        );
        let select = apply_sort::<Self::Criteria>(filtered(criteria), pageable);
        let paginator = select.paginate(db, pageable.size);
        let total_elements = paginator.num_items().await?;
        let content = match pageable.offset() {
            Some(offset) if offset < total_elements => paginator.fetch_page(pageable.page).await?,
            _ => Vec::new(),
        };

        Ok(Page {
            content,
            total_elements,
            page: pageable.page,
            size: pageable.size,
        })
    }

    /// Number of rows matching `criteria`.
    ///
    /// # Errors
    ///
    /// Propagates any `DbErr` from the database.
    async fn count_by_criteria(
        db: &DatabaseConnection,
        criteria: Option<&Self::Criteria>,
    ) -> Result<u64, DbErr> {
        tracing::debug!(criteria = %describe(criteria), "count by criteria");
        filtered(criteria).count(db).await
    }
}
