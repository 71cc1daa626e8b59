//! Write and single-row operations for cars, plus the criteria query service.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait};

use crate::entity::car::{self, CarCriteria, CarInput};
use crate::query_service::QueryService;

/// Criteria-driven reads over the `car` table.
pub struct CarQueryService;

impl QueryService for CarQueryService {
    type Criteria = CarCriteria;
}

pub struct CarService;

impl CarService {
    /// Insert a new car. Any id on `input` is ignored.
    ///
    /// # Errors
    ///
    /// Propagates any `DbErr` from the insert.
    pub async fn create(db: &DatabaseConnection, input: CarInput) -> Result<car::Model, DbErr> {
        tracing::debug!(?input, "create car");
        input.into_new_active_model().insert(db).await
    }

    /// Replace every column of the car with id `id`.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` when no such car exists.
    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        input: CarInput,
    ) -> Result<car::Model, DbErr> {
        tracing::debug!(id, ?input, "update car");
        let existing = car::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Car not found".to_string()))?;
        input.merge_into_active_model(existing).update(db).await
    }

    /// # Errors
    ///
    /// Propagates any `DbErr` from the select.
    pub async fn find_one(db: &DatabaseConnection, id: i64) -> Result<Option<car::Model>, DbErr> {
        tracing::debug!(id, "find car");
        car::Entity::find_by_id(id).one(db).await
    }

    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` when no row was deleted.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), DbErr> {
        tracing::debug!(id, "delete car");
        let result = car::Entity::delete_by_id(id).exec(db).await?;
        match result.rows_affected {
            0 => Err(DbErr::RecordNotFound("Car not found".to_string())),
            _ => Ok(()),
        }
    }
}
