use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::filter::{DoubleFilter, LongFilter, StringFilter};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "car")]
#[schema(as = Car)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub make: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

crate::criteria! {
    /// Filters accepted by the car listing and count endpoints.
    pub struct CarCriteria for Entity {
        id: LongFilter => Column::Id,
        make: StringFilter => Column::Make,
        model: StringFilter => Column::Model,
        price: DoubleFilter => Column::Price,
    }
}

/// Request body for creating and updating a car.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarInput {
    /// Must be absent on create and present on update.
    pub id: Option<i64>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
}

impl CarInput {
    /// Active model for an insert; the id is left to the database.
    #[must_use]
    pub fn into_new_active_model(self) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            make: ActiveValue::Set(self.make),
            model: ActiveValue::Set(self.model),
            price: ActiveValue::Set(self.price),
        }
    }

    /// Replace every column of `existing` with this input.
    #[must_use]
    pub fn merge_into_active_model(self, existing: Model) -> ActiveModel {
        let mut active: ActiveModel = existing.into();
        active.make = ActiveValue::Set(self.make);
        active.model = ActiveValue::Set(self.model);
        active.price = ActiveValue::Set(self.price);
        active
    }
}
