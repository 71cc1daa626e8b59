//! Schema for the `car` table.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateCarTable)]
    }
}

pub struct CreateCarTable;

impl MigrationName for CreateCarTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_car_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateCarTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Car::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Car::Id)
                    .big_integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Car::Make).string().null())
            .col(ColumnDef::new(Car::Model).string().null())
            .col(ColumnDef::new(Car::Price).double().null())
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Car::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Car {
    Table,
    Id,
    Make,
    Model,
    Price,
}
