use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Addresses::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Addresses::AddressId)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key()
                )
                .col(ColumnDef::new(Addresses::BuildingName).string().null())
                .col(ColumnDef::new(Addresses::Street).string().not_null())
                .col(ColumnDef::new(Addresses::City).string().not_null())
                .col(ColumnDef::new(Addresses::State).string().not_null())
                .col(ColumnDef::new(Addresses::Pincode).string().not_null())
                .col(
                    ColumnDef::new(Addresses::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .extra("DEFAULT NOW()".to_string())
                )
                .col(
                    ColumnDef::new(Addresses::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .extra("DEFAULT NOW()".to_string())
                )
                .to_owned()
        ).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Addresses::Table).to_owned()).await
    }
}

// No foreign key to users: an earlier revision linked addresses to a user,
// the current schema keeps the two tables independent.
#[derive(DeriveIden)]
enum Addresses {
    Table,
    AddressId,
    BuildingName,
    Street,
    City,
    State,
    Pincode,
    CreatedAt,
    UpdatedAt,
}
