//! Migration: Create the tracking tables (users, devices, impacts,
//! panic_buttons, routes).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Surname).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(
                        ColumnDef::new(Users::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::DeviceId).uuid().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .col(ColumnDef::new(Devices::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Devices::Gps).json_binary().not_null())
                    .col(
                        ColumnDef::new(Devices::LastUpdateDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Devices::LastUpdateTime).string().not_null())
                    .col(ColumnDef::new(Devices::Status).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Impacts::Table)
                    .col(ColumnDef::new(Impacts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Impacts::DeviceId).uuid().not_null())
                    .col(ColumnDef::new(Impacts::Value).double().not_null())
                    .col(
                        ColumnDef::new(Impacts::ImpactDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Impacts are looked up per device (listing and counting)
        manager
            .create_index(
                Index::create()
                    .name("idx_impacts_device_id")
                    .table(Impacts::Table)
                    .col(Impacts::DeviceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PanicButtons::Table)
                    .col(
                        ColumnDef::new(PanicButtons::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PanicButtons::UserId).uuid().null())
                    .col(ColumnDef::new(PanicButtons::DeviceId).uuid().not_null())
                    .col(ColumnDef::new(PanicButtons::Status).string().not_null())
                    .to_owned(),
            )
            .await?;

        // One panic button per device; status operations address the button
        // by device id and must resolve a single row
        manager
            .create_index(
                Index::create()
                    .name("idx_panic_buttons_device_id")
                    .table(PanicButtons::Table)
                    .col(PanicButtons::DeviceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Routes::Table)
                    .col(ColumnDef::new(Routes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Routes::DeviceId).uuid().not_null())
                    .col(ColumnDef::new(Routes::Name).string().not_null())
                    .col(
                        ColumnDef::new(Routes::StartLocation)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Routes::EndLocation).json_binary().not_null())
                    .col(
                        ColumnDef::new(Routes::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Routes::EndDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_routes_device_id")
                    .table(Routes::Table)
                    .col(Routes::DeviceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Routes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PanicButtons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Impacts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Surname,
    Email,
    PasswordHash,
    Role,
    RegisteredAt,
    DeviceId,
}

#[derive(Iden)]
enum Devices {
    Table,
    Id,
    Gps,
    LastUpdateDate,
    LastUpdateTime,
    Status,
}

#[derive(Iden)]
enum Impacts {
    Table,
    Id,
    DeviceId,
    Value,
    ImpactDate,
}

#[derive(Iden)]
enum PanicButtons {
    Table,
    Id,
    UserId,
    DeviceId,
    Status,
}

#[derive(Iden)]
enum Routes {
    Table,
    Id,
    DeviceId,
    Name,
    StartLocation,
    EndLocation,
    StartDate,
    EndDate,
}
