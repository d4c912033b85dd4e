use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `users` table and its columns.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Role,
    VerificationStatus,
    VerificationRemarks,
    VerifiedBy,
    VerifiedAt,
    IsActive,
    Village,
    District,
    State,
    Pincode,
    LandSize,
    CompanyName,
    RegistrationNumber,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Phone).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(
                        ColumnDef::new(Users::VerificationStatus)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::VerificationRemarks)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Users::VerifiedBy).uuid())
                    .col(ColumnDef::new(Users::VerifiedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::Village).string())
                    .col(ColumnDef::new(Users::District).string())
                    .col(ColumnDef::new(Users::State).string())
                    .col(ColumnDef::new(Users::Pincode).string())
                    .col(ColumnDef::new(Users::LandSize).double())
                    .col(ColumnDef::new(Users::CompanyName).string())
                    .col(ColumnDef::new(Users::RegistrationNumber).string())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}
