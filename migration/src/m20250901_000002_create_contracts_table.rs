use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `contracts` table and its columns.
#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
    CompanyId,
    CropType,
    Quantity,
    Unit,
    AgreedPrice,
    Description,
    Terms,
    District,
    State,
    Pincode,
    StartDate,
    EndDate,
    SelectedFarmerId,
    LegalFile,
    LegalUploadedAt,
    LegalVerificationStatus,
    LegalVerifiedBy,
    LegalVerifiedAt,
    LegalRemarks,
    AdvanceAmount,
    AdvanceStatus,
    AdvancePaidDate,
    FinalAmount,
    FinalStatus,
    FinalPaidDate,
    TotalPaid,
    QuantityDelivered,
    Status,
    IsActive,
    ApplicationsCount,
    CompletedAt,
    CancelledAt,
    CancellationReason,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::CropType).string().not_null())
                    .col(ColumnDef::new(Contracts::Quantity).double().not_null())
                    .col(ColumnDef::new(Contracts::Unit).string().not_null())
                    .col(ColumnDef::new(Contracts::AgreedPrice).double().not_null())
                    .col(ColumnDef::new(Contracts::Description).text().not_null())
                    .col(
                        ColumnDef::new(Contracts::Terms)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Contracts::District).string().not_null())
                    .col(ColumnDef::new(Contracts::State).string().not_null())
                    .col(ColumnDef::new(Contracts::Pincode).string())
                    .col(ColumnDef::new(Contracts::StartDate).date().not_null())
                    .col(ColumnDef::new(Contracts::EndDate).date().not_null())
                    .col(ColumnDef::new(Contracts::SelectedFarmerId).uuid())
                    .col(ColumnDef::new(Contracts::LegalFile).string())
                    .col(ColumnDef::new(Contracts::LegalUploadedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Contracts::LegalVerificationStatus)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::LegalVerifiedBy).uuid())
                    .col(ColumnDef::new(Contracts::LegalVerifiedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Contracts::LegalRemarks)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Contracts::AdvanceAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Contracts::AdvanceStatus).string().not_null())
                    .col(ColumnDef::new(Contracts::AdvancePaidDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Contracts::FinalAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Contracts::FinalStatus).string().not_null())
                    .col(ColumnDef::new(Contracts::FinalPaidDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Contracts::TotalPaid)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Contracts::QuantityDelivered)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Contracts::Status).string().not_null())
                    .col(
                        ColumnDef::new(Contracts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Contracts::ApplicationsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Contracts::CompletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Contracts::CancelledAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Contracts::CancellationReason)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Contracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contracts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_company_id")
                            .from(Contracts::Table, Contracts::CompanyId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_selected_farmer_id")
                            .from(Contracts::Table, Contracts::SelectedFarmerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await
    }
}
