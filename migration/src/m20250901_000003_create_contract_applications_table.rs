use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `contract_applications` table and its columns.
#[derive(DeriveIden)]
enum ContractApplications {
    Table,
    Id,
    ContractId,
    FarmerId,
    ProposedQuantity,
    Village,
    District,
    State,
    Message,
    Experience,
    Status,
    CompanyRemarks,
    AcceptedAt,
    RejectedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
}

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
                    .table(ContractApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContractApplications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContractApplications::ContractId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContractApplications::FarmerId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContractApplications::ProposedQuantity)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContractApplications::Village).string())
                    .col(ColumnDef::new(ContractApplications::District).string())
                    .col(ColumnDef::new(ContractApplications::State).string())
                    .col(
                        ColumnDef::new(ContractApplications::Message)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ContractApplications::Experience)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ContractApplications::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContractApplications::CompanyRemarks)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ContractApplications::AcceptedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ContractApplications::RejectedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ContractApplications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_applications_contract_id")
                            .from(
                                ContractApplications::Table,
                                ContractApplications::ContractId,
                            )
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_applications_farmer_id")
                            .from(ContractApplications::Table, ContractApplications::FarmerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One application per farmer per contract, enforced by the store so
        // two concurrent applications cannot both slip past the pre-check.
        manager
            .create_index(
                Index::create()
                    .name("idx_contract_applications_contract_farmer_unique")
                    .table(ContractApplications::Table)
                    .col(ContractApplications::ContractId)
                    .col(ContractApplications::FarmerId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContractApplications::Table).to_owned())
            .await
    }
}
