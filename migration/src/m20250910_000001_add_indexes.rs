use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Contracts {
    Table,
    CompanyId,
    CropType,
    District,
    State,
    Status,
    SelectedFarmerId,
}

#[derive(DeriveIden)]
enum ContractApplications {
    Table,
    FarmerId,
    Status,
}

#[derive(DeriveIden)]
enum ContractDisputes {
    Table,
    RaisedBy,
    Status,
    Priority,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_company_status")
                    .table(Contracts::Table)
                    .col(Contracts::CompanyId)
                    .col(Contracts::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_crop_type_status")
                    .table(Contracts::Table)
                    .col(Contracts::CropType)
                    .col(Contracts::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_district_state")
                    .table(Contracts::Table)
                    .col(Contracts::District)
                    .col(Contracts::State)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_selected_farmer")
                    .table(Contracts::Table)
                    .col(Contracts::SelectedFarmerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contract_applications_farmer_status")
                    .table(ContractApplications::Table)
                    .col(ContractApplications::FarmerId)
                    .col(ContractApplications::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contract_disputes_raised_by_status")
                    .table(ContractDisputes::Table)
                    .col(ContractDisputes::RaisedBy)
                    .col(ContractDisputes::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contract_disputes_status_priority")
                    .table(ContractDisputes::Table)
                    .col(ContractDisputes::Status)
                    .col(ContractDisputes::Priority)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_contracts_company_status",
            "idx_contracts_crop_type_status",
            "idx_contracts_district_state",
            "idx_contracts_selected_farmer",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Contracts::Table).to_owned())
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name("idx_contract_applications_farmer_status")
                    .table(ContractApplications::Table)
                    .to_owned(),
            )
            .await?;

        for name in [
            "idx_contract_disputes_raised_by_status",
            "idx_contract_disputes_status_priority",
        ] {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(ContractDisputes::Table)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
