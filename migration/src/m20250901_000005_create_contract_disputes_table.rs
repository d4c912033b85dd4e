use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `contract_disputes` table and its columns.
#[derive(DeriveIden)]
enum ContractDisputes {
    Table,
    Id,
    ContractId,
    RaisedBy,
    RaisedByRole,
    Subject,
    Message,
    Status,
    Priority,
    AdminRemarks,
    ActionTaken,
    AssignedTo,
    ResolvedAt,
    ClosedAt,
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
                    .table(ContractDisputes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContractDisputes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContractDisputes::ContractId).uuid().not_null())
                    .col(ColumnDef::new(ContractDisputes::RaisedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(ContractDisputes::RaisedByRole)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContractDisputes::Subject).string().not_null())
                    .col(ColumnDef::new(ContractDisputes::Message).text().not_null())
                    .col(ColumnDef::new(ContractDisputes::Status).string().not_null())
                    .col(ColumnDef::new(ContractDisputes::Priority).string().not_null())
                    .col(
                        ColumnDef::new(ContractDisputes::AdminRemarks)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ContractDisputes::ActionTaken)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ContractDisputes::AssignedTo).uuid())
                    .col(ColumnDef::new(ContractDisputes::ResolvedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ContractDisputes::ClosedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ContractDisputes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_disputes_contract_id")
                            .from(ContractDisputes::Table, ContractDisputes::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_disputes_raised_by")
                            .from(ContractDisputes::Table, ContractDisputes::RaisedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContractDisputes::Table).to_owned())
            .await
    }
}
