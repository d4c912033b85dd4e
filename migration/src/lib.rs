pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_users_table;
mod m20250901_000002_create_contracts_table;
mod m20250901_000003_create_contract_applications_table;
mod m20250901_000004_create_deliveries_table;
mod m20250901_000005_create_contract_disputes_table;
mod m20250903_000001_create_alerts_table;
mod m20250910_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_users_table::Migration),
            Box::new(m20250901_000002_create_contracts_table::Migration),
            Box::new(m20250901_000003_create_contract_applications_table::Migration),
            Box::new(m20250901_000004_create_deliveries_table::Migration),
            Box::new(m20250901_000005_create_contract_disputes_table::Migration),
            Box::new(m20250903_000001_create_alerts_table::Migration),
            Box::new(m20250910_000001_add_indexes::Migration),
        ]
    }
}
