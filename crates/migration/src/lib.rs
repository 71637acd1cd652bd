//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_payment_status;
mod m20240301_000002_create_payment_type;
mod m20240301_000003_create_user;
mod m20240301_000004_create_service_order;
mod m20240301_000005_create_service_item;
mod m20240301_000006_create_payment_history;
mod m20240301_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_payment_status::Migration),
            Box::new(m20240301_000002_create_payment_type::Migration),
            Box::new(m20240301_000003_create_user::Migration),
            Box::new(m20240301_000004_create_service_order::Migration),
            Box::new(m20240301_000005_create_service_item::Migration),
            Box::new(m20240301_000006_create_payment_history::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000007_add_indexes::Migration),
        ]
    }
}
