//! Create `payment_status` lookup table.
//!
//! Ids are fixed: 1 PENDING, 2 PARTIAL, 3 PAID. `service_order.payment_status_id`
//! references them, so the rows are seeded here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentStatus::Table)
                    .if_not_exists()
                    .col(integer(PaymentStatus::Id).primary_key())
                    .col(string_len(PaymentStatus::Name, 32).unique_key().not_null())
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(PaymentStatus::Table)
            .columns([PaymentStatus::Id, PaymentStatus::Name])
            .values_panic([1.into(), "PENDING".into()])
            .values_panic([2.into(), "PARTIAL".into()])
            .values_panic([3.into(), "PAID".into()])
            .to_owned();
        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PaymentStatus::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PaymentStatus { Table, Id, Name }
