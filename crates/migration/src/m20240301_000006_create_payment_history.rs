//! Create `payment_history` table.
//!
//! Append-only settlement records. The FK to `service_order` is RESTRICT:
//! a service order with recorded payments cannot be deleted.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentHistory::Id))
                    .col(integer(PaymentHistory::ServiceId).not_null())
                    .col(integer(PaymentHistory::PaymentTypeId).not_null())
                    .col(decimal_len(PaymentHistory::PaidValue, 10, 2).not_null())
                    .col(timestamp_with_time_zone(PaymentHistory::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_history_service_order")
                            .from(PaymentHistory::Table, PaymentHistory::ServiceId)
                            .to(ServiceOrder::Table, ServiceOrder::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_history_payment_type")
                            .from(PaymentHistory::Table, PaymentHistory::PaymentTypeId)
                            .to(PaymentType::Table, PaymentType::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PaymentHistory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PaymentHistory { Table, Id, ServiceId, PaymentTypeId, PaidValue, CreatedAt }

#[derive(DeriveIden)]
enum ServiceOrder { Table, Id }

#[derive(DeriveIden)]
enum PaymentType { Table, Id }
