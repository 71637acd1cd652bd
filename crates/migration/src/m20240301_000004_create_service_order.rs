//! Create `service_order` table with FK to `payment_status`.
//!
//! `payment_status_id` is a cached classification of items vs payments;
//! new rows start PENDING.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceOrder::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceOrder::Id))
                    .col(string_len(ServiceOrder::ClientName, 128).not_null())
                    .col(ColumnDef::new(ServiceOrder::Description).text().null())
                    .col(ColumnDef::new(ServiceOrder::EmployeeId).integer().null())
                    .col(integer(ServiceOrder::PaymentStatusId).not_null().default(1))
                    .col(timestamp_with_time_zone(ServiceOrder::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ServiceOrder::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_order_payment_status")
                            .from(ServiceOrder::Table, ServiceOrder::PaymentStatusId)
                            .to(PaymentStatus::Table, PaymentStatus::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceOrder::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceOrder { Table, Id, ClientName, Description, EmployeeId, PaymentStatusId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum PaymentStatus { Table, Id }
