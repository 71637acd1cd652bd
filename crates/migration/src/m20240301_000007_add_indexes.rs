use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Items are always loaded per service order
        manager
            .create_index(
                Index::create()
                    .name("idx_service_item_service")
                    .table(ServiceItem::Table)
                    .col(ServiceItem::ServiceId)
                    .to_owned(),
            )
            .await?;

        // Payment history: (service_id, created_at) for ordered history reads
        manager
            .create_index(
                Index::create()
                    .name("idx_payment_history_service_created")
                    .table(PaymentHistory::Table)
                    .col(PaymentHistory::ServiceId)
                    .col(PaymentHistory::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_order_payment_status")
                    .table(ServiceOrder::Table)
                    .col(ServiceOrder::PaymentStatusId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_order_payment_status").table(ServiceOrder::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_payment_history_service_created").table(PaymentHistory::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_item_service").table(ServiceItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceItem { Table, ServiceId }

#[derive(DeriveIden)]
enum PaymentHistory { Table, ServiceId, CreatedAt }

#[derive(DeriveIden)]
enum ServiceOrder { Table, PaymentStatusId }
