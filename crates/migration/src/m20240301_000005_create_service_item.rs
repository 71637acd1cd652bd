//! Create `service_item` table.
//! Priced line items; removed together with their service order.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceItem::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceItem::Id))
                    .col(integer(ServiceItem::ServiceId).not_null())
                    .col(string_len(ServiceItem::Description, 255).not_null())
                    .col(decimal_len(ServiceItem::Price, 10, 2).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_item_service_order")
                            .from(ServiceItem::Table, ServiceItem::ServiceId)
                            .to(ServiceOrder::Table, ServiceOrder::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceItem::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceItem { Table, Id, ServiceId, Description, Price }

#[derive(DeriveIden)]
enum ServiceOrder { Table, Id }
