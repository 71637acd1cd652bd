//! Create `payment_type` lookup table with the supported settlement methods.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentType::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentType::Id))
                    .col(string_len(PaymentType::Name, 64).unique_key().not_null())
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(PaymentType::Table)
            .columns([PaymentType::Name])
            .values_panic(["cash".into()])
            .values_panic(["credit card".into()])
            .values_panic(["debit card".into()])
            .values_panic(["bank transfer".into()])
            .to_owned();
        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PaymentType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PaymentType { Table, Id, Name }
