pub mod errors;
pub mod db;
pub mod payment_status;
pub mod payment_type;
pub mod user;
pub mod service_order;
pub mod service_item;
pub mod payment_history;

#[cfg(test)]
mod db_tests {
    use migration::MigratorTrait;
    use rust_decimal_macros::dec;
    use sea_orm::{EntityTrait, ModelTrait, TransactionTrait};

    use crate::{db, payment_history, payment_status, service_item, service_order};

    #[tokio::test]
    async fn service_order_items_and_payments_roundtrip() {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return; }
        let db = match db::connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return;
            }
        };
        if let Err(e) = migration::Migrator::up(&db, None).await {
            eprintln!("skip: migrate up failed: {}", e);
            return;
        }

        let txn = db.begin().await.expect("begin");
        let order = service_order::create(&txn, "Roundtrip Client", None, None).await.expect("create order");
        assert_eq!(order.payment_status_id, payment_status::PENDING);
        service_item::insert_many(&txn, order.id, &[("Labor".into(), dec!(100.00)), ("Parts".into(), dec!(50.00))])
            .await
            .expect("insert items");
        txn.commit().await.expect("commit");

        let items = order.find_related(service_item::Entity).all(&db).await.expect("items");
        assert_eq!(items.len(), 2);
        let total: rust_decimal::Decimal = items.iter().map(|i| i.price).sum();
        assert_eq!(total, dec!(150.00));

        let paid = payment_history::create(&db, order.id, 1, dec!(150.00)).await.expect("pay");
        let updated = service_order::update_payment_status(&db, order.id, payment_status::PAID).await.expect("status");
        assert_eq!(updated.payment_status_id, payment_status::PAID);

        // Payments block deletion
        assert!(service_order::hard_delete(&db, order.id).await.is_err());

        payment_history::Entity::delete_by_id(paid.id).exec(&db).await.expect("cleanup payment");
        assert_eq!(service_order::hard_delete(&db, order.id).await.expect("delete"), 1);
        assert_eq!(service_order::hard_delete(&db, order.id).await.expect("delete again"), 0);
    }
}
