use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use tracing::debug;

use models::{payment_history, service_item, service_order};

use crate::errors::ServiceError;
use crate::orders::domain::{CreateServiceOrder, NewServiceItem, Payment, PaymentStatus, ServiceItem, ServiceOrder};
use crate::orders::repository::{PaymentHistoryRepository, ServiceItemRepository, ServiceOrderRepository};

/// SeaORM-backed implementation of the three order ports.
#[derive(Clone)]
pub struct SeaOrmOrderRepository {
    pub db: DatabaseConnection,
}

fn item_to_domain(m: service_item::Model) -> ServiceItem {
    ServiceItem { id: m.id, service_id: m.service_id, description: m.description, price: m.price }
}

fn payment_to_domain(m: payment_history::Model) -> Payment {
    Payment {
        id: m.id,
        service_id: m.service_id,
        payment_type_id: m.payment_type_id,
        paid_value: m.paid_value,
        created_at: m.created_at.with_timezone(&Utc),
    }
}

fn order_to_domain(
    m: service_order::Model,
    items: Vec<service_item::Model>,
    payments: Vec<payment_history::Model>,
) -> Result<ServiceOrder, ServiceError> {
    let payment_status = PaymentStatus::from_code(m.payment_status_id)
        .ok_or_else(|| ServiceError::Db(format!("unknown payment_status_id {} on service order {}", m.payment_status_id, m.id)))?;
    Ok(ServiceOrder {
        id: m.id,
        client_name: m.client_name,
        description: m.description,
        employee_id: m.employee_id,
        payment_status,
        items: items.into_iter().map(item_to_domain).collect(),
        payments_history: payments.into_iter().map(payment_to_domain).collect(),
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    })
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn load<C: ConnectionTrait>(db: &C, order: service_order::Model) -> Result<ServiceOrder, ServiceError> {
        let items = service_item::Entity::find()
            .filter(service_item::Column::ServiceId.eq(order.id))
            .order_by_asc(service_item::Column::Id)
            .all(db)
            .await?;
        let payments = payment_history::Entity::find()
            .filter(payment_history::Column::ServiceId.eq(order.id))
            .order_by_asc(payment_history::Column::CreatedAt)
            .order_by_asc(payment_history::Column::Id)
            .all(db)
            .await?;
        order_to_domain(order, items, payments)
    }
}

#[async_trait::async_trait]
impl ServiceOrderRepository for SeaOrmOrderRepository {
    async fn create(&self, input: &CreateServiceOrder) -> Result<ServiceOrder, ServiceError> {
        let order = service_order::create(&self.db, &input.client_name, input.description.clone(), input.employee_id).await?;
        order_to_domain(order, Vec::new(), Vec::new())
    }

    async fn create_with_items(&self, input: &CreateServiceOrder) -> Result<ServiceOrder, ServiceError> {
        let txn = self.db.begin().await?;
        let order = service_order::create(&txn, &input.client_name, input.description.clone(), input.employee_id).await?;
        let rows: Vec<(String, Decimal)> = input.items.iter().map(|i| (i.description.clone(), i.price)).collect();
        let items = service_item::insert_many(&txn, order.id, &rows).await?;
        txn.commit().await?;
        debug!(service_id = order.id, items = items.len(), "service order created with items");
        order_to_domain(order, items, Vec::new())
    }

    async fn get_all(&self) -> Result<Vec<ServiceOrder>, ServiceError> {
        let orders = service_order::Entity::find()
            .order_by_asc(service_order::Column::Id)
            .all(&self.db)
            .await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();

        let mut items: HashMap<i32, Vec<service_item::Model>> = HashMap::new();
        for i in service_item::Entity::find()
            .filter(service_item::Column::ServiceId.is_in(ids.clone()))
            .order_by_asc(service_item::Column::Id)
            .all(&self.db)
            .await?
        {
            items.entry(i.service_id).or_default().push(i);
        }

        let mut payments: HashMap<i32, Vec<payment_history::Model>> = HashMap::new();
        for p in payment_history::Entity::find()
            .filter(payment_history::Column::ServiceId.is_in(ids))
            .order_by_asc(payment_history::Column::CreatedAt)
            .order_by_asc(payment_history::Column::Id)
            .all(&self.db)
            .await?
        {
            payments.entry(p.service_id).or_default().push(p);
        }

        orders
            .into_iter()
            .map(|o| {
                let its = items.remove(&o.id).unwrap_or_default();
                let pays = payments.remove(&o.id).unwrap_or_default();
                order_to_domain(o, its, pays)
            })
            .collect()
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<ServiceOrder>, ServiceError> {
        match service_order::Entity::find_by_id(id).one(&self.db).await? {
            Some(order) => Ok(Some(Self::load(&self.db, order).await?)),
            None => Ok(None),
        }
    }

    async fn update_payment_status(&self, id: i32, status: PaymentStatus) -> Result<ServiceOrder, ServiceError> {
        let updated = service_order::update_payment_status(&self.db, id, status.code()).await?;
        Self::load(&self.db, updated).await
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let removed = service_order::hard_delete(&self.db, id).await?;
        if removed == 0 {
            return Err(ServiceError::not_found("service order"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PaymentHistoryRepository for SeaOrmOrderRepository {
    async fn create(&self, service_id: i32, payment_type_id: i32, value: Decimal) -> Result<(), ServiceError> {
        payment_history::create(&self.db, service_id, payment_type_id, value).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ServiceItemRepository for SeaOrmOrderRepository {
    async fn add_items(&self, items: &[NewServiceItem]) -> Result<Vec<ServiceItem>, ServiceError> {
        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(items.len());
        for i in items {
            let m = service_item::insert(&txn, i.service_id, &i.description, i.price).await?;
            created.push(item_to_domain(m));
        }
        txn.commit().await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::domain::CreateServiceItem;
    use crate::test_support::get_db;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn seaorm_order_lifecycle_against_postgres() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };
        let repo = SeaOrmOrderRepository::new(db);

        let input = CreateServiceOrder {
            client_name: "SeaORM Client".into(),
            description: Some("phone repair".into()),
            employee_id: None,
            items: vec![
                CreateServiceItem { description: "Screen".into(), price: dec!(100.00) },
                CreateServiceItem { description: "Battery".into(), price: dec!(50.00) },
            ],
        };
        let created = ServiceOrderRepository::create_with_items(&repo, &input).await?;
        assert_eq!(created.items.len(), 2);
        assert_eq!(created.payment_status, PaymentStatus::Pending);

        PaymentHistoryRepository::create(&repo, created.id, 1, dec!(30.00)).await?;
        let updated = repo.update_payment_status(created.id, PaymentStatus::Partial).await?;
        assert_eq!(updated.payment_status, PaymentStatus::Partial);
        assert_eq!(updated.payments_history.len(), 1);
        assert_eq!(updated.payments_history[0].paid_value, dec!(30.00));

        let added = repo.add_items(&[NewServiceItem { service_id: created.id, description: "Case".into(), price: dec!(20.00) }]).await?;
        assert_eq!(added.len(), 1);
        let loaded = repo.get_by_id(created.id).await?.expect("order exists");
        assert_eq!(loaded.items.len(), 3);
        assert_eq!(loaded.items[2].description, "Case");

        let all = repo.get_all().await?;
        assert!(all.iter().any(|o| o.id == created.id && o.items.len() == 3));

        // recorded payments block deletion
        assert!(matches!(repo.delete(created.id).await, Err(ServiceError::Model(_))));

        let bare = ServiceOrderRepository::create(&repo, &CreateServiceOrder { items: vec![], ..input }).await?;
        repo.delete(bare.id).await?;
        assert!(repo.delete(bare.id).await.unwrap_err().is_not_found());
        Ok(())
    }
}
