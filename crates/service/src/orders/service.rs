use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument, warn};

use models::{payment_history, service_item, service_order};

use super::calculator::Totals;
use super::domain::{CreateServiceItem, CreateServiceOrder, NewServiceItem, PaymentStatus, ServiceOrder, ServiceOrderView};
use super::errors::OrderError;
use super::payment::{self, StatusWrite};
use super::repository::{PaymentHistoryRepository, ServiceItemRepository, ServiceOrderRepository};
use crate::errors::ServiceError;

/// Orchestrates the service order lifecycle over the three persistence ports.
///
/// Every operation reads the current snapshot, decides, then writes; nothing is
/// held across calls. Two concurrent payments on the same order are only safe
/// if the store serializes them.
#[derive(Clone)]
pub struct ServiceOrderManager {
    orders: Arc<dyn ServiceOrderRepository>,
    payments: Arc<dyn PaymentHistoryRepository>,
    items: Arc<dyn ServiceItemRepository>,
}

/// Log the persistence cause and hide it from the caller.
fn persistence(op: &'static str) -> impl Fn(ServiceError) -> OrderError {
    move |e| {
        error!(op, error = %e, "persistence failure");
        OrderError::Internal
    }
}

fn validate_items(items: &[CreateServiceItem]) -> Result<(), OrderError> {
    for item in items {
        service_item::validate_description(&item.description)?;
        service_item::validate_price(item.price)?;
    }
    Ok(())
}

/// Attach totals and report the status derived from them. The second value is
/// the cached status when it disagreed.
fn reconcile(mut order: ServiceOrder, totals: Totals) -> (ServiceOrderView, Option<PaymentStatus>) {
    let derived = totals.derived_status();
    let stale = (derived != order.payment_status).then_some(order.payment_status);
    order.payment_status = derived;
    (ServiceOrderView { order, total_price: totals.total_price, total_paid: totals.total_paid }, stale)
}

/// `reconcile` for reads and payments, where drift is logged at warn.
fn view(order: ServiceOrder, totals: Totals) -> ServiceOrderView {
    let (v, stale) = reconcile(order, totals);
    if let Some(cached) = stale {
        warn!(
            service_id = v.order.id,
            cached = %cached,
            derived = %v.order.payment_status,
            "cached payment status disagrees with totals"
        );
    }
    v
}

impl ServiceOrderManager {
    pub fn new(
        orders: Arc<dyn ServiceOrderRepository>,
        payments: Arc<dyn PaymentHistoryRepository>,
        items: Arc<dyn ServiceItemRepository>,
    ) -> Self {
        Self { orders, payments, items }
    }

    /// Build from one store implementing all three ports.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ServiceOrderRepository + PaymentHistoryRepository + ServiceItemRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store)
    }

    async fn load(&self, id: i32, op: &'static str) -> Result<ServiceOrder, OrderError> {
        self.orders
            .get_by_id(id)
            .await
            .map_err(persistence(op))?
            .ok_or(OrderError::NotFound)
    }

    /// Create a service order, with its items as one unit when any are given.
    ///
    /// # Examples
    /// ```
    /// use service::orders::{ServiceOrderManager, repository::mock::MockOrderStore};
    /// use service::orders::domain::{CreateServiceOrder, CreateServiceItem, PaymentStatus};
    /// use std::sync::Arc;
    /// let mgr = ServiceOrderManager::from_store(Arc::new(MockOrderStore::default()));
    /// let input = CreateServiceOrder {
    ///     client_name: "Ana".into(),
    ///     description: None,
    ///     employee_id: None,
    ///     items: vec![CreateServiceItem { description: "Labor".into(), price: "100.00".parse().unwrap() }],
    /// };
    /// let order = tokio_test::block_on(mgr.create(input)).unwrap();
    /// assert_eq!(order.payment_status, PaymentStatus::Pending);
    /// assert_eq!(order.items.len(), 1);
    /// ```
    #[instrument(skip(self, input), fields(items = input.items.len()))]
    pub async fn create(&self, input: CreateServiceOrder) -> Result<ServiceOrder, OrderError> {
        service_order::validate_client_name(&input.client_name)?;
        validate_items(&input.items)?;

        let created = if input.items.is_empty() {
            self.orders.create(&input).await
        } else {
            self.orders.create_with_items(&input).await
        }
        .map_err(persistence("create"))?;
        info!(service_id = created.id, "service order created");
        Ok(created)
    }

    /// All service orders as stored; totals are not computed for the listing.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<ServiceOrder>, OrderError> {
        let all = self.orders.get_all().await.map_err(persistence("get_all"))?;
        debug!(count = all.len(), "listed service orders");
        Ok(all)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<ServiceOrderView, OrderError> {
        let order = self.load(id, "get_by_id").await?;
        let totals = Totals::of(&order);
        Ok(view(order, totals))
    }

    /// Apply one payment.
    ///
    /// # Examples
    /// ```
    /// use service::orders::{ServiceOrderManager, OrderError, repository::mock::MockOrderStore};
    /// use service::orders::domain::{CreateServiceOrder, CreateServiceItem, PaymentStatus};
    /// use std::sync::Arc;
    /// let mgr = ServiceOrderManager::from_store(Arc::new(MockOrderStore::default()));
    /// let input = CreateServiceOrder {
    ///     client_name: "Ana".into(),
    ///     description: None,
    ///     employee_id: None,
    ///     items: vec![CreateServiceItem { description: "Labor".into(), price: "200.00".parse().unwrap() }],
    /// };
    /// let order = tokio_test::block_on(mgr.create(input)).unwrap();
    /// let paid = tokio_test::block_on(mgr.pay(order.id, "200.00".parse().unwrap(), 1)).unwrap();
    /// assert_eq!(paid.order.payment_status, PaymentStatus::Paid);
    /// let again = tokio_test::block_on(mgr.pay(order.id, "1.00".parse().unwrap(), 1));
    /// assert_eq!(again.unwrap_err(), OrderError::AlreadySettled);
    /// ```
    #[instrument(skip(self), fields(value = %value))]
    pub async fn pay(&self, id: i32, value: Decimal, payment_type_id: i32) -> Result<ServiceOrderView, OrderError> {
        let order = self.load(id, "pay.load").await?;
        if payment_type_id <= 0 {
            return Err(OrderError::Validation("paymentTypeId must be a positive id".into()));
        }
        let totals = Totals::of(&order);
        let current = order.payment_status;

        let decision = payment::decide(current, &totals, value).map_err(|r| {
            info!(service_id = id, reason = %r, outstanding = %totals.outstanding(), "payment rejected");
            OrderError::from(r)
        })?;
        // scale, and the column range; the latter only trips when the order total exceeds it
        payment_history::validate_paid_value(value)?;

        self.payments
            .create(id, payment_type_id, value)
            .await
            .map_err(persistence("pay.record"))?;

        let updated = match decision.write {
            StatusWrite::Set(next) => {
                let o = self
                    .orders
                    .update_payment_status(id, next)
                    .await
                    .map_err(persistence("pay.update_status"))?;
                info!(service_id = id, from = %current, to = %next, "payment status changed");
                o
            }
            StatusWrite::Keep => match self.orders.get_by_id(id).await.map_err(persistence("pay.reload"))? {
                Some(o) => o,
                None => {
                    error!(service_id = id, "service order vanished after payment was recorded");
                    return Err(OrderError::Internal);
                }
            },
        };

        let after = Totals { total_price: totals.total_price, total_paid: decision.total_paid_after };
        Ok(view(updated, after))
    }

    #[instrument(skip(self))]
    pub async fn delete_service(&self, id: i32) -> Result<(), OrderError> {
        match self.orders.delete(id).await {
            Ok(()) => {
                info!(service_id = id, "service order deleted");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(OrderError::NotFound),
            Err(e) => Err(persistence("delete")(e)),
        }
    }

    /// Append items to an existing order.
    ///
    /// The returned view merges the stored items into the snapshot loaded before
    /// the write instead of re-reading the order, so its totals are optimistic.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn add_items(&self, service_id: i32, items: Vec<CreateServiceItem>) -> Result<ServiceOrderView, OrderError> {
        if items.is_empty() {
            return Err(OrderError::Validation("items required".into()));
        }
        validate_items(&items)?;

        let mut order = self.load(service_id, "add_items.load").await?;
        let new_items: Vec<NewServiceItem> = items
            .into_iter()
            .map(|i| NewServiceItem { service_id, description: i.description, price: i.price })
            .collect();
        let created = self.items.add_items(&new_items).await.map_err(persistence("add_items"))?;
        info!(service_id, added = created.len(), "items added to service order");

        order.items.extend(created);
        let totals = Totals::of(&order);
        let (v, stale) = reconcile(order, totals);
        if let Some(cached) = stale {
            // a settled order with new items is expected to reopen
            debug!(service_id, cached = %cached, derived = %v.order.payment_status, "payment status reopened by new items");
        }
        Ok(v)
    }
}
