use async_trait::async_trait;
use rust_decimal::Decimal;

use super::domain::{CreateServiceOrder, NewServiceItem, PaymentStatus, ServiceItem, ServiceOrder};
use crate::errors::ServiceError;

/// Service order store. Snapshots returned by `get_by_id` and
/// `update_payment_status` carry items and payment history.
#[async_trait]
pub trait ServiceOrderRepository: Send + Sync {
    async fn create(&self, input: &CreateServiceOrder) -> Result<ServiceOrder, ServiceError>;
    /// Create the order and its items as one unit.
    async fn create_with_items(&self, input: &CreateServiceOrder) -> Result<ServiceOrder, ServiceError>;
    async fn get_all(&self) -> Result<Vec<ServiceOrder>, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<ServiceOrder>, ServiceError>;
    async fn update_payment_status(&self, id: i32, status: PaymentStatus) -> Result<ServiceOrder, ServiceError>;
    /// Fails with `ServiceError::NotFound` when no row was removed.
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// Append-only payment history store.
#[async_trait]
pub trait PaymentHistoryRepository: Send + Sync {
    async fn create(&self, service_id: i32, payment_type_id: i32, value: Decimal) -> Result<(), ServiceError>;
}

/// Item store; items are only ever appended.
#[async_trait]
pub trait ServiceItemRepository: Send + Sync {
    async fn add_items(&self, items: &[NewServiceItem]) -> Result<Vec<ServiceItem>, ServiceError>;
}

/// Simple in-memory mock store implementing all three ports for tests and doc examples
pub mod mock {
    use super::*;
    use crate::orders::domain::Payment;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct State {
        orders: BTreeMap<i32, ServiceOrder>,
        next_order_id: i32,
        next_item_id: i32,
        next_payment_id: i32,
    }

    impl State {
        fn next_order(&mut self) -> i32 { self.next_order_id += 1; self.next_order_id }
        fn next_item(&mut self) -> i32 { self.next_item_id += 1; self.next_item_id }
        fn next_payment(&mut self) -> i32 { self.next_payment_id += 1; self.next_payment_id }
    }

    /// Write counters, observable from tests.
    #[derive(Default)]
    pub struct Calls {
        pub creates: AtomicUsize,
        pub creates_with_items: AtomicUsize,
        pub status_updates: AtomicUsize,
        pub payments: AtomicUsize,
        pub item_writes: AtomicUsize,
    }

    impl Calls {
        pub fn get(counter: &AtomicUsize) -> usize { counter.load(Ordering::SeqCst) }

        /// Total number of writes of any kind.
        pub fn writes(&self) -> usize {
            Self::get(&self.creates)
                + Self::get(&self.creates_with_items)
                + Self::get(&self.status_updates)
                + Self::get(&self.payments)
                + Self::get(&self.item_writes)
        }
    }

    #[derive(Default)]
    pub struct MockOrderStore {
        state: Mutex<State>,
        pub calls: Calls,
        fail: AtomicBool,
    }

    impl MockOrderStore {
        /// Make every subsequent call fail with a database error.
        pub fn fail_all(&self, fail: bool) { self.fail.store(fail, Ordering::SeqCst); }

        /// Overwrite the cached status without going through the ports.
        pub fn force_status(&self, id: i32, status: PaymentStatus) {
            if let Some(o) = self.state.lock().unwrap().orders.get_mut(&id) {
                o.payment_status = status;
            }
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("connection refused".into()));
            }
            Ok(())
        }

        fn insert(&self, input: &CreateServiceOrder, with_items: bool) -> ServiceOrder {
            let mut st = self.state.lock().unwrap();
            let id = st.next_order();
            let items = if with_items {
                input.items.iter().map(|i| ServiceItem {
                    id: st.next_item(),
                    service_id: id,
                    description: i.description.clone(),
                    price: i.price,
                }).collect()
            } else {
                Vec::new()
            };
            let now = Utc::now();
            let order = ServiceOrder {
                id,
                client_name: input.client_name.clone(),
                description: input.description.clone(),
                employee_id: input.employee_id,
                payment_status: PaymentStatus::Pending,
                items,
                payments_history: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            st.orders.insert(id, order.clone());
            order
        }
    }

    #[async_trait]
    impl ServiceOrderRepository for MockOrderStore {
        async fn create(&self, input: &CreateServiceOrder) -> Result<ServiceOrder, ServiceError> {
            self.check()?;
            self.calls.creates.fetch_add(1, Ordering::SeqCst);
            Ok(self.insert(input, false))
        }

        async fn create_with_items(&self, input: &CreateServiceOrder) -> Result<ServiceOrder, ServiceError> {
            self.check()?;
            self.calls.creates_with_items.fetch_add(1, Ordering::SeqCst);
            Ok(self.insert(input, true))
        }

        async fn get_all(&self) -> Result<Vec<ServiceOrder>, ServiceError> {
            self.check()?;
            Ok(self.state.lock().unwrap().orders.values().cloned().collect())
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<ServiceOrder>, ServiceError> {
            self.check()?;
            Ok(self.state.lock().unwrap().orders.get(&id).cloned())
        }

        async fn update_payment_status(&self, id: i32, status: PaymentStatus) -> Result<ServiceOrder, ServiceError> {
            self.check()?;
            self.calls.status_updates.fetch_add(1, Ordering::SeqCst);
            let mut st = self.state.lock().unwrap();
            let order = st.orders.get_mut(&id).ok_or_else(|| ServiceError::not_found("service order"))?;
            order.payment_status = status;
            order.updated_at = Utc::now();
            Ok(order.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.check()?;
            let mut st = self.state.lock().unwrap();
            let has_payments = match st.orders.get(&id) {
                None => return Err(ServiceError::not_found("service order")),
                Some(o) => !o.payments_history.is_empty(),
            };
            if has_payments {
                return Err(ServiceError::Db("violates foreign key constraint fk_payment_history_service_order".into()));
            }
            st.orders.remove(&id);
            Ok(())
        }
    }

    #[async_trait]
    impl PaymentHistoryRepository for MockOrderStore {
        async fn create(&self, service_id: i32, payment_type_id: i32, value: Decimal) -> Result<(), ServiceError> {
            self.check()?;
            self.calls.payments.fetch_add(1, Ordering::SeqCst);
            let mut st = self.state.lock().unwrap();
            let id = st.next_payment();
            let order = st.orders.get_mut(&service_id).ok_or_else(|| ServiceError::not_found("service order"))?;
            order.payments_history.push(Payment {
                id,
                service_id,
                payment_type_id,
                paid_value: value,
                created_at: Utc::now(),
            });
            Ok(())
        }
    }

    #[async_trait]
    impl ServiceItemRepository for MockOrderStore {
        async fn add_items(&self, items: &[NewServiceItem]) -> Result<Vec<ServiceItem>, ServiceError> {
            self.check()?;
            self.calls.item_writes.fetch_add(1, Ordering::SeqCst);
            let mut st = self.state.lock().unwrap();
            let mut created = Vec::with_capacity(items.len());
            for i in items {
                let id = st.next_item();
                let item = ServiceItem { id, service_id: i.service_id, description: i.description.clone(), price: i.price };
                let order = st.orders.get_mut(&i.service_id).ok_or_else(|| ServiceError::not_found("service order"))?;
                order.items.push(item.clone());
                created.push(item);
            }
            Ok(created)
        }
    }
}
