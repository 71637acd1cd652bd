use criterion::{criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use std::sync::Arc;

use service::orders::calculator::Totals;
use service::orders::domain::{CreateServiceItem, CreateServiceOrder, PaymentStatus};
use service::orders::payment::decide;
use service::orders::repository::mock::MockOrderStore;
use service::orders::ServiceOrderManager;

fn bench_decide(c: &mut Criterion) {
    let totals = Totals { total_price: Decimal::new(15000, 2), total_paid: Decimal::new(5000, 2) };
    let value = Decimal::new(2500, 2);
    c.bench_function("payment_decide_partial", |b| {
        b.iter(|| decide(PaymentStatus::Partial, &totals, value).unwrap());
    });
}

fn bench_get_by_id(c: &mut Criterion) {
    let mgr = ServiceOrderManager::from_store(Arc::new(MockOrderStore::default()));
    let items = (0..50)
        .map(|n| CreateServiceItem { description: format!("part {n}"), price: Decimal::new(1999, 2) })
        .collect();
    let input = CreateServiceOrder { client_name: "Bench".into(), description: None, employee_id: None, items };

    // create the order outside of the measured loop
    let rt = tokio::runtime::Runtime::new().unwrap();
    let order = rt.block_on(mgr.create(input)).unwrap();

    c.bench_function("order_get_by_id_50_items", |b| {
        b.iter(|| rt.block_on(mgr.get_by_id(order.id)).unwrap());
    });
}

criterion_group!(benches, bench_decide, bench_get_by_id);
criterion_main!(benches);
