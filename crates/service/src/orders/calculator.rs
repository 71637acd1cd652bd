//! Pure money totals over a service order snapshot.

use rust_decimal::Decimal;

use super::domain::{Payment, PaymentStatus, ServiceItem, ServiceOrder};

/// Sum of item prices; empty is zero.
pub fn total_price(items: &[ServiceItem]) -> Decimal {
    items.iter().map(|i| i.price).sum()
}

/// Sum of recorded payments; empty is zero.
pub fn total_paid(payments: &[Payment]) -> Decimal {
    payments.iter().map(|p| p.paid_value).sum()
}

/// Derived totals of one service order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub total_price: Decimal,
    pub total_paid: Decimal,
}

impl Totals {
    pub fn of(order: &ServiceOrder) -> Self {
        Self {
            total_price: total_price(&order.items),
            total_paid: total_paid(&order.payments_history),
        }
    }

    pub fn outstanding(&self) -> Decimal {
        self.total_price - self.total_paid
    }

    /// Nothing left to pay. A service order without items is settled.
    pub fn is_settled(&self) -> bool {
        self.total_paid == self.total_price
    }

    /// Classification recomputed from the totals alone.
    ///
    /// No payment yet is PENDING even when the price is zero, matching the
    /// state a freshly created order is persisted in.
    pub fn derived_status(&self) -> PaymentStatus {
        if self.total_paid.is_zero() {
            PaymentStatus::Pending
        } else if self.total_paid >= self.total_price {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn item(price: Decimal) -> ServiceItem {
        ServiceItem { id: 0, service_id: 1, description: "x".into(), price }
    }

    fn payment(value: Decimal) -> Payment {
        Payment { id: 0, service_id: 1, payment_type_id: 1, paid_value: value, created_at: Utc::now() }
    }

    #[test]
    fn empty_sequences_sum_to_zero() {
        assert_eq!(total_price(&[]), Decimal::ZERO);
        assert_eq!(total_paid(&[]), Decimal::ZERO);
    }

    #[test]
    fn sums_are_exact_where_binary_floats_drift() {
        let items: Vec<_> = (0..10).map(|_| item(dec!(0.10))).collect();
        assert_eq!(total_price(&items), dec!(1.00));
        let payments = [payment(dec!(0.1)), payment(dec!(0.2))];
        assert_eq!(total_paid(&payments), dec!(0.3));
    }

    #[test]
    fn sum_is_order_independent() {
        let a = [item(dec!(19.99)), item(dec!(0.01)), item(dec!(80.00))];
        let b = [item(dec!(80.00)), item(dec!(19.99)), item(dec!(0.01))];
        assert_eq!(total_price(&a), total_price(&b));
        assert_eq!(total_price(&a), dec!(100.00));
    }

    #[test]
    fn derived_status_follows_totals() {
        let t = |price, paid| Totals { total_price: price, total_paid: paid };
        assert_eq!(t(dec!(150), dec!(0)).derived_status(), PaymentStatus::Pending);
        assert_eq!(t(dec!(150), dec!(50)).derived_status(), PaymentStatus::Partial);
        assert_eq!(t(dec!(150), dec!(150.00)).derived_status(), PaymentStatus::Paid);
        assert_eq!(t(dec!(0), dec!(0)).derived_status(), PaymentStatus::Pending);
        assert!(t(dec!(0), dec!(0)).is_settled());
        assert_eq!(t(dec!(150), dec!(50)).outstanding(), dec!(100));
    }
}
