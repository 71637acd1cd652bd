use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cached payment classification of a service order.
///
/// Codes match the seeded `payment_status` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn code(self) -> i32 {
        match self {
            PaymentStatus::Pending => models::payment_status::PENDING,
            PaymentStatus::Partial => models::payment_status::PARTIAL,
            PaymentStatus::Paid => models::payment_status::PAID,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            models::payment_status::PENDING => Some(PaymentStatus::Pending),
            models::payment_status::PARTIAL => Some(PaymentStatus::Partial),
            models::payment_status::PAID => Some(PaymentStatus::Paid),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Partial => "PARTIAL",
            PaymentStatus::Paid => "PAID",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One priced line item. Immutable once persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: i32,
    pub service_id: i32,
    pub description: String,
    pub price: Decimal,
}

/// One settlement event. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i32,
    pub service_id: i32,
    pub payment_type_id: i32,
    pub paid_value: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Persisted service order snapshot, items and payments in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub id: i32,
    pub client_name: String,
    pub description: Option<String>,
    pub employee_id: Option<i32>,
    pub payment_status: PaymentStatus,
    pub items: Vec<ServiceItem>,
    pub payments_history: Vec<Payment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A service order together with totals derived from its items and payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderView {
    #[serde(flatten)]
    pub order: ServiceOrder,
    pub total_price: Decimal,
    pub total_paid: Decimal,
}

/// Item as supplied by the client at create or add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceItem {
    pub description: String,
    pub price: Decimal,
}

/// Item bound to its service order, as handed to the item store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceItem {
    pub service_id: i32,
    pub description: String,
    pub price: Decimal,
}

/// Creation input; `items` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceOrder {
    pub client_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub employee_id: Option<i32>,
    #[serde(default)]
    pub items: Vec<CreateServiceItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn status_codes_roundtrip_through_lookup_ids() {
        for s in [PaymentStatus::Pending, PaymentStatus::Partial, PaymentStatus::Paid] {
            assert_eq!(PaymentStatus::from_code(s.code()), Some(s));
        }
        assert_eq!(PaymentStatus::Pending.code(), 1);
        assert_eq!(PaymentStatus::Paid.code(), 3);
        assert_eq!(PaymentStatus::from_code(4), None);
    }

    #[test]
    fn view_serializes_flat_camel_case() {
        let now = Utc::now();
        let view = ServiceOrderView {
            order: ServiceOrder {
                id: 7,
                client_name: "Ana".into(),
                description: None,
                employee_id: None,
                payment_status: PaymentStatus::Partial,
                items: vec![ServiceItem { id: 1, service_id: 7, description: "Labor".into(), price: dec!(100.00) }],
                payments_history: vec![],
                created_at: now,
                updated_at: now,
            },
            total_price: dec!(100.00),
            total_paid: dec!(30.00),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["paymentStatus"], "PARTIAL");
        assert_eq!(json["totalPrice"], "100.00");
        assert_eq!(json["totalPaid"], "30.00");
        assert_eq!(json["items"][0]["serviceId"], 7);
        assert!(json["paymentsHistory"].as_array().unwrap().is_empty());
        assert!(json["employeeId"].is_null());
    }

    #[test]
    fn create_input_accepts_numeric_and_string_prices() {
        let input: CreateServiceOrder = serde_json::from_str(
            r#"{"clientName":"Bob","items":[{"description":"a","price":10.5},{"description":"b","price":"20.25"}]}"#,
        )
        .unwrap();
        assert_eq!(input.items[0].price, dec!(10.5));
        assert_eq!(input.items[1].price, dec!(20.25));
        assert!(input.employee_id.is_none());
    }
}
