//! Payment status state machine.
//!
//! `decide` is pure: it validates a proposed payment against the pre-payment
//! totals and says which status write, if any, must follow the payment append.
//! PENDING -> PARTIAL, PENDING -> PAID, PARTIAL -> PAID, PARTIAL -> PARTIAL (no write).

use rust_decimal::Decimal;
use thiserror::Error;

use super::calculator::Totals;
use super::domain::PaymentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaymentRejection {
    /// Total paid already equals total price.
    #[error("service has already been paid")]
    AlreadySettled,
    /// Non-positive value, or one that would exceed the outstanding balance.
    #[error("invalid payment amount")]
    InvalidAmount,
}

/// Status write to issue after the payment has been appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusWrite {
    Set(PaymentStatus),
    /// Persisted status is already correct; re-read instead of writing.
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentDecision {
    pub write: StatusWrite,
    pub total_paid_after: Decimal,
}

impl PaymentDecision {
    /// Status the order is in once the decision has been applied.
    pub fn resulting_status(&self, current: PaymentStatus) -> PaymentStatus {
        match self.write {
            StatusWrite::Set(s) => s,
            StatusWrite::Keep => current,
        }
    }
}

/// Decide a payment of `value` against `current` status and pre-payment `totals`.
pub fn decide(current: PaymentStatus, totals: &Totals, value: Decimal) -> Result<PaymentDecision, PaymentRejection> {
    if totals.is_settled() {
        return Err(PaymentRejection::AlreadySettled);
    }
    if value <= Decimal::ZERO {
        return Err(PaymentRejection::InvalidAmount);
    }
    // compare before adding: an unbounded value must not overflow the sum
    if value > totals.outstanding() {
        return Err(PaymentRejection::InvalidAmount);
    }
    let total_paid_after = totals
        .total_paid
        .checked_add(value)
        .ok_or(PaymentRejection::InvalidAmount)?;

    let write = if total_paid_after == totals.total_price {
        StatusWrite::Set(PaymentStatus::Paid)
    } else {
        match current {
            PaymentStatus::Pending => StatusWrite::Set(PaymentStatus::Partial),
            PaymentStatus::Partial => StatusWrite::Keep,
            // Cached PAID with a balance left: items were added after settlement.
            PaymentStatus::Paid => StatusWrite::Set(PaymentStatus::Partial),
        }
    };
    Ok(PaymentDecision { write, total_paid_after })
}
