use thiserror::Error;

use super::outcome::OutcomeStatus;
use super::payment::PaymentRejection;

/// Failure of a lifecycle operation, as seen by callers.
///
/// `Display` is client-safe: persistence causes are logged where they occur
/// and never carried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Service not found.")]
    NotFound,
    #[error("Service has already been paid.")]
    AlreadySettled,
    #[error("Value invalid.")]
    InvalidAmount,
    #[error("{0}")]
    Validation(String),
    #[error("Internal server error.")]
    Internal,
}

impl OrderError {
    pub fn status(&self) -> OutcomeStatus {
        match self {
            OrderError::NotFound => OutcomeStatus::NotFound,
            OrderError::AlreadySettled | OrderError::InvalidAmount => OutcomeStatus::Conflict,
            OrderError::Validation(_) => OutcomeStatus::BadRequest,
            OrderError::Internal => OutcomeStatus::InternalError,
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            OrderError::Validation(_) => 2001,
            OrderError::NotFound => 2002,
            OrderError::AlreadySettled => 2003,
            OrderError::InvalidAmount => 2004,
            OrderError::Internal => 2100,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<PaymentRejection> for OrderError {
    fn from(r: PaymentRejection) -> Self {
        match r {
            PaymentRejection::AlreadySettled => OrderError::AlreadySettled,
            PaymentRejection::InvalidAmount => OrderError::InvalidAmount,
        }
    }
}

impl From<models::errors::ModelError> for OrderError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => OrderError::Validation(msg),
            models::errors::ModelError::Db(_) => OrderError::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rejections_are_conflicts() {
        assert_eq!(OrderError::from(PaymentRejection::AlreadySettled).status(), OutcomeStatus::Conflict);
        assert_eq!(OrderError::from(PaymentRejection::InvalidAmount).status(), OutcomeStatus::Conflict);
        assert_eq!(OrderError::NotFound.status(), OutcomeStatus::NotFound);
        assert_eq!(OrderError::Internal.status(), OutcomeStatus::InternalError);
    }

    #[test]
    fn internal_message_does_not_leak_cause() {
        let e = OrderError::from(models::errors::ModelError::Db("connection refused at 10.0.0.3".into()));
        assert_eq!(e, OrderError::Internal);
        assert_eq!(e.message(), "Internal server error.");
    }
}
