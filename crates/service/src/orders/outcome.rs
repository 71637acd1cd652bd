use serde::Serialize;

/// Tag describing how a lifecycle operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Ok,
    Created,
    NoContent,
    BadRequest,
    NotFound,
    Conflict,
    InternalError,
}

impl OutcomeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeStatus::Ok => "OK",
            OutcomeStatus::Created => "CREATED",
            OutcomeStatus::NoContent => "NO_CONTENT",
            OutcomeStatus::BadRequest => "BAD_REQUEST",
            OutcomeStatus::NotFound => "NOT_FOUND",
            OutcomeStatus::Conflict => "CONFLICT",
            OutcomeStatus::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, OutcomeStatus::Ok | OutcomeStatus::Created | OutcomeStatus::NoContent)
    }
}

/// Success tag of each lifecycle operation.
pub mod success {
    use super::OutcomeStatus;

    pub const CREATE: OutcomeStatus = OutcomeStatus::Created;
    pub const GET_ALL: OutcomeStatus = OutcomeStatus::Ok;
    pub const GET_BY_ID: OutcomeStatus = OutcomeStatus::Ok;
    pub const PAY: OutcomeStatus = OutcomeStatus::Ok;
    pub const ADD_ITEMS: OutcomeStatus = OutcomeStatus::Ok;
    pub const DELETE: OutcomeStatus = OutcomeStatus::NoContent;
}
