//! Service-order payment lifecycle: domain, totals, payment state machine,
//! repository ports and the lifecycle manager that orchestrates them.

pub mod domain;
pub mod calculator;
pub mod payment;
pub mod errors;
pub mod outcome;
pub mod repository;
pub mod repo;
pub mod service;

pub use errors::OrderError;
pub use outcome::OutcomeStatus;
pub use service::ServiceOrderManager;
