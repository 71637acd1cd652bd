//! Service layer providing the service-order payment lifecycle and login on top of models.
//! - Separates business logic from data access through repository ports.
//! - Reuses validation and entity definitions in `models` crate.
//! - Every port has an in-memory mock so the lifecycle is testable without a database.

pub mod errors;
pub mod auth;
pub mod orders;
#[cfg(test)]
pub mod test_support;
