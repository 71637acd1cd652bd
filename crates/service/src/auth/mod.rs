//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Staff log in with email and password and receive a signed token; only
//! administrators may mutate service orders.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
