//! # Forum Core
//!
//! The domain layer of the forum posts service.
//! This crate contains the post model, the query model used for listing,
//! the store port and the service that drives it. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod query;
pub mod service;

pub use error::DomainError;
pub use service::PostQueryService;
