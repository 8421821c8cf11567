//! Applications to become a service provider.
//!
//! A request starts `pending`; an administrator moves it to another status.
//! Accepting promotes the applicant's account in the same transaction.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::ProviderService;
