//! User accounts: registration, lookup and role management.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::UserService;
