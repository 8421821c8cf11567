//! Service listings offered by providers.

pub mod domain;
pub mod query;
pub mod repository;
pub mod service;

pub use service::CatalogService;
