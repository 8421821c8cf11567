//! SeaORM entities for the four collections plus their enumerated columns.

pub mod db;
pub mod user;
pub mod provider_request;
pub mod service;
pub mod booking;

pub use provider_request::RequestStatus;
pub use user::Role;

#[cfg(test)]
mod tests;
