//! Service layer for the marketplace API.
//! - Domain documents and inputs per collection (users, providers, catalog, bookings).
//! - Repository traits with SeaORM and in-memory implementations under `store`.
//! - Application services holding the business rules the HTTP layer calls.
//! - Bearer token verification under `identity`.

pub mod errors;
pub mod document;
pub mod outcome;
pub mod pagination;
pub mod identity;
pub mod users;
pub mod providers;
pub mod catalog;
pub mod bookings;
pub mod store;
#[cfg(test)]
pub mod test_support;
